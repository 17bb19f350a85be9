// crates/project_migrations/src/android.rs

use once_cell::sync::Lazy;
use regex::Regex;

use migration_markers::{
    classpath_start, wrapper_distribution_url, CLASSPATH_END, CLASSPATH_PREFIX, CONFIG_CHANGES_END,
    CONFIG_CHANGES_START, WRAPPER_DISTRIBUTION_START,
};
use package_deps::is_older;
use text_patch::{replace_all_bounded, replace_line_values_with, PatchError};

use crate::bump::{bump_bounded, bump_line_value};

static WRAPPER_VERSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"gradle-(\d+(?:\.\d+)*)-").unwrap());

/// A `variables.gradle` value: bare numbers or single-quoted strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GradleValue {
    Number(u32),
    Text(String),
}

impl GradleValue {
    fn start(&self, name: &str) -> String {
        match self {
            GradleValue::Number(_) => format!("{} = ", name),
            GradleValue::Text(_) => format!("{} = '", name),
        }
    }

    /// Numbers run to the end of their line; strings end at the closing quote.
    fn bump(&self, text: &str, start: &str) -> Result<Option<String>, PatchError> {
        match self {
            GradleValue::Number(n) => bump_line_value(text, start, &n.to_string()),
            GradleValue::Text(s) => bump_bounded(text, start, "'", s),
        }
    }

    fn declaration(&self, name: &str) -> String {
        match self {
            GradleValue::Number(n) => format!("    {} = {}\n", name, n),
            GradleValue::Text(s) => format!("    {} = '{}'\n", name, s),
        }
    }
}

/// Raises the version of each `classpath '<dependency>:<version>'` entry.
///
/// Returns `None` when the file has no classpath entries at all.
pub fn update_gradle_classpaths(text: &str, classpaths: &[(String, String)]) -> Result<Option<String>, PatchError> {
    if !text.contains(CLASSPATH_PREFIX) {
        return Ok(None);
    }
    let mut result = text.to_string();
    for (dependency, version) in classpaths {
        let start = classpath_start(dependency);
        match bump_bounded(&result, &start, CLASSPATH_END, version)? {
            Some(bumped) => result = bumped,
            None => log::debug!("no classpath entry for {}", dependency),
        }
    }
    Ok(Some(result))
}

/// Raises each variable in a `variables.gradle` `ext { ... }` block, adding
/// the ones that are missing just before the block's closing brace.
///
/// Returns `None` when there is no `ext {` block.
pub fn update_gradle_variables(text: &str, variables: &[(String, GradleValue)]) -> Result<Option<String>, PatchError> {
    if !text.contains("ext {") {
        return Ok(None);
    }
    let mut result = text.to_string();
    for (name, value) in variables {
        let start = value.start(name);
        if result.contains(&start) {
            if let Some(bumped) = value.bump(&result, &start)? {
                result = bumped;
            }
        } else {
            result = insert_variable(&result, &value.declaration(name))?;
        }
    }
    Ok(Some(result))
}

fn insert_variable(text: &str, declaration: &str) -> Result<String, PatchError> {
    let block = text.find("ext {").unwrap_or(0);
    let close = text[block..].find('}').map(|rel| block + rel).ok_or_else(|| PatchError::MarkerNotFound {
        marker: "}".to_string(),
        offset: block,
        context: text[block..].chars().take(40).collect(),
        origin: None,
    })?;
    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let declaration = declaration.replace('\n', newline);
    let mut result = String::with_capacity(text.len() + declaration.len() + newline.len());
    // Insert at the start of the closing brace's line so indentation stays
    // intact, unless that line is the `ext {` line itself.
    match text[..close].rfind('\n').filter(|&i| i > block) {
        Some(i) => {
            result.push_str(&text[..i + 1]);
            result.push_str(&declaration);
            result.push_str(&text[i + 1..]);
        }
        None => {
            result.push_str(text[..close].trim_end());
            result.push_str(newline);
            result.push_str(&declaration);
            result.push_str(&text[close..]);
        }
    }
    Ok(result)
}

/// Sets every `android:configChanges` attribute to `value`.
pub fn update_config_changes(text: &str, value: &str) -> Result<Option<String>, PatchError> {
    if !text.contains(CONFIG_CHANGES_START) {
        return Ok(None);
    }
    replace_all_bounded(text, CONFIG_CHANGES_START, CONFIG_CHANGES_END, value).map(Some)
}

/// Points the Gradle wrapper at `version` unless it already uses a newer one.
///
/// The URL runs to the end of its line, which may also be the end of the file.
pub fn update_wrapper_distribution(text: &str, version: &str) -> Result<Option<String>, PatchError> {
    if !text.contains(WRAPPER_DISTRIBUTION_START) {
        return Ok(None);
    }
    replace_line_values_with(text, WRAPPER_DISTRIBUTION_START, |url| {
        let current = WRAPPER_VERSION
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());
        match current {
            Some(current) if !is_older(current, version) => None,
            _ => Some(wrapper_distribution_url(version)),
        }
    })
    .map(Some)
}
