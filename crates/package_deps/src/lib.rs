// crates/package_deps/src/lib.rs

//! Dependency names and versions read from a project's `package.json`.
//!
//! The set is a plain value: build it once with
//! [`DependencySet::from_package_json`] and hand it to whatever needs it.

use std::collections::BTreeMap;

use migration_markers::package_json_entry_start;
use serde_json::Value;
use text_patch::{replace_bounded_with, PatchError};
use thiserror::Error;

pub mod version;

pub use version::{compare_versions, is_older};

#[derive(Debug, Error)]
pub enum DepsError {
    #[error("package.json is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("package.json root must be an object")]
    NotAnObject,

    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// Dependency name to version requirement, merged from `dependencies` and
/// `devDependencies` (runtime entries win on duplicates).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencySet {
    entries: BTreeMap<String, String>,
}

impl DependencySet {
    pub fn from_package_json(text: &str) -> Result<Self, DepsError> {
        let root: Value = serde_json::from_str(text)?;
        let root = root.as_object().ok_or(DepsError::NotAnObject)?;

        let mut entries = BTreeMap::new();
        for section in ["devDependencies", "dependencies"] {
            let Some(table) = root.get(section).and_then(Value::as_object) else {
                continue;
            };
            for (name, version) in table {
                if let Some(version) = version.as_str() {
                    entries.insert(name.clone(), version.to_string());
                } else {
                    log::debug!("ignoring non-string version for {} in {}", name, section);
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyUpdate {
    pub name: String,
    pub from: String,
    pub to: String,
}

/// Plans a bump to `target` for each of `packages` present in `deps` whose
/// current requirement is older than `target`.
pub fn plan_updates(deps: &DependencySet, packages: &[&str], target: &str) -> Vec<DependencyUpdate> {
    packages
        .iter()
        .filter_map(|name| {
            let current = deps.version_of(name)?;
            if !is_older(current, target) {
                return None;
            }
            Some(DependencyUpdate {
                name: name.to_string(),
                from: current.to_string(),
                to: target.to_string(),
            })
        })
        .collect()
}

/// Rewrites the version strings of `updates` in the raw `package.json` text,
/// leaving formatting and key order untouched. An entry that already asks for
/// a version at or above the update's target is kept.
pub fn apply_updates(text: &str, updates: &[DependencyUpdate]) -> Result<String, DepsError> {
    let mut result = text.to_string();
    for update in updates {
        let start = package_json_entry_start(&update.name);
        if !result.contains(&start) {
            log::warn!("Unable to find {} in package.json. Try updating it manually", update.name);
            continue;
        }
        result = replace_bounded_with(&result, &start, "\"", |current| {
            is_older(current, &update.to).then(|| update.to.clone())
        })?;
    }
    Ok(result)
}
