// crates/project_migrations/src/bump.rs

use package_deps::is_older;
use text_patch::{replace_bounded_with, replace_line_values_with, PatchError};

/// Raises each value bounded by `start`/`end` that is older than `target`.
///
/// * `Ok(None)` when `start` does not occur at all.
/// * `Ok(Some(text))` otherwise, where only the older occurrences changed.
///   Values at or above `target`, and values without a version number, are
///   left alone.
///
/// A `start` without a following `end` is a `MarkerNotFound` error.
pub fn bump_bounded(text: &str, start: &str, end: &str, target: &str) -> Result<Option<String>, PatchError> {
    if !text.contains(start) {
        return Ok(None);
    }
    replace_bounded_with(text, start, end, |current| bumped(start, current, target)).map(Some)
}

/// Like [`bump_bounded`] for values that run to the end of their line.
pub fn bump_line_value(text: &str, start: &str, target: &str) -> Result<Option<String>, PatchError> {
    if !text.contains(start) {
        return Ok(None);
    }
    replace_line_values_with(text, start, |current| bumped(start, current, target)).map(Some)
}

fn bumped(start: &str, current: &str, target: &str) -> Option<String> {
    if is_older(current.trim(), target) {
        Some(target.to_string())
    } else {
        log::debug!("{:?}{} is not older than {}", start, current, target);
        None
    }
}
