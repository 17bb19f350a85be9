// crates/package_deps/src/version.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

static NUMERIC_COMPONENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Compares two version strings by their numeric components.
///
/// Range prefixes and suffixes are ignored (`"^5.0.0"`, `"~4.3"`, `"8.2.1-rc1"`
/// all compare on their digits), and missing trailing components count as
/// zero, so `"8.2"` equals `"8.2.0"`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = components(a);
    let right = components(b);
    let len = left.len().max(right.len());
    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// True when `current` is strictly older than `target`. A current value
/// without any digits (a `$variable` reference, say) is never older.
pub fn is_older(current: &str, target: &str) -> bool {
    if components(current).is_empty() {
        return false;
    }
    compare_versions(current, target) == Ordering::Less
}

fn components(version: &str) -> Vec<u64> {
    // Stop at a pre-release or build suffix so "8.2.1-rc1" does not grow a fourth component.
    let core = version.split(['-', '+']).next().unwrap_or(version);
    NUMERIC_COMPONENT
        .find_iter(core)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}
