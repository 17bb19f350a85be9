// crates/project_migrations/src/ios.rs

use migration_markers::{
    PBXPROJ_DEPLOYMENT_TARGET_END, PBXPROJ_DEPLOYMENT_TARGET_START, PODFILE_PLATFORM_END,
    PODFILE_PLATFORM_START,
};
use text_patch::processor::{apply_edits, FileEdit};
use text_patch::PatchError;

use crate::bump::bump_bounded;

/// Raises `platform :ios, '<x>'` in a Podfile to `target`.
pub fn update_podfile_platform(text: &str, target: &str) -> Result<Option<String>, PatchError> {
    bump_bounded(text, PODFILE_PLATFORM_START, PODFILE_PLATFORM_END, target)
}

/// Raises every `IPHONEOS_DEPLOYMENT_TARGET = <x>;` build setting to `target`.
pub fn update_pbxproj_deployment_target(text: &str, target: &str) -> Result<Option<String>, PatchError> {
    bump_bounded(
        text,
        PBXPROJ_DEPLOYMENT_TARGET_START,
        PBXPROJ_DEPLOYMENT_TARGET_END,
        target,
    )
}

/// Drops the braced block starting at `marker`, if present.
pub fn remove_legacy_block(text: &str, marker: &str) -> Result<Option<String>, PatchError> {
    if !text.contains(marker) {
        return Ok(None);
    }
    apply_edits(text, &[FileEdit::remove_block(marker)]).map(Some)
}
