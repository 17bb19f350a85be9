// crates/text_patch/src/processor/file_patcher.rs

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::bounded::{replace_all_bounded, MarkerPair};
use crate::braced_block::remove_braced_block;
use crate::error::PatchError;

/// What to do to a file's text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditKind {
    /// Replace the interior of every `markers` region.
    Replace { markers: MarkerPair, replacement: String },
    /// Drop every braced block whose first line contains `marker`.
    RemoveBlock { marker: String },
}

/// One edit plus the policy for a missing start marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEdit {
    pub kind: EditKind,
    /// When true a missing start marker fails the file; otherwise the edit is skipped.
    pub required: bool,
}

impl FileEdit {
    pub fn replace(start: impl Into<String>, end: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Replace {
                markers: MarkerPair::new(start, end),
                replacement: replacement.into(),
            },
            required: false,
        }
    }

    pub fn remove_block(marker: impl Into<String>) -> Self {
        Self {
            kind: EditKind::RemoveBlock { marker: marker.into() },
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn start_marker(&self) -> &str {
        match &self.kind {
            EditKind::Replace { markers, .. } => &markers.start,
            EditKind::RemoveBlock { marker } => marker,
        }
    }

    /// Applies the edit to `text`. The start marker is assumed to be present.
    pub fn apply(&self, text: &str) -> Result<String, PatchError> {
        match &self.kind {
            EditKind::Replace { markers, replacement } => {
                replace_all_bounded(text, &markers.start, &markers.end, replacement)
            }
            EditKind::RemoveBlock { marker } => remove_braced_block(text, marker),
        }
    }
}

/// Result of patching one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchOutcome {
    Updated,
    Unchanged,
    Skipped(String),
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOutcome::Updated => write!(f, "updated"),
            PatchOutcome::Unchanged => write!(f, "unchanged"),
            PatchOutcome::Skipped(reason) => write!(f, "skipped ({})", reason),
        }
    }
}

#[derive(Debug, Error)]
pub enum FilePatchError {
    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Trait that abstracts applying edits to a file on disk.
pub trait FilePatcher {
    fn patch_file(&self, path: &Path, edits: &[FileEdit]) -> Result<PatchOutcome, FilePatchError>;
}

/// Reads the file, applies the edits in order and writes it back when the
/// text changed. With `dry_run` set nothing is written.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFilePatcher {
    pub dry_run: bool,
}

impl DefaultFilePatcher {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn read(&self, path: &Path) -> Result<String, FilePatchError> {
        fs::read_to_string(path).map_err(|source| FilePatchError::Io {
            action: "read",
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes `text` to `path` when it differs from `original`, unless this is
    /// a dry run.
    pub fn commit(&self, path: &Path, original: &str, text: &str) -> Result<PatchOutcome, FilePatchError> {
        if text == original {
            return Ok(PatchOutcome::Unchanged);
        }
        if self.dry_run {
            log::debug!("dry run: not writing {}", path.display());
        } else {
            fs::write(path, text).map_err(|source| FilePatchError::Io {
                action: "write",
                path: path.to_path_buf(),
                source,
            })?;
        }
        Ok(PatchOutcome::Updated)
    }
}

impl FilePatcher for DefaultFilePatcher {
    fn patch_file(&self, path: &Path, edits: &[FileEdit]) -> Result<PatchOutcome, FilePatchError> {
        if !path.is_file() {
            log::debug!("{} does not exist, skipping", path.display());
            return Ok(PatchOutcome::Skipped("file not found".to_string()));
        }

        let original = self.read(path)?;
        let text = apply_edits(&original, edits).map_err(|e| e.with_origin(path))?;
        self.commit(path, &original, &text)
    }
}

/// Applies `edits` sequentially, each one seeing the previous one's output.
/// Optional edits whose start marker is absent are skipped with a warning.
pub fn apply_edits(text: &str, edits: &[FileEdit]) -> Result<String, PatchError> {
    let mut current = text.to_string();
    for edit in edits {
        let start = edit.start_marker();
        if !current.contains(start) {
            if edit.required {
                return Err(PatchError::MarkerNotFound {
                    marker: start.to_string(),
                    offset: 0,
                    context: String::new(),
                    origin: None,
                });
            }
            log::warn!("Unable to find {:?}. Try updating it manually", start);
            continue;
        }
        current = edit.apply(&current)?;
    }
    Ok(current)
}

/// Public API function to patch a file using a provided `FilePatcher` implementation.
pub fn patch_file_with_patcher<P: AsRef<Path>>(
    patcher: &dyn FilePatcher,
    path: P,
    edits: &[FileEdit],
) -> Result<PatchOutcome, FilePatchError> {
    patcher.patch_file(path.as_ref(), edits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Dummy patcher that always returns an error.
    struct FailingPatcher;

    impl FilePatcher for FailingPatcher {
        fn patch_file(&self, path: &Path, _edits: &[FileEdit]) -> Result<PatchOutcome, FilePatchError> {
            Err(FilePatchError::Io {
                action: "read",
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, "simulated failure"),
            })
        }
    }

    #[test]
    fn test_apply_edits_sequential() {
        let text = "a = '1'\nb = '1'\n";
        let edits = vec![
            FileEdit::replace("a = '", "'", "2"),
            // Sees the previous edit's output.
            FileEdit::replace("a = '2'\nb = '", "'", "3"),
        ];
        assert_eq!(apply_edits(text, &edits).unwrap(), "a = '2'\nb = '3'\n");
    }

    #[test]
    fn test_optional_missing_marker_skipped() {
        let edits = vec![FileEdit::replace("missing = '", "'", "2")];
        assert_eq!(apply_edits("x", &edits).unwrap(), "x");
    }

    #[test]
    fn test_required_missing_marker_fails() {
        let edits = vec![FileEdit::remove_block("func gone").required()];
        let err = apply_edits("x", &edits).unwrap_err();
        assert_eq!(err.marker(), Some("func gone"));
    }

    #[test]
    fn test_default_patcher_updates_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "platform :ios, '12.0'\n").unwrap();
        let patcher = DefaultFilePatcher::default();
        let outcome = patcher
            .patch_file(file.path(), &[FileEdit::replace("platform :ios, '", "'", "13.0")])
            .unwrap();
        assert_eq!(outcome, PatchOutcome::Updated);
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "platform :ios, '13.0'\n");
    }

    #[test]
    fn test_default_patcher_unchanged() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "platform :ios, '13.0'\n").unwrap();
        let outcome = DefaultFilePatcher::default()
            .patch_file(file.path(), &[FileEdit::replace("platform :ios, '", "'", "13.0")])
            .unwrap();
        assert_eq!(outcome, PatchOutcome::Unchanged);
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "v = '1'").unwrap();
        let outcome = DefaultFilePatcher::new(true)
            .patch_file(file.path(), &[FileEdit::replace("v = '", "'", "2")])
            .unwrap();
        assert_eq!(outcome, PatchOutcome::Updated);
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "v = '1'");
    }

    #[test]
    fn test_commit_writes_only_changes() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "a").unwrap();
        let patcher = DefaultFilePatcher::default();
        assert_eq!(patcher.commit(file.path(), "a", "a").unwrap(), PatchOutcome::Unchanged);
        assert_eq!(patcher.commit(file.path(), "a", "b").unwrap(), PatchOutcome::Updated);
        assert_eq!(patcher.read(file.path()).unwrap(), "b");
    }

    #[test]
    fn test_missing_file_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = DefaultFilePatcher::default()
            .patch_file(&dir.path().join("Podfile"), &[])
            .unwrap();
        assert_eq!(outcome, PatchOutcome::Skipped("file not found".to_string()));
    }

    #[test]
    fn test_error_names_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "v = '1").unwrap();
        let err = DefaultFilePatcher::default()
            .patch_file(file.path(), &[FileEdit::replace("v = '", "'", "2")])
            .unwrap_err();
        match err {
            FilePatchError::Patch(PatchError::MarkerNotFound { origin, .. }) => {
                assert_eq!(origin.as_deref(), Some(file.path()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_failing_patcher() {
        let file = NamedTempFile::new().unwrap();
        let result = patch_file_with_patcher(&FailingPatcher, file.path(), &[]);
        assert!(result.is_err());
    }
}
