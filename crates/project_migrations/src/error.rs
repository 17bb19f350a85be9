// crates/project_migrations/src/error.rs

use std::io;
use std::path::PathBuf;

use package_deps::DepsError;
use text_patch::processor::FilePatchError;
use text_patch::PatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error(transparent)]
    Deps(#[from] DepsError),

    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<FilePatchError> for MigrationError {
    fn from(err: FilePatchError) -> Self {
        match err {
            FilePatchError::Patch(err) => MigrationError::Patch(err),
            FilePatchError::Io { action, path, source } => MigrationError::Io { action, path, source },
        }
    }
}

impl MigrationError {
    /// Attaches the file identity to primitive errors.
    pub(crate) fn with_origin(self, path: impl Into<PathBuf>) -> Self {
        match self {
            MigrationError::Patch(err) => MigrationError::Patch(err.with_origin(path)),
            MigrationError::Deps(DepsError::Patch(err)) => MigrationError::Patch(err.with_origin(path)),
            other => other,
        }
    }
}
