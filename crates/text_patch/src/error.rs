// crates/text_patch/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while patching a text region.
///
/// The primitives are pure and never know which file they operate on, so
/// `origin` starts out as `None` and is filled in by the file patcher via
/// [`PatchError::with_origin`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("marker {marker:?} not found after byte {offset}{} (near {context:?})", origin_suffix(.origin))]
    MarkerNotFound {
        marker: String,
        offset: usize,
        context: String,
        origin: Option<PathBuf>,
    },

    #[error("block starting at line {start_line} for marker {marker:?} never closes (depth {depth} at end of input){}", origin_suffix(.origin))]
    MalformedBlock {
        marker: String,
        start_line: usize,
        depth: isize,
        origin: Option<PathBuf>,
    },

    #[error("{which} marker must not be empty")]
    EmptyMarker { which: &'static str },
}

fn origin_suffix(origin: &Option<PathBuf>) -> String {
    match origin {
        Some(path) => format!(" in {}", path.display()),
        None => String::new(),
    }
}

impl PatchError {
    /// Attaches the identity of the text that was searched.
    pub fn with_origin(self, path: impl Into<PathBuf>) -> Self {
        let path = Some(path.into());
        match self {
            PatchError::MarkerNotFound { marker, offset, context, .. } => PatchError::MarkerNotFound {
                marker,
                offset,
                context,
                origin: path,
            },
            PatchError::MalformedBlock { marker, start_line, depth, .. } => PatchError::MalformedBlock {
                marker,
                start_line,
                depth,
                origin: path,
            },
            other => other,
        }
    }

    /// The delimiter this error is about, if any.
    pub fn marker(&self) -> Option<&str> {
        match self {
            PatchError::MarkerNotFound { marker, .. } | PatchError::MalformedBlock { marker, .. } => Some(marker),
            PatchError::EmptyMarker { .. } => None,
        }
    }
}
