// crates/text_patch/src/processor/mod.rs

pub mod file_patcher;

pub use file_patcher::{
    apply_edits, patch_file_with_patcher, DefaultFilePatcher, EditKind, FileEdit, FilePatchError,
    FilePatcher, PatchOutcome,
};
