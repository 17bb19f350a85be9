// crates/text_patch/src/lib.rs

//! Text-region patching primitives for rewriting native project files.
//!
//! Two primitives do all the work:
//!   - [`replace_all_bounded`] swaps the text between a start and an end marker,
//!     keeping both markers.
//!   - [`remove_braced_block`] drops a brace-delimited block of lines whose first
//!     line contains a marker.
//!
//! Both are pure. Applying them to files on disk, and deciding whether a
//! missing marker is fatal, is done through the [`processor`] module.

pub mod bounded;
pub mod braced_block;
pub mod error;
pub mod processor;

pub use bounded::{
    find_bounded, find_line_value, replace_all_bounded, replace_bounded_with, replace_line_values_with, MarkerPair,
};
pub use braced_block::{remove_braced_block, remove_braced_block_lines};
pub use error::PatchError;
