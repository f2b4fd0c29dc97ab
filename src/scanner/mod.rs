//! Source file discovery
//!
//! Walks linter roots and narrows the result down to the files a linter
//! should actually receive.

pub mod filter;
pub mod walker;

pub use filter::{ChangeFilter, filter_files};
pub use walker::{find_matching_files, walk_files};
