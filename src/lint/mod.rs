//! Lint orchestration
//!
//! Picks the selected linters, computes each one's file set and runs them one
//! after another, stopping at the first failure.
//!
//! ```text
//! options ─▶ select linters ─▶ for each: walk roots ─▶ blacklist ─▶ change filter ─▶ run
//! ```

mod executor;

pub use executor::LintExecutor;

use std::collections::BTreeSet;

use crate::linters::Language;

/// What to lint, as decided by the option parser
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Selected languages; empty means all of them
    pub languages: BTreeSet<Language>,
    /// Only lint files that differ from `HEAD`
    pub only_changed: bool,
    /// Compute and announce file sets without spawning linters
    pub dry_run: bool,
}

/// One linter invocation that took place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinterRun {
    pub key: Language,
    pub files: usize,
}

/// Result of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Linters that were invoked (or would have been, in a dry run), in order
    pub runs: Vec<LinterRun>,
    /// The linter that failed and stopped the run
    pub failed: Option<Language>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_none()
    }
}
