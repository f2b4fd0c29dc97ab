//! # polylint - one lint command for a multi-language tree
//!
//! polylint discovers source files under configured roots, drops blacklisted
//! paths, optionally narrows the set to files changed since `HEAD`, and runs
//! the matching external linter for each language in turn. The first linter
//! that reports a problem stops the run with a non-zero exit status, which
//! makes it suitable as a pre-commit hook or CI step.
//!
//! ## Usage
//!
//! ```bash
//! # Lint everything
//! polylint
//!
//! # Only C++ and Python files changed since HEAD
//! polylint --cc --py --changed
//!
//! # See what would run
//! polylint --dry-run -v
//! ```
//!
//! ## Configuration
//!
//! Defaults are embedded; override them in `polylint.toml`:
//!
//! ```toml
//! blacklist = ["atom/common/node_includes.h"]
//!
//! [[linters]]
//! key = "python"
//! roots = ["script"]
//! extensions = ["py"]
//! command = "pylint.py"
//! args = ["--rcfile={root}/../third_party/depot_tools/pylintrc"]
//! env = { PYTHONPATH = "{root}/script" }
//! policy = "quiet"
//! ```

pub mod cli;
pub mod config;
pub mod git;
pub mod lint;
pub mod linters;
pub mod scanner;
pub mod shared;

pub use cli::{Cli, Output};
pub use config::PolylintConfig;

/// Result type alias for polylint operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
