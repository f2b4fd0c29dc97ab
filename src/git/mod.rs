//! Git integration
//!
//! Repository discovery goes through git2; the changed-file query shells out
//! to `git diff` so it sees exactly what the user's git sees.

pub mod operations;

pub use operations::{find_changed_files, parse_name_only};

use anyhow::{Context, Result};
use git2::Repository;
use std::path::{Path, PathBuf};

pub struct GitRepo {
    pub repo: Repository,
}

impl GitRepo {
    /// Discover the repository enclosing `path`
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path.as_ref()).context("No Git repository found")?;
        Ok(GitRepo { repo })
    }

    /// Top level of the working tree
    pub fn workdir(&self) -> Result<PathBuf> {
        let workdir = self
            .repo
            .workdir()
            .context("Repository has no working directory")?;
        Ok(crate::shared::paths::normalize(workdir))
    }
}
