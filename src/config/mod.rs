//! Configuration for polylint
//!
//! The typed view of the layered configuration: where the sources live, which
//! files are never linted, and the ordered list of linters to run.

pub mod core;

pub use self::core::load;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::linters::{Language, OutputPolicy};
use crate::shared::paths::{self, PathSet};

/// Placeholder expanded to the source root in linter commands, arguments, env and cwd
pub const ROOT_PLACEHOLDER: &str = "{root}";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolylintConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    /// Paths excluded from every linter
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Linters in execution order
    #[serde(default)]
    pub linters: Vec<LinterConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Source root; empty means "discover it"
    #[serde(default)]
    pub source_root: String,
}

/// One linter descriptor as written in configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinterConfig {
    pub key: Language,

    /// Directories to search, relative to the source root unless absolute
    pub roots: Vec<String>,

    /// Accepted file extensions without the leading dot
    pub extensions: Vec<String>,

    /// Executable name (looked up on PATH) or path
    pub command: String,

    /// Arguments placed before the file list
    #[serde(default)]
    pub args: Vec<String>,

    /// Extra environment variables for the linter process
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Working directory for the linter process
    #[serde(default)]
    pub cwd: Option<String>,

    pub policy: OutputPolicy,
}

impl PolylintConfig {
    /// Reject configurations that cannot describe a runnable linter
    pub fn validate(&self) -> Result<()> {
        for (index, linter) in self.linters.iter().enumerate() {
            if linter.command.trim().is_empty() {
                bail!("linters[{index}] ({}): command is empty", linter.key);
            }
            if linter.roots.is_empty() {
                bail!("linters[{index}] ({}): no roots configured", linter.key);
            }
            if linter.extensions.is_empty() {
                bail!("linters[{index}] ({}): no extensions configured", linter.key);
            }
            if let Some(ext) = linter.extensions.iter().find(|ext| ext.starts_with('.')) {
                bail!(
                    "linters[{index}] ({}): extension '{ext}' must not start with a dot",
                    linter.key
                );
            }
        }
        Ok(())
    }

    /// The source root: configured value, else the enclosing git working tree, else `cwd`
    pub fn source_root(&self, cwd: &Path) -> PathBuf {
        let configured = self.general.source_root.trim();
        if !configured.is_empty() {
            return paths::resolve(cwd, configured);
        }

        match crate::git::GitRepo::discover(cwd).and_then(|repo| repo.workdir()) {
            Ok(workdir) => workdir,
            Err(e) => {
                tracing::debug!("{e:#}; using {} as source root", cwd.display());
                paths::normalize(cwd)
            }
        }
    }

    /// The blacklist as absolute paths
    pub fn blacklist(&self, source_root: &Path) -> PathSet {
        paths::path_set(source_root, &self.blacklist)
    }
}

/// Replace every `{root}` in `template` with the source root
pub fn expand_root(template: &str, source_root: &Path) -> String {
    template.replace(ROOT_PLACEHOLDER, &source_root.to_string_lossy())
}
