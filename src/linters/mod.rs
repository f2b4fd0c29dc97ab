//! Linter descriptors and their run procedures
//!
//! A [`Linter`] knows which directories to search, which files it accepts,
//! and how to invoke its external tool and read the result. The
//! [`Registry`] holds them in execution order.

mod policy;
mod registry;

pub use policy::{Outcome, OutputPolicy};
pub use registry::Registry;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::shared::paths;

/// Language a linter is responsible for; also its selection key on the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "c++")]
    Cpp,
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "javascript")]
    JavaScript,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Cpp => "c++",
            Language::Python => "python",
            Language::JavaScript => "javascript",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved linter descriptor
#[derive(Debug, Clone)]
pub struct Linter {
    pub key: Language,
    pub roots: Vec<PathBuf>,
    pub extensions: Vec<String>,
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub cwd: Option<PathBuf>,
    pub policy: OutputPolicy,
}

impl Linter {
    /// Whether this linter wants `path`
    pub fn accepts(&self, path: &Path) -> bool {
        paths::has_extension(path, &self.extensions)
    }

    /// The command line that [`Linter::run`] would execute, for display
    pub fn command_line(&self, files: &[PathBuf]) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.extend(files.iter().map(|f| f.display().to_string()));
        parts.join(" ")
    }

    /// Run the external tool on `files` and interpret its output.
    ///
    /// Errors are reserved for not being able to run the tool at all; lint
    /// findings come back as a failed [`Outcome`].
    pub async fn run(&self, files: &[PathBuf]) -> Result<Outcome> {
        let program = which::which(&self.program).with_context(|| {
            format!("{} linter executable '{}' not found", self.key, self.program)
        })?;

        let mut cmd = Command::new(&program);
        cmd.args(&self.args).args(files).envs(&self.env);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        tracing::debug!("Running {} on {} files", program.display(), files.len());
        tracing::trace!("{}", self.command_line(files));

        let output = cmd
            .output()
            .await
            .with_context(|| format!("Failed to execute {}", program.display()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::debug!("{} exited with {}", self.program, output.status);

        Ok(self.policy.interpret(output.status.code(), &stdout, &stderr))
    }
}
