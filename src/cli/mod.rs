//! Command-line interface for polylint
//!
//! Parses language selection and mode flags with clap, loads configuration
//! and hands a [`RunOptions`] to the lint executor.

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeSet;

mod output;

pub use output::Output;

use crate::config;
use crate::lint::{LintExecutor, RunOptions};
use crate::linters::{Language, Registry};

/// polylint - run the right linter over every language in a source tree
#[derive(Parser, Debug)]
#[command(
    name = "polylint",
    version = crate::VERSION,
    about = "Find C++, Python and JavaScript sources and run their linters",
    long_about = "polylint walks the configured source roots, drops blacklisted files, \
                  optionally keeps only files changed since HEAD, and runs cpplint, pylint \
                  and standard on what is left. Without language flags every linter runs."
)]
pub struct Cli {
    /// Lint C++ sources
    #[arg(long = "cc", visible_aliases = ["cpp", "cxx", "c++"])]
    pub cpp: bool,

    /// Lint JavaScript sources
    #[arg(long = "js", visible_aliases = ["javascript", "es"])]
    pub javascript: bool,

    /// Lint Python sources
    #[arg(long = "py", visible_alias = "python")]
    pub python: bool,

    /// Only lint files changed relative to HEAD
    #[arg(short = 'c', long)]
    pub changed: bool,

    /// Show what would be linted without running any linter
    #[arg(long)]
    pub dry_run: bool,

    /// List the configured linters and exit
    #[arg(long)]
    pub list: bool,

    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory")]
    pub directory: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, env = "POLYLINT_CONFIG")]
    pub config: Option<String>,
}

impl Cli {
    /// Languages picked on the command line; empty means all
    pub fn languages(&self) -> BTreeSet<Language> {
        [
            (self.cpp, Language::Cpp),
            (self.javascript, Language::JavaScript),
            (self.python, Language::Python),
        ]
        .into_iter()
        .filter_map(|(picked, language)| picked.then_some(language))
        .collect()
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            languages: self.languages(),
            only_changed: self.changed,
            dry_run: self.dry_run,
        }
    }

    /// Execute the CLI. Returns whether every linter passed.
    pub async fn run(self) -> Result<bool> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Cannot change directory to {dir}"))?;
        }

        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        let config = config::load(self.config.as_deref())?;
        let cwd = std::env::current_dir().context("Cannot determine current directory")?;
        let source_root = config.source_root(&cwd);
        tracing::info!("Source root: {}", source_root.display());

        let registry = Registry::from_config(&config, &source_root)?;
        if registry.is_empty() {
            tracing::warn!("No linters configured");
        }
        tracing::debug!("{} linters configured", registry.len());
        let blacklist = config.blacklist(&source_root);

        if self.list {
            list(&registry, &output);
            return Ok(true);
        }

        let executor = LintExecutor::new(&registry, &blacklist, &source_root, &output);
        let report = executor.run(&self.run_options()).await?;

        match report.failed {
            Some(key) => {
                tracing::debug!("Stopped after {} linter failure", key);
                Ok(false)
            }
            None => {
                if self.dry_run {
                    output.verbose(&format!("Dry run: {} linters would run", report.runs.len()));
                }
                Ok(true)
            }
        }
    }
}

fn list(registry: &Registry, output: &Output) {
    for linter in registry.iter() {
        let roots: Vec<String> = linter.roots.iter().map(|r| r.display().to_string()).collect();
        output.step(linter.key.as_str());
        output.table_row("roots", &roots.join(", "));
        output.table_row("extensions", &linter.extensions.join(", "));
        output.table_row("command", &linter.command_line(&[]));
        output.table_row("policy", &linter.policy.to_string());
        if let Some(cwd) = &linter.cwd {
            output.table_row("cwd", &cwd.display().to_string());
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Logs go to stderr so stdout stays the announcement stream
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
