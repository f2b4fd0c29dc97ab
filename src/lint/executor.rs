use anyhow::{Context, Result};
use std::path::PathBuf;

use super::{LinterRun, RunOptions, RunReport};
use crate::cli::Output;
use crate::git::{GitRepo, find_changed_files};
use crate::linters::{Linter, Registry};
use crate::scanner::{ChangeFilter, filter_files};
use crate::shared::paths::{PathSet, files_noun};

/// Runs the selected linters over their filtered file sets
pub struct LintExecutor<'a> {
    registry: &'a Registry,
    blacklist: &'a PathSet,
    source_root: PathBuf,
    output: &'a Output,
}

impl<'a> LintExecutor<'a> {
    pub fn new(
        registry: &'a Registry,
        blacklist: &'a PathSet,
        source_root: impl Into<PathBuf>,
        output: &'a Output,
    ) -> Self {
        Self {
            registry,
            blacklist,
            source_root: source_root.into(),
            output,
        }
    }

    /// Lint everything `options` selects.
    ///
    /// Discovery problems (walk errors, a failing `git diff`, a missing linter
    /// executable) are returned as errors. A linter reporting problems ends the
    /// run early with [`RunReport::failed`] set; later linters are not started.
    pub async fn run(&self, options: &RunOptions) -> Result<RunReport> {
        // Resolved once, before any linter runs
        let change_filter = if options.only_changed {
            // git reports paths relative to the top of the working tree, which
            // may sit above the source root
            let top = GitRepo::discover(&self.source_root)
                .and_then(|repo| repo.workdir())
                .context("Failed to find changed files")?;
            ChangeFilter::from_changed(find_changed_files(&top).await?)
        } else {
            ChangeFilter::Inactive
        };

        let mut report = RunReport::default();

        for linter in self.registry.select(&options.languages) {
            let files = filter_files(
                &linter.roots,
                |path| linter.accepts(path),
                self.blacklist,
                &change_filter,
            )?;

            if files.is_empty() {
                tracing::debug!("No {} files to lint", linter.key);
                continue;
            }

            self.output.announce(&format!(
                "linting {} {} {}",
                files.len(),
                linter.key,
                files_noun(files.len())
            ));
            report.runs.push(LinterRun {
                key: linter.key,
                files: files.len(),
            });

            if options.dry_run {
                self.describe(linter, &files);
                continue;
            }

            let outcome = linter.run(&files).await?;
            if !outcome.is_success() {
                self.output.diagnostics(outcome.diagnostics());
                tracing::info!("{} linter reported problems", linter.key);
                report.failed = Some(linter.key);
                return Ok(report);
            }
        }

        Ok(report)
    }

    fn describe(&self, linter: &Linter, files: &[PathBuf]) {
        let mut command = vec![linter.program.as_str()];
        command.extend(linter.args.iter().map(String::as_str));
        let cwd = linter.cwd.as_deref().unwrap_or(self.source_root.as_path());

        self.output.step(&format!(
            "would run {} on {} {} in {}",
            command.join(" "),
            files.len(),
            files_noun(files.len()),
            cwd.display()
        ));
        for (name, value) in &linter.env {
            self.output.verbose(&format!("{name}={value}"));
        }
        for file in files {
            self.output.verbose(&file.display().to_string());
        }
    }
}
