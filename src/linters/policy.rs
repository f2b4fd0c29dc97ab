//! Output interpretation policies
//!
//! Each external linter reports problems differently. A policy turns the raw
//! exit code and output streams into an [`Outcome`] without side effects.

use serde::{Deserialize, Serialize};

/// How a linter's exit code and output are turned into pass/fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputPolicy {
    /// cpplint: findings and status lines share stderr; status lines are dropped
    Cpplint,
    /// Quiet on success: any output at all is a failure
    Quiet,
    /// Only the exit code counts; stdout carries the findings
    ExitStatus,
}

/// Result of one linter run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    passed: bool,
    diagnostics: String,
}

impl Outcome {
    /// Build an outcome. Non-blank diagnostics always mean failure, whatever
    /// the tool's exit code said.
    pub fn new(exit_ok: bool, diagnostics: String) -> Self {
        let passed = exit_ok && diagnostics.trim().is_empty();
        let diagnostics = if passed { String::new() } else { diagnostics };
        Self {
            passed,
            diagnostics,
        }
    }

    pub fn passed() -> Self {
        Self::new(true, String::new())
    }

    pub fn is_success(&self) -> bool {
        self.passed
    }

    pub fn diagnostics(&self) -> &str {
        &self.diagnostics
    }
}

/// cpplint status noise that is not a finding
const CPPLINT_DONE_PREFIX: &str = "Done processing ";
const CPPLINT_CLEAN_TOTAL: &str = "Total errors found: 0";

impl OutputPolicy {
    /// Interpret a finished process. `exit_code` is `None` when the process
    /// was killed by a signal.
    pub fn interpret(self, exit_code: Option<i32>, stdout: &str, stderr: &str) -> Outcome {
        let exit_ok = exit_code == Some(0);
        match self {
            OutputPolicy::Cpplint => {
                let findings: Vec<&str> = stderr
                    .split(['\r', '\n'])
                    .filter(|line| {
                        !line.is_empty()
                            && !line.starts_with(CPPLINT_DONE_PREFIX)
                            && *line != CPPLINT_CLEAN_TOTAL
                    })
                    .collect();
                Outcome::new(exit_ok, findings.join("\n"))
            }
            OutputPolicy::Quiet => {
                if stdout.is_empty() && stderr.is_empty() {
                    Outcome::new(exit_ok, String::new())
                } else {
                    // Any output is a finding, even whitespace
                    let joined = [stdout, stderr]
                        .iter()
                        .filter(|s| !s.is_empty())
                        .copied()
                        .collect::<Vec<_>>()
                        .join("\n");
                    Outcome::new(false, joined)
                }
            }
            OutputPolicy::ExitStatus => {
                if exit_ok {
                    Outcome::passed()
                } else {
                    Outcome::new(false, stdout.to_string())
                }
            }
        }
    }
}

impl std::fmt::Display for OutputPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OutputPolicy::Cpplint => "cpplint",
            OutputPolicy::Quiet => "quiet",
            OutputPolicy::ExitStatus => "exit-status",
        };
        f.write_str(name)
    }
}
