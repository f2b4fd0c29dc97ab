//! Console output for polylint
//!
//! Plain status lines on stdout, linter diagnostics on stderr. Diagnostics
//! are printed even in quiet mode.

use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Announce a linter run: `linting N <language> file(s)`
    pub fn announce(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Pass a failing linter's diagnostics through untouched
    pub fn diagnostics(&self, text: &str) {
        let text = text.trim_end();
        if !text.is_empty() {
            eprintln!("{text}");
        }
    }

    /// Print a step in a process
    pub fn step(&self, step: &str) {
        if !self.quiet {
            println!("{} {}", style("❯").cyan(), step);
        }
    }

    /// Print a table row
    pub fn table_row(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {:<12} {}", style(key).dim(), value);
        }
    }
}
