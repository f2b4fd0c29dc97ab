use anyhow::{Context, Result, bail};
use std::path::Path;
use tokio::process::Command;

use crate::shared::paths::{PathSet, resolve};

/// Files in the working tree that differ from `HEAD`, as absolute paths under `top`.
///
/// A failing `git diff` is fatal for the whole run; there is no retry.
pub async fn find_changed_files(top: &Path) -> Result<PathSet> {
    tracing::debug!("Querying changed files in {}", top.display());

    // Unquoted paths so non-ASCII names match the walked files
    let output = Command::new("git")
        .args(["-c", "core.quotePath=false", "diff", "HEAD", "--name-only"])
        .current_dir(top)
        .output()
        .await
        .context("Failed to find changed files: could not execute git diff HEAD --name-only")?;

    if !output.status.success() {
        bail!(
            "Failed to find changed files: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let stdout = String::from_utf8(output.stdout).context("Git output is not valid UTF-8")?;
    let changed = parse_name_only(&stdout, top);

    tracing::info!("{} changed files", changed.len());
    Ok(changed)
}

/// Parse `git diff --name-only` output into absolute paths under `top`.
///
/// Accepts `\n`, `\r\n` and bare `\r` line endings and skips blank lines.
pub fn parse_name_only(stdout: &str, top: &Path) -> PathSet {
    stdout
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .map(|line| resolve(top, line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_parse_name_only() {
        let changed = parse_name_only("a/x.js\nb/y.js\n", Path::new("/repo"));
        let expected: PathSet = [PathBuf::from("/repo/a/x.js"), PathBuf::from("/repo/b/y.js")]
            .into_iter()
            .collect();
        assert_eq!(changed, expected);
    }

    #[test]
    fn test_parse_name_only_line_endings() {
        let changed = parse_name_only("a.py\r\nb.py\rc.py\nd.py", Path::new("/repo"));
        assert_eq!(changed.len(), 4);
        assert!(changed.contains(Path::new("/repo/c.py")));
        assert!(changed.contains(Path::new("/repo/d.py")));
    }

    #[test]
    fn test_parse_name_only_empty() {
        assert!(parse_name_only("", Path::new("/repo")).is_empty());
        assert!(parse_name_only("\n", Path::new("/repo")).is_empty());
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = std::process::Command::new("git")
            .args(args)
            .current_dir(dir)
            .env("GIT_AUTHOR_NAME", "test")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    #[tokio::test]
    async fn test_find_changed_files_in_repository() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let top = temp_dir.path();
        fs::create_dir_all(top.join("lib"))?;
        fs::write(top.join("lib/a.js"), "1\n")?;
        fs::write(top.join("lib/b.js"), "1\n")?;
        git(top, &["init", "-q"]);
        git(top, &["add", "."]);
        git(top, &["commit", "-q", "-m", "initial"]);

        assert!(find_changed_files(top).await?.is_empty());

        fs::write(top.join("lib/b.js"), "2\n")?;
        let changed = find_changed_files(top).await?;
        assert_eq!(changed.len(), 1);
        assert!(changed.contains(&top.join("lib/b.js")));
        Ok(())
    }

    #[tokio::test]
    async fn test_find_changed_files_keeps_non_ascii_names() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let top = temp_dir.path();
        fs::create_dir_all(top.join("atom"))?;
        fs::write(top.join("atom/\u{e9}t\u{e9}.h"), "1\n")?;
        git(top, &["init", "-q"]);
        git(top, &["add", "."]);
        git(top, &["commit", "-q", "-m", "initial"]);

        fs::write(top.join("atom/\u{e9}t\u{e9}.h"), "2\n")?;
        let changed = find_changed_files(top).await?;
        assert!(changed.contains(&top.join("atom/\u{e9}t\u{e9}.h")), "{changed:?}");
        Ok(())
    }

    #[tokio::test]
    async fn test_find_changed_files_fails_without_head() {
        let temp_dir = TempDir::new().unwrap();
        git(temp_dir.path(), &["init", "-q"]);

        let err = find_changed_files(temp_dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to find changed files"));
    }
}
