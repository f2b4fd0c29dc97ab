use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lazily walk every regular file below `root`.
///
/// Symlinks are followed and entries within a directory come back sorted by
/// file name, so the sequence is stable for a given tree. Each call starts a
/// fresh walk. Any I/O error (missing root, unreadable directory) is yielded
/// as an `Err` item; callers abort the walk on the first one.
pub fn walk_files(root: &Path) -> impl Iterator<Item = Result<PathBuf>> + use<> {
    let root_display = root.display().to_string();

    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(e) => Some(
                Err(e).with_context(|| format!("Failed to walk directory tree at {root_display}")),
            ),
        })
}

/// Collect the files below `root` accepted by `accepts`, failing on the first walk error
pub fn find_matching_files<F>(root: &Path, accepts: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    tracing::debug!("Walking {}", root.display());

    let mut matches = Vec::new();
    for path in walk_files(root) {
        let path = path?;
        if accepts(&path) {
            matches.push(path);
        }
    }

    tracing::trace!("{} matching files under {}", matches.len(), root.display());
    Ok(matches)
}
