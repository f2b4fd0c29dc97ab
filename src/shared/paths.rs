//! Path utilities
//!
//! Lexical normalization, root-relative resolution and the set types shared by
//! the walker, the file filter and the changed-file resolver.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// A set of absolute, normalized paths
pub type PathSet = HashSet<PathBuf>;

/// Lexically normalize a path: drop `.` segments and fold `..` into its parent.
///
/// The filesystem is never consulted, so symlinks are left untouched.
pub fn normalize<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                ) && normalized.pop();
                if !popped && !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// Resolve `path` against `base` unless it is already absolute, then normalize
pub fn resolve<P: AsRef<Path>, B: AsRef<Path>>(base: B, path: P) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(base.as_ref().join(path))
    }
}

/// Check if a file has one of the given extensions (case-sensitive, without the dot)
pub fn has_extension<P: AsRef<Path>>(path: P, extensions: &[String]) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Build a [`PathSet`] from paths resolved against `base`
pub fn path_set<I, P, B>(base: B, paths: I) -> PathSet
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    B: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|path| resolve(base.as_ref(), path))
        .collect()
}

/// Pluralize "file" for a count
pub fn files_noun(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/repo/./a/../b"), PathBuf::from("/repo/b"));
        assert_eq!(
            normalize("/repo/src/../third_party/depot_tools/pylintrc"),
            PathBuf::from("/repo/third_party/depot_tools/pylintrc")
        );
        assert_eq!(normalize("/.."), PathBuf::from("/"));
        assert_eq!(normalize("../x"), PathBuf::from("../x"));
        assert_eq!(normalize("a/.."), PathBuf::from("."));
        assert_eq!(normalize("/repo/spec/"), PathBuf::from("/repo/spec"));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(resolve("/repo", "atom"), PathBuf::from("/repo/atom"));
        assert_eq!(resolve("/repo", "/elsewhere/x"), PathBuf::from("/elsewhere/x"));
        assert_eq!(resolve("/repo/script", "../lib"), PathBuf::from("/repo/lib"));
    }

    #[test]
    fn test_has_extension() {
        let exts = vec!["cc".to_string(), "h".to_string()];
        assert!(has_extension("/repo/a/x.h", &exts));
        assert!(has_extension("/repo/a/x.cc", &exts));
        assert!(!has_extension("/repo/a/x.hh", &exts));
        assert!(!has_extension("/repo/a/x.CC", &exts));
        assert!(!has_extension("/repo/a/Makefile", &exts));
    }

    #[test]
    fn test_path_set() {
        let set = path_set("/repo", ["a/gen.h", "/abs/b.h", "c/../d.h"]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(Path::new("/repo/a/gen.h")));
        assert!(set.contains(Path::new("/abs/b.h")));
        assert!(set.contains(Path::new("/repo/d.h")));
    }

    #[test]
    fn test_files_noun() {
        assert_eq!(files_noun(0), "files");
        assert_eq!(files_noun(1), "file");
        assert_eq!(files_noun(7), "files");
    }
}
