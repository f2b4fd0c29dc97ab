use anyhow::Result;
use std::path::{Path, PathBuf};

use super::walker::find_matching_files;
use crate::shared::paths::PathSet;

/// Changed-files restriction applied after blacklist removal
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChangeFilter {
    /// Changed-files mode is off: nothing is filtered
    #[default]
    Inactive,
    /// Changed-files mode is on but nothing changed: every linter is skipped
    ActiveEmpty,
    /// Changed-files mode is on: only these paths survive
    Active(PathSet),
}

impl ChangeFilter {
    /// Build the filter for changed-files mode from the resolved change set
    pub fn from_changed(changed: PathSet) -> Self {
        if changed.is_empty() {
            ChangeFilter::ActiveEmpty
        } else {
            ChangeFilter::Active(changed)
        }
    }

    fn admits(&self, path: &Path) -> bool {
        match self {
            ChangeFilter::Inactive => true,
            ChangeFilter::ActiveEmpty => false,
            ChangeFilter::Active(changed) => changed.contains(path),
        }
    }
}

/// Compute the files one linter should see.
///
/// Roots are walked in order and their matches concatenated (roots are
/// expected to be disjoint), blacklisted paths are removed, then the change
/// filter is applied. With [`ChangeFilter::ActiveEmpty`] no walk happens at all.
pub fn filter_files<F>(
    roots: &[PathBuf],
    accepts: F,
    blacklist: &PathSet,
    change_filter: &ChangeFilter,
) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    if *change_filter == ChangeFilter::ActiveEmpty {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for root in roots {
        files.extend(find_matching_files(root, &accepts)?);
    }
    let found = files.len();

    files.retain(|path| !blacklist.contains(path) && change_filter.admits(path));

    tracing::debug!(
        "{} of {} candidate files kept after blacklist and change filtering",
        files.len(),
        found
    );
    Ok(files)
}
