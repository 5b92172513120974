use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

use crate::rules::Exemptions;

/// One directory entry encountered during traversal.
#[derive(Debug, Clone)]
pub struct WalkCandidate {
    pub path: PathBuf,
    pub is_symlink: bool,
    /// Whether the path resolves to something that exists. Only
    /// meaningful for symlinks; a plain file trivially exists.
    pub target_exists: bool,
}

/// Walk a set of root directories top-down and yield every file entry
/// under them, symlinks included. Symlinked directories are never
/// followed; they come out as file entries.
///
/// With `prune` set, a subdirectory whose full path is exempted is
/// skipped whole: nothing beneath it is yielded or even read. Roots
/// themselves are never pruned. Entry order is whatever the underlying
/// storage returns, which is deterministic for a fixed filesystem
/// state.
pub fn walk_roots<'a>(
    roots: &'a [PathBuf],
    exemptions: &'a Exemptions,
    prune: bool,
) -> impl Iterator<Item = WalkCandidate> + 'a {
    roots.iter().flat_map(move |root| {
        WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| {
                if prune && entry.depth() > 0 && entry.file_type().is_dir() {
                    if exemptions.contains(entry.path()) {
                        debug!(dir = %entry.path().display(), "pruned exempt subtree");
                        return false;
                    }
                }
                true
            })
            .filter_map(|entry| entry.ok())
            .filter(|entry| !entry.file_type().is_dir())
            .map(|entry| {
                let is_symlink = entry.path_is_symlink();
                let target_exists = !is_symlink || entry.path().exists();
                WalkCandidate {
                    path: entry.into_path(),
                    is_symlink,
                    target_exists,
                }
            })
    })
}
