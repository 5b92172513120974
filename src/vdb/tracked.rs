use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::common::errors::AuditError;
use crate::vdb::contents;

/// The set of canonical absolute paths owned by any installed package.
/// Built once from the full VDB scan; immutable for the rest of the run.
#[derive(Debug)]
pub struct TrackedPaths(HashSet<PathBuf>);

impl TrackedPaths {
    pub fn contains(&self, path: &Path) -> bool {
        self.0.contains(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self(paths.into_iter().collect())
    }
}

/// Result of one full package database scan.
#[derive(Debug)]
pub struct VdbScan {
    pub tracked: TrackedPaths,
    /// Runtime-state directories discovered in `dir` records; fed to
    /// the exemption builder in non-strict mode.
    pub runtime_dirs: Vec<PathBuf>,
    /// Number of CONTENTS manifests parsed.
    pub packages: usize,
}

/// Scan the package database root for CONTENTS manifests and union
/// every manifest's canonical path set.
///
/// Fatal when the root is missing/unreadable or the union comes out
/// empty: an empty tracked set means the audit would report every file
/// on disk as lost, which is a broken database, not a clean system.
pub fn scan_vdb(root: &Path) -> Result<VdbScan, AuditError> {
    if !root.is_dir() {
        return Err(AuditError::FatalSetup {
            root: root.to_path_buf(),
            reason: "not a readable directory".into(),
        });
    }

    let mut tracked = HashSet::new();
    let mut runtime_dirs = Vec::new();
    let mut packages = 0usize;

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == "CONTENTS")
    {
        let path = entry.path();
        let text = std::fs::read_to_string(path).map_err(|e| AuditError::FatalSetup {
            root: root.to_path_buf(),
            reason: format!("cannot read '{}': {}", path.display(), e),
        })?;

        let manifest = contents::parse_contents(&text, path)?;
        debug!(
            manifest = %path.display(),
            paths = manifest.tracked.len(),
            "parsed CONTENTS"
        );

        tracked.extend(manifest.tracked);
        runtime_dirs.extend(manifest.runtime_dirs);
        packages += 1;
    }

    if tracked.is_empty() {
        return Err(AuditError::FatalSetup {
            root: root.to_path_buf(),
            reason: "no tracked files found".into(),
        });
    }

    debug!(packages, tracked = tracked.len(), "vdb scan complete");

    Ok(VdbScan {
        tracked: TrackedPaths(tracked),
        runtime_dirs,
        packages,
    })
}
