use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::rules::Exemptions;
use crate::scan::walker::WalkCandidate;
use crate::vdb::{resolve, TrackedPaths};

/// Verdict for one filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Some installed package owns this path
    Owned,
    /// An exemption rule covers this path
    Exempt,
    /// Neither tracked nor exempted — the audit's primary output
    Lost,
    /// An untracked symlink whose target no longer exists
    BrokenSymlink,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Owned => write!(f, "owned"),
            Classification::Exempt => write!(f, "exempt"),
            Classification::Lost => write!(f, "lost"),
            Classification::BrokenSymlink => write!(f, "broken symlink"),
        }
    }
}

impl Classification {
    /// Lost and broken-symlink entries are what the audit reports.
    pub fn is_reportable(self) -> bool {
        matches!(self, Classification::Lost | Classification::BrokenSymlink)
    }
}

/// Classify one candidate against the frozen sets. Pure: reads the
/// sets, mutates nothing.
///
/// Ownership considers both the literal path and its resolved form, so
/// a file reached through a symlinked directory is recognized even
/// when the manifest recorded only the resolved form.
pub fn classify(
    tracked: &TrackedPaths,
    exemptions: &Exemptions,
    candidate: &WalkCandidate,
) -> Classification {
    let resolved = resolve(&candidate.path);
    if tracked.contains(&candidate.path) || tracked.contains(&resolved) {
        return Classification::Owned;
    }
    if exemptions.contains(&candidate.path) || is_marker_file(&candidate.path) {
        return Classification::Exempt;
    }
    if candidate.is_symlink && !candidate.target_exists {
        return Classification::BrokenSymlink;
    }
    Classification::Lost
}

/// Special-case filenames that are exempt in every mode: `.keep`
/// directory markers, and compiled bytecode inside a `__pycache__`
/// directory.
fn is_marker_file(path: &Path) -> bool {
    if path.file_stem().is_some_and(|stem| stem == ".keep") {
        return true;
    }
    path.extension().is_some_and(|ext| ext == "pyc")
        && path
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|dir| dir == "__pycache__")
}

/// One reported entry, ready for the output layer. The attribute
/// fields stay `None` when unrequested or unreadable; an unreadable
/// file is still reported by path.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub path: PathBuf,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

impl Finding {
    pub fn new(candidate: &WalkCandidate, classification: Classification) -> Self {
        Self {
            path: candidate.path.clone(),
            classification,
            size_bytes: None,
            modified: None,
        }
    }

    /// Attach size and mtime, degrading gracefully: attribute errors
    /// leave the fields unset and never interrupt the scan. Symlinks
    /// carry no size (a broken target's size is undefined, and a link
    /// target's size is the target's business).
    pub fn with_attributes(mut self, candidate: &WalkCandidate) -> Self {
        if !candidate.target_exists {
            return self;
        }
        if let Ok(metadata) = std::fs::metadata(&candidate.path) {
            self.modified = metadata.modified().ok().map(DateTime::<Utc>::from);
            if !candidate.is_symlink {
                self.size_bytes = Some(metadata.len());
            }
        }
        self
    }
}
