pub mod reconcile;
pub mod walker;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::rules::Exemptions;
use crate::vdb::TrackedPaths;

pub use reconcile::{classify, Classification, Finding};
pub use walker::{walk_roots, WalkCandidate};

/// The standard trees audited when no roots are given.
pub const DEFAULT_ROOTS: &[&str] = &[
    "/bin", "/etc", "/lib", "/lib32", "/lib64", "/opt", "/sbin", "/usr", "/var",
];

/// One audit run: the frozen sets plus the walk parameters. The sets
/// never change once the auditor exists, so classification is stable
/// across the whole pass.
pub struct Auditor {
    tracked: TrackedPaths,
    exemptions: Exemptions,
    roots: Vec<PathBuf>,
    strict: bool,
    collect_attrs: bool,
}

impl Auditor {
    pub fn new(
        tracked: TrackedPaths,
        exemptions: Exemptions,
        roots: Vec<PathBuf>,
        strict: bool,
        collect_attrs: bool,
    ) -> Self {
        Self {
            tracked,
            exemptions,
            roots,
            strict,
            collect_attrs,
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Stream one finding per file entry under the roots. Lazy: each
    /// candidate is classified as it is pulled, so a caller can act on
    /// a finding (prompt, delete) before the walk touches the next
    /// entry. Pruning is disabled in strict mode.
    pub fn findings(&self) -> impl Iterator<Item = Finding> + '_ {
        walker::walk_roots(&self.roots, &self.exemptions, !self.strict).map(|candidate| {
            let classification = classify(&self.tracked, &self.exemptions, &candidate);
            let finding = Finding::new(&candidate, classification);
            if self.collect_attrs {
                finding.with_attributes(&candidate)
            } else {
                finding
            }
        })
    }
}

/// Complete audit result for the JSON report.
#[derive(Debug, Serialize)]
pub struct AuditReport {
    pub generated_at: DateTime<Utc>,
    pub vdb_root: PathBuf,
    pub roots: Vec<PathBuf>,
    pub strict: bool,
    /// Lost and broken-symlink findings only
    pub findings: Vec<Finding>,
    pub total_lost: usize,
    /// Bytes across lost files; broken symlinks contribute nothing
    pub total_size: u64,
    pub removed: usize,
    /// Removal attempts that failed; the walk continued past them
    pub removal_failures: usize,
}

impl AuditReport {
    pub fn new(vdb_root: PathBuf, roots: Vec<PathBuf>, strict: bool) -> Self {
        Self {
            generated_at: Utc::now(),
            vdb_root,
            roots,
            strict,
            findings: Vec::new(),
            total_lost: 0,
            total_size: 0,
            removed: 0,
            removal_failures: 0,
        }
    }

    pub fn record(&mut self, finding: Finding) {
        self.total_lost += 1;
        self.total_size += finding.size_bytes.unwrap_or(0);
        self.findings.push(finding);
    }
}
