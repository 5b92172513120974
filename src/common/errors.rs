use std::path::PathBuf;

use thiserror::Error;

/// Typed errors for the audit engine.
/// We use `anyhow` at the top level for CLI error handling,
/// but these typed errors let the engine be precise about failures.
///
/// Per-candidate attribute failures (permission denied on a stat, for
/// example) are deliberately not represented here: the file is still
/// reported by path and the missing fields are simply omitted.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The package database is missing, unreadable, or yielded no
    /// tracked paths at all. Auditing against nothing would report
    /// every file on disk as lost, so this aborts before any walk.
    #[error("package database at '{root}' is unusable: {reason}")]
    FatalSetup { root: PathBuf, reason: String },

    /// A CONTENTS line did not match any known record grammar.
    /// A partially-parsed database is untrustworthy for an audit,
    /// so this aborts rather than skipping the line.
    #[error("malformed CONTENTS line in '{file}': {line}")]
    ManifestFormat { file: PathBuf, line: String },

    /// Removing a reported file failed. Reported per item; the
    /// remaining walk continues.
    #[error("failed to remove '{path}': {source}")]
    Removal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
