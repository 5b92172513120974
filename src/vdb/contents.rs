use std::path::{Path, PathBuf};

use crate::common::errors::AuditError;
use crate::rules::tables::AUTO_EXEMPT_PREFIXES;

/// One line of a package's CONTENTS manifest.
///
/// The md5/mtime fields are part of the on-disk format but unused by
/// reconciliation; they are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentsEntry {
    /// `dir <path>`
    Dir { path: PathBuf },

    /// `obj <path> <md5> <mtime>`
    Obj {
        path: PathBuf,
        md5: String,
        mtime: String,
    },

    /// `sym <origin> -> <target> <mtime>` — target already made
    /// absolute (joined with origin's parent when relative)
    Sym {
        origin: PathBuf,
        target: PathBuf,
        mtime: String,
    },
}

/// Everything one manifest asserts: the canonical paths it owns plus
/// any `dir` entries that fall under a runtime-state prefix and so
/// become standing exemption candidates. Returned to the caller;
/// parsing mutates no shared state.
#[derive(Debug, Default)]
pub struct ManifestPaths {
    pub tracked: Vec<PathBuf>,
    pub runtime_dirs: Vec<PathBuf>,
}

/// Follow filesystem symlinks to the real path when the path exists;
/// a path that does not exist resolves to itself, so broken symlinks
/// still contribute their literal path.
pub fn resolve(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

impl ContentsEntry {
    /// Parse one CONTENTS line. `file` is only used for error context.
    pub fn parse(line: &str, file: &Path) -> Result<Self, AuditError> {
        let malformed = || AuditError::ManifestFormat {
            file: file.to_path_buf(),
            line: line.to_string(),
        };

        let (tag, rest) = line.split_once(' ').ok_or_else(malformed)?;
        match tag {
            "dir" => Ok(ContentsEntry::Dir {
                path: PathBuf::from(rest),
            }),
            "obj" => {
                // Split two fields off the right so paths with spaces survive
                let mut fields = rest.rsplitn(3, ' ');
                let mtime = fields.next().ok_or_else(malformed)?;
                let md5 = fields.next().ok_or_else(malformed)?;
                let path = fields.next().ok_or_else(malformed)?;
                Ok(ContentsEntry::Obj {
                    path: PathBuf::from(path),
                    md5: md5.to_string(),
                    mtime: mtime.to_string(),
                })
            }
            "sym" => {
                let (origin, rhs) = rest.split_once(" -> ").ok_or_else(malformed)?;
                let (target, mtime) = rhs.rsplit_once(' ').unwrap_or((rhs, ""));
                let origin = PathBuf::from(origin);
                let target = if target.starts_with('/') {
                    PathBuf::from(target)
                } else {
                    origin
                        .parent()
                        .unwrap_or_else(|| Path::new("/"))
                        .join(target)
                };
                Ok(ContentsEntry::Sym {
                    origin,
                    target,
                    mtime: mtime.to_string(),
                })
            }
            // Silently dropping an unknown record would cause a false
            // "lost" report later, so it is fatal.
            _ => Err(malformed()),
        }
    }

    /// The canonical forms this entry asserts ownership over.
    pub fn canonical_paths(&self) -> Vec<PathBuf> {
        match self {
            ContentsEntry::Dir { path } => vec![path.clone(), resolve(path)],
            ContentsEntry::Obj { path, .. } => vec![resolve(path)],
            ContentsEntry::Sym { origin, target, .. } => {
                vec![resolve(origin), resolve(target)]
            }
        }
    }
}

/// Parse the lines of one package's CONTENTS manifest into the set of
/// canonical paths it owns. Blank lines are skipped; any line that
/// matches no known record grammar aborts with a format error.
pub fn parse_contents(text: &str, file: &Path) -> Result<ManifestPaths, AuditError> {
    let mut paths = ManifestPaths::default();

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let entry = ContentsEntry::parse(line, file)?;

        if let ContentsEntry::Dir { path } = &entry {
            // Contents of runtime-state directories churn constantly;
            // ownership is tracked at the directory level only, so the
            // directory itself becomes a standing exemption.
            if AUTO_EXEMPT_PREFIXES
                .iter()
                .any(|prefix| path.to_string_lossy().starts_with(prefix))
            {
                paths.runtime_dirs.push(path.clone());
            }
        }

        paths.tracked.extend(entry.canonical_paths());
    }

    Ok(paths)
}
