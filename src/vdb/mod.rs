pub mod contents;
pub mod tracked;

pub use contents::{resolve, ContentsEntry, ManifestPaths};
pub use tracked::{scan_vdb, TrackedPaths, VdbScan};

/// Where Portage records installed packages.
pub const DEFAULT_VDB_ROOT: &str = "/var/db/pkg";
