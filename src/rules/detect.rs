use std::collections::HashSet;
use std::path::{Path, PathBuf};

use sysinfo::{ProcessesToUpdate, System};
use tracing::debug;

/// Answers "is this package installed?". Injected into the exemption
/// builder so tests can supply fakes instead of a real VDB.
pub trait PackageLookup {
    /// `pkg` is a `category/name` identifier.
    fn installed(&self, pkg: &str) -> bool;
}

/// Answers "is a process with this exact name running?".
pub trait ProcessLookup {
    fn running(&self, name: &str) -> bool;
}

/// Production package lookup: a package is installed when the VDB root
/// contains a directory `<category>/<name>-<version>` whose version
/// starts with a digit.
pub struct VdbPackages {
    root: PathBuf,
}

impl VdbPackages {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

impl PackageLookup for VdbPackages {
    fn installed(&self, pkg: &str) -> bool {
        let pattern = format!("{}/{}-[0-9]*", self.root.display(), pkg);
        glob::glob(&pattern)
            .map(|entries| entries.filter_map(|e| e.ok()).any(|p| p.is_dir()))
            .unwrap_or(false)
    }
}

/// Production process lookup: one snapshot of the live process table,
/// taken at construction. Name matching is exact.
pub struct SystemProcesses {
    names: HashSet<String>,
}

impl SystemProcesses {
    pub fn snapshot() -> Self {
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::All, true);
        let names: HashSet<String> = system
            .processes()
            .values()
            .map(|p| p.name().to_string_lossy().into_owned())
            .collect();
        debug!(processes = names.len(), "process table snapshot");
        Self { names }
    }
}

impl ProcessLookup for SystemProcesses {
    fn running(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}
