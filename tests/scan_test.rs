use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::os::unix::fs::symlink;
use std::path::PathBuf;

use tempfile::TempDir;

use strayfiles::common::errors::AuditError;
use strayfiles::rules::ExemptionsBuilder;
use strayfiles::scan::{classify, walk_roots, Auditor, Classification, WalkCandidate};
use strayfiles::vdb::{resolve, scan_vdb};

/// A throwaway system image: a fake VDB plus a fake root tree.
struct Fixture {
    _temp: TempDir,
    pub vdb: PathBuf,
    pub root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();
        let vdb = base.join("vdb");
        let root = base.join("root");
        fs::create_dir_all(&vdb).unwrap();
        fs::create_dir_all(&root).unwrap();
        Self {
            _temp: temp,
            vdb,
            root,
        }
    }

    fn add_manifest(&self, pkg: &str, contents: &str) {
        let dir = self.vdb.join(pkg);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("CONTENTS"), contents).unwrap();
    }

    fn add_file(&self, rel: &str) -> PathBuf {
        let path = self.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "x").unwrap();
        path
    }
}

fn classifications(auditor: &Auditor) -> BTreeMap<PathBuf, Classification> {
    auditor
        .findings()
        .map(|f| (f.path, f.classification))
        .collect()
}

fn lost_set(auditor: &Auditor) -> BTreeSet<PathBuf> {
    auditor
        .findings()
        .filter(|f| f.classification == Classification::Lost)
        .map(|f| f.path)
        .collect()
}

// ─── Core scenarios ──────────────────────────────────────────────────────────

#[test]
fn test_owned_vs_lost() {
    let fx = Fixture::new();
    let owned = fx.add_file("etc/foo.conf");
    let stray = fx.add_file("etc/bar.conf");
    fx.add_manifest(
        "app-misc/foo-1.0",
        &format!("obj {} abc123 1700000000\n", owned.display()),
    );

    let scan = scan_vdb(&fx.vdb).unwrap();
    let auditor = Auditor::new(
        scan.tracked,
        ExemptionsBuilder::new().build(),
        vec![fx.root.clone()],
        false,
        false,
    );

    let by_path = classifications(&auditor);
    assert_eq!(by_path[&owned], Classification::Owned);
    assert_eq!(by_path[&stray], Classification::Lost);
}

#[test]
fn test_exemption_pattern_beats_lost() {
    let fx = Fixture::new();
    let cert = fx.add_file("etc/ssl/cert.pem");
    fx.add_file("etc/tracked.conf");
    fx.add_manifest(
        "app-misc/foo-1.0",
        &format!(
            "obj {} abc123 1700000000\n",
            fx.root.join("etc/tracked.conf").display()
        ),
    );

    let scan = scan_vdb(&fx.vdb).unwrap();
    let mut builder = ExemptionsBuilder::new();
    builder.user_rules([format!("{}/etc/ssl/*", fx.root.display()).as_str()]);
    let auditor = Auditor::new(
        scan.tracked,
        builder.build(),
        vec![fx.root.clone()],
        false,
        false,
    );

    assert_eq!(classifications(&auditor)[&cert], Classification::Exempt);
}

#[test]
fn test_listed_broken_symlink_is_owned() {
    let fx = Fixture::new();
    let x = fx.root.join("etc/x");
    let y = fx.root.join("etc/y");
    fs::create_dir_all(fx.root.join("etc")).unwrap();
    symlink(&y, &x).unwrap(); // y never created
    fx.add_manifest(
        "app-misc/foo-1.0",
        &format!("sym {} -> {} 1700000000\n", x.display(), y.display()),
    );

    let scan = scan_vdb(&fx.vdb).unwrap();
    let auditor = Auditor::new(
        scan.tracked,
        ExemptionsBuilder::new().build(),
        vec![fx.root.clone()],
        false,
        false,
    );

    assert_eq!(classifications(&auditor)[&x], Classification::Owned);
}

#[test]
fn test_unlisted_broken_symlink_is_reported_broken() {
    let fx = Fixture::new();
    fx.add_file("etc/tracked.conf");
    fx.add_manifest(
        "app-misc/foo-1.0",
        &format!(
            "obj {} abc123 1700000000\n",
            fx.root.join("etc/tracked.conf").display()
        ),
    );
    let dangling = fx.root.join("etc/dangling");
    symlink(fx.root.join("etc/nothing"), &dangling).unwrap();

    let scan = scan_vdb(&fx.vdb).unwrap();
    let auditor = Auditor::new(
        scan.tracked,
        ExemptionsBuilder::new().build(),
        vec![fx.root.clone()],
        false,
        true,
    );

    let finding = auditor
        .findings()
        .find(|f| f.path == dangling)
        .expect("dangling symlink should be yielded");
    assert_eq!(finding.classification, Classification::BrokenSymlink);
    // Exempt from size/age accounting
    assert!(finding.size_bytes.is_none());
    assert!(finding.modified.is_none());
}

#[test]
fn test_empty_vdb_is_fatal_before_any_walk() {
    let fx = Fixture::new();
    fx.add_file("etc/anything.conf");
    let err = scan_vdb(&fx.vdb).unwrap_err();
    assert!(matches!(err, AuditError::FatalSetup { .. }));
}

// ─── Testable properties ─────────────────────────────────────────────────────

#[test]
fn test_soundness_tracked_on_disk_never_lost() {
    let fx = Fixture::new();
    let mut manifest = String::new();
    for rel in ["etc/a.conf", "usr/bin/tool", "usr/share/doc/readme"] {
        let path = fx.add_file(rel);
        manifest.push_str(&format!("obj {} abc123 1700000000\n", path.display()));
    }
    fx.add_manifest("app-misc/foo-1.0", &manifest);
    fx.add_file("etc/stray.conf");

    let scan = scan_vdb(&fx.vdb).unwrap();
    let auditor = Auditor::new(
        scan.tracked,
        ExemptionsBuilder::new().build(),
        vec![fx.root.clone()],
        false,
        false,
    );

    let lost = lost_set(&auditor);
    assert_eq!(lost, BTreeSet::from([fx.root.join("etc/stray.conf")]));
}

#[test]
fn test_idempotence_two_runs_identical() {
    let fx = Fixture::new();
    let tracked = fx.add_file("etc/a.conf");
    fx.add_file("etc/stray1.conf");
    fx.add_file("opt/stray2.bin");
    fx.add_manifest(
        "app-misc/foo-1.0",
        &format!("obj {} abc123 1700000000\n", tracked.display()),
    );

    let scan = scan_vdb(&fx.vdb).unwrap();
    let auditor = Auditor::new(
        scan.tracked,
        ExemptionsBuilder::new().build(),
        vec![fx.root.clone()],
        false,
        false,
    );

    assert_eq!(classifications(&auditor), classifications(&auditor));
}

#[test]
fn test_pruning_equivalence_for_fully_exempt_subtree() {
    let fx = Fixture::new();
    let tracked = fx.add_file("etc/a.conf");
    fx.add_file("var/cache/app/one");
    fx.add_file("var/cache/app/two");
    fx.add_file("etc/stray.conf");
    fx.add_manifest(
        "app-misc/foo-1.0",
        &format!("obj {} abc123 1700000000\n", tracked.display()),
    );

    // Rules cover the directory and everything beneath it
    let cache = fx.root.join("var/cache/app");
    let mut builder = ExemptionsBuilder::new();
    builder.user_rules([
        cache.to_str().unwrap(),
        format!("{}/*", cache.display()).as_str(),
    ]);
    let exemptions = builder.build();

    let scan = scan_vdb(&fx.vdb).unwrap();
    let tracked_set = scan.tracked;

    let pruned: BTreeSet<PathBuf> = walk_roots(std::slice::from_ref(&fx.root), &exemptions, true)
        .filter(|c| classify(&tracked_set, &exemptions, c) == Classification::Lost)
        .map(|c| c.path)
        .collect();
    let unpruned: BTreeSet<PathBuf> = walk_roots(std::slice::from_ref(&fx.root), &exemptions, false)
        .filter(|c| classify(&tracked_set, &exemptions, c) == Classification::Lost)
        .map(|c| c.path)
        .collect();

    assert_eq!(pruned, unpruned);
    assert_eq!(pruned, BTreeSet::from([fx.root.join("etc/stray.conf")]));
}

#[test]
fn test_symlink_transitivity() {
    // Manifest records the resolved form only; a candidate reached
    // through a symlinked directory must still be recognized as owned
    let fx = Fixture::new();
    let b = fx.root.join("b");
    fs::create_dir_all(&b).unwrap();
    fs::write(b.join("c"), "x").unwrap();
    symlink(&b, fx.root.join("a")).unwrap();
    fx.add_manifest(
        "app-misc/foo-1.0",
        &format!("obj {} abc123 1700000000\n", b.join("c").display()),
    );

    let scan = scan_vdb(&fx.vdb).unwrap();
    let exemptions = ExemptionsBuilder::new().build();
    let via_link = WalkCandidate {
        path: fx.root.join("a/c"),
        is_symlink: false,
        target_exists: true,
    };
    assert_eq!(
        classify(&scan.tracked, &exemptions, &via_link),
        Classification::Owned
    );
    assert_eq!(resolve(&fx.root.join("a/c")), resolve(&b.join("c")));
}

#[test]
fn test_strict_mode_surfaces_exempt_files_as_lost() {
    let fx = Fixture::new();
    let tracked = fx.add_file("etc/a.conf");
    let stray = fx.add_file("var/cache/app/one");
    fx.add_manifest(
        "app-misc/foo-1.0",
        &format!("obj {} abc123 1700000000\n", tracked.display()),
    );

    let scan = scan_vdb(&fx.vdb).unwrap();
    // Strict assembly: no built-in sources at all
    let auditor = Auditor::new(
        scan.tracked,
        ExemptionsBuilder::new().build(),
        vec![fx.root.clone()],
        true,
        false,
    );

    assert!(lost_set(&auditor).contains(&stray));
}

#[test]
fn test_user_exclude_still_applies_in_strict_mode() {
    let fx = Fixture::new();
    let tracked = fx.add_file("etc/a.conf");
    let kept = fx.add_file("srv/keep-me");
    fx.add_manifest(
        "app-misc/foo-1.0",
        &format!("obj {} abc123 1700000000\n", tracked.display()),
    );

    let scan = scan_vdb(&fx.vdb).unwrap();
    let mut builder = ExemptionsBuilder::new();
    builder.user_rules([kept.to_str().unwrap()]);
    let auditor = Auditor::new(
        scan.tracked,
        builder.build(),
        vec![fx.root.clone()],
        true,
        false,
    );

    assert_eq!(classifications(&auditor)[&kept], Classification::Exempt);
}

#[test]
fn test_runtime_state_dirs_pruned_in_default_mode() {
    let fx = Fixture::new();
    let tracked = fx.add_file("etc/a.conf");
    // A dir record under a runtime-state prefix; the dir's churning
    // contents are not individually listed
    let state_dir = fx.root.join("var/cache/appstate");
    fs::create_dir_all(&state_dir).unwrap();
    fs::write(state_dir.join("churn.tmp"), "x").unwrap();
    fx.add_manifest(
        "app-misc/foo-1.0",
        &format!(
            "obj {} abc123 1700000000\ndir /var/cache/appstate\n",
            tracked.display()
        ),
    );

    let scan = scan_vdb(&fx.vdb).unwrap();
    assert_eq!(scan.runtime_dirs, vec![PathBuf::from("/var/cache/appstate")]);

    // The fixture's own path for the state dir stands in for the
    // recorded one when building the exemptions
    let mut builder = ExemptionsBuilder::new();
    builder.runtime_dirs(vec![state_dir.clone()]);
    let auditor = Auditor::new(
        scan.tracked,
        builder.build(),
        vec![fx.root.clone()],
        false,
        false,
    );

    let paths: Vec<PathBuf> = auditor.findings().map(|f| f.path).collect();
    assert!(!paths.contains(&state_dir.join("churn.tmp")));
}

#[test]
fn test_attributes_collected_for_lost_files() {
    let fx = Fixture::new();
    let tracked = fx.add_file("etc/a.conf");
    let stray = fx.add_file("etc/stray.conf");
    fx.add_manifest(
        "app-misc/foo-1.0",
        &format!("obj {} abc123 1700000000\n", tracked.display()),
    );

    let scan = scan_vdb(&fx.vdb).unwrap();
    let auditor = Auditor::new(
        scan.tracked,
        ExemptionsBuilder::new().build(),
        vec![fx.root.clone()],
        false,
        true,
    );

    let finding = auditor.findings().find(|f| f.path == stray).unwrap();
    assert_eq!(finding.size_bytes, Some(1));
    assert!(finding.modified.is_some());
}

#[test]
fn test_unreadable_file_reported_without_attributes() {
    use std::os::unix::fs::PermissionsExt;

    let fx = Fixture::new();
    let tracked = fx.add_file("etc/a.conf");
    let stray = fx.add_file("etc/locked/secret.conf");
    fx.add_manifest(
        "app-misc/foo-1.0",
        &format!("obj {} abc123 1700000000\n", tracked.display()),
    );

    let scan = scan_vdb(&fx.vdb).unwrap();

    // Drop the execute bit so the child can no longer be stat'd. Root
    // bypasses permission checks, so only assert degradation when the
    // OS actually denied the stat.
    let locked = fx.root.join("etc/locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
    let denied = fs::metadata(&stray).is_err();

    let auditor = Auditor::new(
        scan.tracked,
        ExemptionsBuilder::new().build(),
        vec![fx.root.clone()],
        false,
        true,
    );
    let finding = auditor.findings().find(|f| f.path == stray);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if denied {
        let finding = finding.expect("unreadable file must still be reported");
        assert_eq!(finding.classification, Classification::Lost);
        assert!(finding.size_bytes.is_none());
        assert!(finding.modified.is_none());
    }
}

#[test]
fn test_multiple_roots_processed_independently() {
    let fx = Fixture::new();
    let tracked = fx.add_file("etc/a.conf");
    let stray_etc = fx.add_file("etc/stray.conf");
    let stray_opt = fx.add_file("opt/stray.bin");
    fx.add_manifest(
        "app-misc/foo-1.0",
        &format!("obj {} abc123 1700000000\n", tracked.display()),
    );

    let scan = scan_vdb(&fx.vdb).unwrap();
    let auditor = Auditor::new(
        scan.tracked,
        ExemptionsBuilder::new().build(),
        vec![fx.root.join("etc"), fx.root.join("opt")],
        false,
        false,
    );

    let lost = lost_set(&auditor);
    assert_eq!(lost, BTreeSet::from([stray_etc, stray_opt]));
    assert!(!lost.contains(&tracked));
}
