use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::rules::detect::{PackageLookup, ProcessLookup};
use crate::rules::tables;

/// The frozen exemption set. Assembled once before the walk begins;
/// membership is an exact-match lookup, O(1) per candidate. All prefix
/// and glob semantics were resolved at assembly time.
#[derive(Debug)]
pub struct Exemptions {
    paths: HashSet<PathBuf>,
}

impl Exemptions {
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Collects exemption rules from every source, then expands and
/// freezes them. Two rule kinds are kept apart until `build()`:
/// literal paths go straight into the set, patterns are glob-expanded
/// against the live filesystem exactly once.
///
/// Which sources get added is the caller's choice; in strict mode only
/// caller-supplied rules are fed in.
#[derive(Debug, Default)]
pub struct ExemptionsBuilder {
    literals: Vec<PathBuf>,
    patterns: Vec<String>,
}

impl ExemptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one rule, dispatching on kind: anything with glob
    /// metacharacters is a pattern, the rest are literals.
    pub fn add_rule(&mut self, rule: &str) -> &mut Self {
        let rule = rule.trim();
        if rule.is_empty() {
            return self;
        }
        if rule.contains(['*', '?', '[']) {
            self.patterns.push(rule.to_string());
        } else {
            self.literals.push(PathBuf::from(rule));
        }
        self
    }

    fn add_rules<'a>(&mut self, rules: impl IntoIterator<Item = &'a str>) -> &mut Self {
        for rule in rules {
            self.add_rule(rule);
        }
        self
    }

    /// The fixed whitelist of standard dynamic system files.
    pub fn static_rules(&mut self) -> &mut Self {
        self.add_rules(tables::STATIC_RULES.iter().copied())
    }

    /// Per-package and grouped rules for whatever is installed.
    pub fn package_rules(&mut self, packages: &dyn PackageLookup) -> &mut Self {
        for (pkg, rules) in tables::PACKAGE_RULES {
            if packages.installed(pkg) {
                debug!(package = %pkg, rules = rules.len(), "package rules active");
                self.add_rules(rules.iter().copied());
            }
        }
        for (group, rules) in tables::GROUP_RULES {
            if group.iter().any(|pkg| packages.installed(pkg)) {
                self.add_rules(rules.iter().copied());
            }
        }
        self
    }

    /// Init-system rules: the systemd branch when it is running, the
    /// fallback branch otherwise. Exactly one branch applies.
    pub fn process_rules(&mut self, processes: &dyn ProcessLookup) -> &mut Self {
        let branch = if processes.running(tables::INIT_PROCESS) {
            tables::SYSTEMD_RULES
        } else {
            tables::NO_SYSTEMD_RULES
        };
        self.add_rules(branch.iter().copied())
    }

    /// Runtime-state directories collected from `dir` manifest records
    /// during the VDB scan.
    pub fn runtime_dirs(&mut self, dirs: impl IntoIterator<Item = PathBuf>) -> &mut Self {
        self.literals.extend(dirs);
        self
    }

    /// Caller-supplied rules from flags or an exclude file.
    pub fn user_rules<'a>(&mut self, rules: impl IntoIterator<Item = &'a str>) -> &mut Self {
        self.add_rules(rules)
    }

    /// Expand every pattern against the live filesystem and freeze one
    /// flat set. Nothing mutates the result afterwards.
    pub fn build(&self) -> Exemptions {
        let mut paths: HashSet<PathBuf> = self.literals.iter().cloned().collect();

        for pattern in &self.patterns {
            match glob::glob(pattern) {
                Ok(entries) => paths.extend(entries.filter_map(|e| e.ok())),
                Err(e) => debug!(pattern = %pattern, error = %e, "skipping invalid pattern"),
            }
        }

        debug!(
            literals = self.literals.len(),
            patterns = self.patterns.len(),
            expanded = paths.len(),
            "exemption set frozen"
        );

        Exemptions { paths }
    }
}
