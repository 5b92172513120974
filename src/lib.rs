//! # strayfiles
//!
//! A package-aware stray file auditor for Gentoo/Portage systems.
//!
//! strayfiles walks the standard system trees and reports every file that
//! no installed package owns and no exemption rule covers. It features:
//!
//! - **Manifest-Exact Ownership**: parses every package's `CONTENTS` record,
//!   symlink-resolved, before the walk starts
//! - **Layered Exemptions**: built-in system paths, per-package rules that
//!   activate only when the package is installed, init-system rules that
//!   follow the running process table, and your own exclude list
//! - **Pruned Walking**: exempted directories are skipped whole, so scanning
//!   `/usr` stays cheap
//! - **Strict Mode**: audit against the package database alone, ignoring all
//!   built-in exemptions
//! - **CLI as Unix Citizen**: JSON output, pipe-friendly, cron-schedulable
//! - **Report, Not Destroy**: removal happens only per file, only when asked

pub mod cli;
pub mod common;
pub mod rules;
pub mod scan;
pub mod vdb;
