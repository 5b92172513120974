use anyhow::Result;
use colored::*;

use crate::common::format;
use crate::scan::{AuditReport, Classification, Finding};

/// How the human renderer decorates each finding line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayOpts {
    pub verbose: bool,
    pub age: bool,
    pub human: bool,
}

/// Print one finding as a human-readable line: the path, then with
/// --verbose the mtime (or age) and size columns. Attribute columns
/// are silently absent when the stat failed.
pub fn print_finding(finding: &Finding, opts: &DisplayOpts) {
    let mut line = finding.path.display().to_string();

    if opts.verbose {
        if let Some(modified) = finding.modified {
            let when = if opts.age {
                format::format_age(modified)
            } else {
                format::format_mtime(modified)
            };
            line.push_str(&format!(" {} {}", "|".dimmed(), when.cyan()));
        }
        if let Some(size) = finding.size_bytes {
            let size = if opts.human {
                format::format_size(size)
            } else {
                size.to_string()
            };
            line.push_str(&format!(" {} {}", "|".dimmed(), size));
        }
    }

    if finding.classification == Classification::BrokenSymlink {
        line.push_str(&format!(" {}", "*** broken symlink".yellow()));
    }

    println!("{}", line);
}

/// Print just the path, one per line.
pub fn print_finding_quiet(finding: &Finding) {
    println!("{}", finding.path.display());
}

/// Verbose summary block after the walk.
pub fn print_summary(report: &AuditReport, asked: bool, human: bool) {
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "Total lost: {}",
        format::format_count(report.total_lost).bold()
    );
    if asked {
        println!(
            "Total removed: {}",
            format::format_count(report.removed).bold()
        );
        if report.removal_failures > 0 {
            println!(
                "Failed removals: {}",
                format::format_count(report.removal_failures).red().bold()
            );
        }
    }
    let size = if human {
        format::format_size(report.total_size)
    } else {
        report.total_size.to_string()
    };
    println!("Total file size: {}", size.bold());
}

/// Full report as pretty JSON.
pub fn print_json(report: &AuditReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
