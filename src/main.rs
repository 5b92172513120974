use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use strayfiles::cli::args::{Cli, CompletionShell, OutputFormat};
use strayfiles::cli::output::{self, DisplayOpts};
use strayfiles::common::config::Config;
use strayfiles::common::errors::AuditError;
use strayfiles::rules::{ExemptionsBuilder, SystemProcesses, VdbPackages};
use strayfiles::scan::{AuditReport, Auditor, DEFAULT_ROOTS};
use strayfiles::vdb::{self, DEFAULT_VDB_ROOT};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        use clap::CommandFactory;
        let mut cmd = Cli::command();
        let shell = match shell {
            CompletionShell::Bash => clap_complete::Shell::Bash,
            CompletionShell::Zsh => clap_complete::Shell::Zsh,
            CompletionShell::Fish => clap_complete::Shell::Fish,
        };
        clap_complete::generate(shell, &mut cmd, "strayfiles", &mut std::io::stdout());
        return Ok(());
    }

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.debug {
        tracing_subscriber::fmt()
            .with_env_filter("strayfiles=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let config = Config::load(cli.config.as_deref())?;

    let vdb_root = cli
        .vdb
        .clone()
        .or_else(|| config.vdb.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_VDB_ROOT));

    let roots: Vec<PathBuf> = if !cli.paths.is_empty() {
        cli.paths.clone()
    } else if !config.roots.is_empty() {
        config.roots.clone()
    } else {
        DEFAULT_ROOTS.iter().map(PathBuf::from).collect()
    };

    // Spinner only on an interactive terminal, never in json/quiet
    let spinner = if matches!(cli.format, OutputFormat::Human) && std::io::stderr().is_terminal() {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("static spinner template"),
        );
        pb.set_message(format!(
            "Reading package database at {}...",
            vdb_root.display()
        ));
        pb.enable_steady_tick(Duration::from_millis(80));
        Some(pb)
    } else {
        None
    };

    let scanned = vdb::scan_vdb(&vdb_root);
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let scanned = scanned?;

    let mut builder = ExemptionsBuilder::new();
    if !cli.strict {
        let packages = VdbPackages::new(&vdb_root);
        let processes = SystemProcesses::snapshot();
        builder
            .static_rules()
            .package_rules(&packages)
            .process_rules(&processes)
            .runtime_dirs(scanned.runtime_dirs);
    }
    builder.user_rules(cli.exclude.iter().map(String::as_str));
    builder.user_rules(config.exclude.iter().map(String::as_str));
    if let Some(file) = &cli.exclude_from {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read exclude file: {}", file.display()))?;
        builder.user_rules(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );
    }
    let exemptions = builder.build();

    let collect_attrs = cli.verbose || matches!(cli.format, OutputFormat::Json);
    let auditor = Auditor::new(
        scanned.tracked,
        exemptions,
        roots.clone(),
        cli.strict,
        collect_attrs,
    );

    let opts = DisplayOpts {
        verbose: cli.verbose,
        age: cli.age,
        human: cli.human,
    };
    let mut report = AuditReport::new(vdb_root, roots, cli.strict);

    // Classification streams; the removal prompt for one file always
    // completes before the walk reads the next entry.
    for finding in auditor.findings() {
        if !finding.classification.is_reportable() {
            continue;
        }

        match cli.format {
            OutputFormat::Human => output::print_finding(&finding, &opts),
            OutputFormat::Quiet => output::print_finding_quiet(&finding),
            OutputFormat::Json => {}
        }

        if cli.ask && confirm_removal(&finding.path)? {
            match std::fs::remove_file(&finding.path) {
                Ok(()) => report.removed += 1,
                Err(e) => {
                    let err = AuditError::Removal {
                        path: finding.path.clone(),
                        source: e,
                    };
                    eprintln!("{} {}", "warning:".yellow().bold(), err);
                    report.removal_failures += 1;
                }
            }
        }

        report.record(finding);
    }

    match cli.format {
        OutputFormat::Json => output::print_json(&report)?,
        OutputFormat::Human if cli.verbose => output::print_summary(&report, cli.ask, cli.human),
        _ => {}
    }

    Ok(())
}

fn confirm_removal(path: &Path) -> Result<bool> {
    // Prompt on stderr so json/quiet stdout stays machine-readable
    eprint!("  Remove '{}'? [y/N] ", path.display());
    std::io::stderr().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(matches!(
        input.trim().to_lowercase().as_str(),
        "y" | "yes" | "true"
    ))
}
