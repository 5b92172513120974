use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// strayfiles — a package-aware stray file auditor for Gentoo/Portage
#[derive(Parser, Debug)]
#[command(
    name = "strayfiles",
    version,
    about = "Report files no installed package owns",
    long_about = "strayfiles walks the standard system trees and reports every file\n\
                  that no installed package owns and no exemption rule covers.\n\
                  It reads the Portage VDB, never writes to it, and removes files\n\
                  only when you confirm each one with --ask.",
    after_help = "EXAMPLES:\n  \
        strayfiles                              Audit the standard trees\n  \
        strayfiles -p /etc -p /opt              Audit only /etc and /opt\n  \
        strayfiles --strict                     Ignore all built-in exemptions\n  \
        strayfiles --verbose --human --age      Show age and readable sizes\n  \
        strayfiles -e '/srv/*' -E ~/.audit-ignore   Extra exemptions\n  \
        strayfiles --format json > report.json  Machine-readable report\n  \
        strayfiles --ask                        Confirm removal per file"
)]
pub struct Cli {
    /// Override the default target roots (repeatable)
    #[arg(short = 'p', long = "path", value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Package database root
    #[arg(long, value_name = "PATH")]
    pub vdb: Option<PathBuf>,

    /// Extra exemption paths/patterns (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "PATH")]
    pub exclude: Vec<String>,

    /// Read extra exemptions from a file, one per line, '#' comments
    #[arg(short = 'E', long = "exclude-from", value_name = "FILE")]
    pub exclude_from: Option<PathBuf>,

    /// Audit strictly against the package database, ignoring all
    /// built-in exemptions
    #[arg(long)]
    pub strict: bool,

    /// Show modification time and size per file
    #[arg(long)]
    pub verbose: bool,

    /// With --verbose, show the file's age instead of its mtime
    #[arg(long)]
    pub age: bool,

    /// Print sizes in human-readable form (e.g. 1.5 KB, 234 MB)
    #[arg(long)]
    pub human: bool,

    /// Prompt to remove each reported file
    #[arg(long)]
    pub ask: bool,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable engine debug logging
    #[arg(long)]
    pub debug: bool,

    /// Alternate config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<CompletionShell>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
