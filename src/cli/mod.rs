//! Command-line interface for Augur

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};

use crate::models::IssueStatus;

/// Verbosity level for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Default)]
pub enum Verbosity {
    /// Quiet mode - only show errors
    Quiet = 0,

    /// Normal mode - show errors and warnings
    #[default]
    Normal = 1,

    /// Verbose mode - show errors, warnings, and info
    Verbose = 2,

    /// Debug mode - show everything including debug info
    Debug = 3,
}

impl From<u8> for Verbosity {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }
}

impl Verbosity {
    /// Default log filter for this verbosity; `RUST_LOG` takes precedence
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// How command results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Colored, human-readable text
    #[default]
    Pretty,

    /// Machine-readable JSON
    Json,
}

/// Augur - reading the omens in polyglot codebases
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "🔮 Augur - reading the omens in polyglot codebases",
    long_about = "Augur walks a project's source roots, measures every Go, TypeScript, JavaScript, Python and Rust file, delegates complexity and duplication analysis to external tools, turns the results into severity-ranked issues, and recommends which files most deserve refactoring."
)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v=verbose, -vv=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output unless there are errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Custom configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Scenario name (defaults to the root directory's name)
    #[arg(long, global = true)]
    pub scenario: Option<String>,

    /// Output format (pretty, json)
    #[arg(long, default_value = "pretty", global = true)]
    pub format: OutputFormat,
}

impl Cli {
    /// Effective verbosity from the -v and -q flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::from(self.verbose)
        }
    }
}

/// Commands that Augur can execute
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect languages and external tools
    Detect(DetectArgs),

    /// Scan a scenario and record metrics and issues
    Scan(ScanArgs),

    /// List recorded issues
    Issues(IssuesArgs),

    /// Change the status of a recorded issue
    SetStatus(SetStatusArgs),

    /// Recommend files to refactor
    #[command(visible_alias = "rec")]
    Recommend(RecommendArgs),

    /// Show scan history
    History(HistoryArgs),
}

/// Scenario root shared by every command
#[derive(Args, Debug, Clone)]
pub struct RootArg {
    /// Scenario root directory
    #[arg(name = "ROOT", default_value = ".")]
    pub root: PathBuf,
}

impl RootArg {
    pub fn path(&self) -> &Path {
        &self.root
    }
}

/// Arguments for the detect command
#[derive(Args, Debug)]
pub struct DetectArgs {
    #[command(flatten)]
    pub root: RootArg,
}

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub root: RootArg,

    /// Print results without writing to the store
    #[arg(long)]
    pub no_persist: bool,
}

/// Arguments for the issues command
#[derive(Args, Debug)]
pub struct IssuesArgs {
    #[command(flatten)]
    pub root: RootArg,

    /// Only show issues with this status (open, ignored, resolved)
    #[arg(long)]
    pub status: Option<IssueStatus>,
}

/// Arguments for the set-status command
#[derive(Args, Debug)]
pub struct SetStatusArgs {
    /// Issue id
    pub id: u64,

    /// New status (open, ignored, resolved)
    pub status: IssueStatus,

    #[command(flatten)]
    pub root: RootArg,
}

/// Arguments for the recommend command
#[derive(Args, Debug)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub root: RootArg,

    /// Maximum number of recommendations (0 = unlimited)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Sort key (complexity, length, duplication, priority, staleness)
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Skip files with fewer lines
    #[arg(long)]
    pub min_lines: Option<usize>,

    /// Skip files visited more often than this
    #[arg(long)]
    pub max_visits: Option<u32>,

    /// JSON file with visit signals per scenario
    #[arg(long)]
    pub visits: Option<PathBuf>,
}

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub root: RootArg,
}
