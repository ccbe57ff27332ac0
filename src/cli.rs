//! Command-line interface definition.
//!
//! Lives in the library so the xtask crate can generate man pages from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Version line with build date and, for dev builds, the git SHA.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MEDIASYNC_BUILD_DATE"),
    ")"
);

fn long_version() -> String {
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if sha != "unknown" => {
            let short = sha.get(..7).unwrap_or(sha);
            format!("{} {}", LONG_VERSION, short)
        }
        _ => LONG_VERSION.to_string(),
    }
}

#[derive(Debug, Parser)]
#[command(name = "mediasync")]
#[command(about = "Replay and check video/timeline synchronization traces")]
#[command(version, long_version = long_version())]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a scenario step by step and show the resulting preview
    Replay(ReplayArgs),

    /// Run scenarios and report whether their expectations hold
    #[command(long_about = "Run scenarios and report whether their expectations hold.\n\n\
        Files are checked in parallel. Exits with status 1 if any expectation\n\
        fails or a file cannot be loaded.")]
    Check {
        /// Scenario files (.toml or .json)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Inspect or migrate the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Scenario file (.toml or .json)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the rendered preview after the step list
    #[arg(long)]
    pub no_preview: bool,

    /// Preview width in columns (default: terminal width)
    #[arg(long, value_name = "N")]
    pub width: Option<u16>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,

    /// Add missing fields to the configuration file
    Migrate {
        /// Apply without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}
