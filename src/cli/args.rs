//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};
use clap_complete::Shell;

/// Bulk rewriter for the legacy treatments dropdown navigation
#[derive(Parser, Debug)]
#[command(name = "renav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity, repeat for more detail (-d: info, -dd: debug, -ddd: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace the legacy dropdown in every HTML file under the root
    ///
    /// Files that fail to read or write are skipped and counted; the
    /// remaining tree is still processed and the exit code is non-zero.
    Run {
        /// Site output directory, scanned recursively
        #[arg(value_hint = ValueHint::DirPath, env = "RENAV_ROOT", default_value = "public")]
        root: PathBuf,

        /// Report what would change without writing anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
}
