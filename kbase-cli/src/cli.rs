use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::knowledge::SortKey;

#[derive(Parser)]
#[command(name = "kbase", about = "Knowledge base listing and seed import", version, author)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List documents in the store
    List {
        /// Sort order (defaults to the configured default_sort)
        #[arg(long, short = 's', value_enum)]
        sort: Option<SortKey>,

        /// Only show documents in this category
        #[arg(long, short = 'c')]
        category: Option<String>,
    },

    /// Show the built-in seed catalog and which entries are already imported
    Catalog {
        /// Sort order (defaults to catalog order)
        #[arg(long, short = 's', value_enum)]
        sort: Option<SortKey>,
    },

    /// Import catalog documents that are not yet in the store
    Import {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Show what would be imported and stop
        #[arg(long, conflicts_with = "yes")]
        dry_run: bool,
    },

    /// List the available sort orders
    SortKeys,

    /// Show the effective configuration
    Config,
}
