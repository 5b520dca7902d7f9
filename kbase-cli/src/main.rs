mod cli;
mod commands;
mod config;
mod knowledge;
mod store;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use log::LevelFilter;

use crate::config::Config;

fn init_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::new();

    if cli.verbose > 0 {
        let level = match cli.verbose {
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        };
        builder.filter_module("kbase", level);
    } else if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    } else {
        builder.filter_level(LevelFilter::Warn);
    }

    builder.format_timestamp(None).init();
}

#[tokio::main]
async fn main() {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_logging(&cli);

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    log::debug!("Using {:?} backend, table '{}'", config.backend, config.table);

    match cli.command {
        Commands::List { sort, category } => {
            commands::list::run(&config, sort, category.as_deref()).await
        }
        Commands::Catalog { sort } => commands::catalog::run(&config, sort).await,
        Commands::Import { yes, dry_run } => commands::import::run(&config, yes, dry_run).await,
        Commands::SortKeys => {
            commands::sort_keys::run(config.default_sort);
            Ok(())
        }
        Commands::Config => commands::config_cmd::run(&config),
    }
}
