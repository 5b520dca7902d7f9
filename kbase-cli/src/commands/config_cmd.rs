use anyhow::Result;
use colored::Colorize;

use crate::config::{Config, default_config_path};

pub fn run(config: &Config) -> Result<()> {
    match default_config_path() {
        Some(path) if path.exists() => println!("{} {}", "Config file:".dimmed(), path.display()),
        Some(path) => println!("{} {} (not present)", "Config file:".dimmed(), path.display()),
        None => println!("{} unavailable on this platform", "Config file:".dimmed()),
    }
    println!();
    print!("{}", config.to_display_toml()?);
    Ok(())
}
