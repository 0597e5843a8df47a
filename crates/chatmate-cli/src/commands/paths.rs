//! Paths command implementation

use colored::Colorize;

use super::Context;
use crate::error::Result;

/// Print the resolved destination, source and config file.
pub fn run_paths(context: &Context) -> Result<()> {
    let config = &context.config;
    let engine = context.engine(false);

    println!("{}: {}", "Destination".dimmed(), config.prompts_dir.display());
    println!("{}:      {}", "Source".dimmed(), engine.source_description());
    match &config.config_file {
        Some(path) => println!("{}:      {}", "Config".dimmed(), path.display()),
        None => println!("{}:      {}", "Config".dimmed(), "none".dimmed()),
    }
    Ok(())
}
