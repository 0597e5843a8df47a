//! Status command implementation

use colored::Colorize;

use super::Context;
use crate::error::Result;

/// Run the status command
pub fn run_status(context: &Context, json: bool) -> Result<()> {
    let status = context.engine(false).status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Chatmate Status".bold());
    println!();
    println!("{}:  {}", "Destination".dimmed(), status.destination.display());
    println!("{}:       {}", "Source".dimmed(), status.source);
    println!();
    println!("{}:    {}", "Available".dimmed(), status.available);
    println!("{}:    {}", "Installed".dimmed(), status.installed);
    println!("  {}:    {}", "up to date".green(), status.managed);
    println!("  {}:     {}", "orphaned".yellow(), status.orphaned);
    println!("{}:  {}", "Not installed".dimmed(), status.pending);

    if status.orphaned > 0 {
        println!();
        println!(
            "Run {} to remove orphaned artifacts.",
            "chatmate cleanup".cyan()
        );
    }
    Ok(())
}
