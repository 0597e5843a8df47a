//! List command implementation

use colored::Colorize;

use super::Context;
use crate::error::Result;

/// Run the list command
///
/// With neither filter set both sections are shown.
pub fn run_list(context: &Context, available: bool, installed: bool, json: bool) -> Result<()> {
    let (show_available, show_installed) = if available || installed {
        (available, installed)
    } else {
        (true, true)
    };

    let engine = context.engine(false);
    let listing = engine.list(show_available, show_installed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if show_available {
        println!("{}", "Available Artifacts".bold());
        println!("{}: {}", "Source".dimmed(), engine.source_description());
        println!();
        if listing.available.is_empty() {
            println!("  {}", "None".dimmed());
        }
        for entry in &listing.available {
            let status = if entry.installed {
                "installed".green()
            } else {
                "not installed".dimmed()
            };
            println!("  {} ({})", entry.name.cyan(), status);
            if let Some(description) = &entry.description {
                println!("      {}", description.dimmed());
            }
        }
        println!();
        println!("{} available", listing.available.len());
    }

    if show_available && show_installed {
        println!();
    }

    if show_installed {
        println!("{}", "Installed Artifacts".bold());
        println!("{}: {}", "Destination".dimmed(), engine.destination().display());
        println!();
        if listing.installed.is_empty() {
            println!("  {} (use {} to add)", "None".dimmed(), "chatmate install".cyan());
        }
        for entry in &listing.installed {
            if entry.orphan {
                println!("  {} ({})", entry.name.cyan(), "not in source".yellow());
            } else {
                println!("  {}", entry.name.cyan());
            }
        }
        println!();
        println!("{} installed", listing.installed.len());
    }

    Ok(())
}
