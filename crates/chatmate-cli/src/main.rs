//! chatmate CLI
//!
//! Installs, removes and lists chat mode artifacts in the editor's prompts
//! directory.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::Context;
use error::Result;

fn main() {
    let cli = Cli::parse();

    // A second init only happens under test harnesses
    let _ = chatmate_core::logging::init(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        println!("{} Chat mode manager", "chatmate".green().bold());
        println!();
        println!("Run {} for available commands.", "chatmate --help".cyan());
        return Ok(());
    };

    let context = Context::resolve(cli.source_dir, cli.prompts_dir)?;
    execute_command(&context, command)
}

fn execute_command(context: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Install {
            names,
            force,
            dry_run,
        } => commands::run_install(context, &names, force, dry_run),
        Commands::Uninstall { names, dry_run } => {
            commands::run_uninstall(context, &names, dry_run)
        }
        Commands::Cleanup { dry_run } => commands::run_cleanup(context, dry_run),
        Commands::List {
            available,
            installed,
            json,
        } => commands::run_list(context, available, installed, json),
        Commands::Status { json } => commands::run_status(context, json),
        Commands::Paths => commands::run_paths(context),
    }
}
