//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// chatmate - Install and manage chat mode artifacts for your editor
#[derive(Parser, Debug)]
#[command(name = "chatmate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory to read artifacts from instead of the built-in set
    #[arg(long, global = true, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Destination directory instead of the editor's prompts directory
    #[arg(long, global = true, value_name = "DIR")]
    pub prompts_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Install artifacts into the prompts directory
    ///
    /// With no names every available artifact is installed. Names match
    /// case-insensitively on any part of the artifact name; a name matching
    /// several artifacts installs all of them.
    ///
    /// Examples:
    ///   chatmate install                 # Install everything
    ///   chatmate install "Solve Issue"   # Install one artifact
    ///   chatmate install review --force  # Reinstall every *review* artifact
    Install {
        /// Artifact names to install
        names: Vec<String>,

        /// Overwrite artifacts that are already installed
        #[arg(short, long)]
        force: bool,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove installed artifacts
    ///
    /// With no names every installed artifact that is also available is
    /// removed. Installed files with no available counterpart are kept; use
    /// 'chatmate cleanup' to remove those.
    Uninstall {
        /// Artifact names to uninstall
        names: Vec<String>,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove installed artifacts that are no longer available
    Cleanup {
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// List available and installed artifacts
    List {
        /// Only show available artifacts
        #[arg(short, long)]
        available: bool,

        /// Only show installed artifacts
        #[arg(short, long)]
        installed: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show counts of available, installed and orphaned artifacts
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved source and destination
    Paths,
}
