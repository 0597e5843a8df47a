//! Reconciliation engine for chatmate artifacts
//!
//! Keeps a destination directory (the editor's prompts directory) in step
//! with a source of `*.chatmode.md` artifacts:
//!
//! - **Sources**: an external directory or the table embedded at build time
//! - **Installed set**: whatever artifact files are in the destination now
//! - **ReconciliationEngine**: install, uninstall, orphan cleanup and listing
//! - **Configuration**: platform destination defaults plus config file,
//!   environment and flag overrides
//!
//! # Architecture
//!
//! ```text
//!                  chatmate-cli
//!                        |
//!                  chatmate-core
//!          (engine, sources, config, platform)
//!                        |
//!                   chatmate-fs
//!       (validation, confinement, atomic writes)
//! ```
//!
//! All file access goes through [`chatmate_fs::SafeStore`]; nothing in this
//! crate opens artifact files directly.
//!
//! # Example
//!
//! ```ignore
//! use chatmate_core::{ConfigResolver, ReconciliationEngine};
//!
//! let config = ConfigResolver::new().resolve()?;
//! let engine = ReconciliationEngine::from_config(&config);
//! let report = engine.install_all(false)?;
//! println!("{} changed", report.changes());
//! ```

pub mod artifact;
pub mod config;
pub mod engine;
pub mod error;
pub mod installed;
pub mod logging;
pub mod platform;
pub mod source;

pub use artifact::{Artifact, ArtifactSet, display_name, filename_for};
pub use config::{ConfigResolver, ResolvedConfig, Settings};
pub use engine::{
    AvailableEntry, EngineOptions, InstalledEntry, ItemReport, Listing, Operation,
    OperationReport, Outcome, ReconciliationEngine, RequestNote, Status,
};
pub use error::{Error, Result};
pub use installed::InstalledSet;
pub use platform::{Platform, PlatformEnv};
pub use source::{ArtifactSource, DirectorySource, EmbeddedSource, select_source};
