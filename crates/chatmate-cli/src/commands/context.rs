//! Per-invocation configuration and engine construction

use std::path::PathBuf;

use chatmate_core::{ConfigResolver, EngineOptions, ReconciliationEngine, ResolvedConfig, Settings};

use crate::error::{CliError, Result};

/// Configuration resolved once per invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: ResolvedConfig,
}

impl Context {
    /// Resolve configuration with command-line flags as the top layer.
    pub fn resolve(source_dir: Option<PathBuf>, prompts_dir: Option<PathBuf>) -> Result<Self> {
        let config = ConfigResolver::new()
            .with_overrides(Settings {
                source_dir,
                prompts_dir,
            })
            .resolve()?;
        Self::from_config(config)
    }

    pub fn from_config(config: ResolvedConfig) -> Result<Self> {
        if config.prompts_dir.exists() && !config.prompts_dir.is_dir() {
            return Err(CliError::user(format!(
                "prompts directory {} exists but is not a directory",
                config.prompts_dir.display()
            )));
        }
        tracing::debug!(?config, "resolved configuration");
        Ok(Self { config })
    }

    /// Build an engine for one operation.
    pub fn engine(&self, dry_run: bool) -> ReconciliationEngine {
        ReconciliationEngine::from_config(&self.config).with_options(EngineOptions { dry_run })
    }
}
