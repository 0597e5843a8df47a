//! Configuration resolution with layered overrides
//!
//! Sources, later wins:
//! 1. Built-in defaults (platform prompts directory, `chatmodes/` beside the
//!    executable)
//! 2. User config file `<config_dir>/chatmate/config.{toml,json,yaml,yml}`
//! 3. Environment: `CHATMATE_SOURCE_DIR`, `CHATMATE_PROMPTS_DIR`
//! 4. Explicit overrides (command-line flags)

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;

use chatmate_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::platform::{self, Platform, PlatformEnv};

/// Environment variable naming the external artifact directory.
pub const ENV_SOURCE_DIR: &str = "CHATMATE_SOURCE_DIR";

/// Environment variable overriding the destination directory.
pub const ENV_PROMPTS_DIR: &str = "CHATMATE_PROMPTS_DIR";

const CONFIG_FILE_NAMES: &[&str] = &["config.toml", "config.json", "config.yaml", "config.yml"];

/// Default external artifact directory name, looked up beside the executable.
pub const DEFAULT_SOURCE_DIR_NAME: &str = "chatmodes";

/// One layer of settings. Unset fields defer to lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub source_dir: Option<PathBuf>,
    pub prompts_dir: Option<PathBuf>,
}

impl Settings {
    /// Overlay `other` on top of `self`.
    pub fn merge(&mut self, other: Settings) {
        if other.source_dir.is_some() {
            self.source_dir = other.source_dir;
        }
        if other.prompts_dir.is_some() {
            self.prompts_dir = other.prompts_dir;
        }
    }
}

/// Effective configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    /// External artifact directory candidate. May not exist; the engine
    /// falls back to the embedded table in that case.
    pub source_dir: Option<PathBuf>,
    /// Whether `source_dir` was configured rather than defaulted.
    pub source_dir_explicit: bool,
    /// Destination directory.
    pub prompts_dir: PathBuf,
    /// Config file that contributed, if any.
    pub config_file: Option<PathBuf>,
}

/// Resolves [`ResolvedConfig`] from the layered sources.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    config_dir_override: Option<PathBuf>,
    platform: Platform,
    platform_env: PlatformEnv,
    environment: HashMap<String, OsString>,
    overrides: Settings,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// Resolver reading the real process environment.
    pub fn new() -> Self {
        let environment = [ENV_SOURCE_DIR, ENV_PROMPTS_DIR]
            .into_iter()
            .filter_map(|key| std::env::var_os(key).map(|value| (key.to_string(), value)))
            .collect();
        Self {
            config_dir_override: None,
            platform: Platform::current(),
            platform_env: PlatformEnv::from_process(),
            environment,
            overrides: Settings::default(),
        }
    }

    /// Use `dir` instead of `<config_dir>/chatmate` for the config file.
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir_override = Some(dir.into());
        self
    }

    /// Replace the platform and its environment inputs.
    pub fn with_platform(mut self, platform: Platform, env: PlatformEnv) -> Self {
        self.platform = platform;
        self.platform_env = env;
        self
    }

    /// Set or replace one environment variable as seen by the resolver.
    pub fn with_env(mut self, key: &str, value: impl Into<OsString>) -> Self {
        self.environment.insert(key.to_string(), value.into());
        self
    }

    /// Drop all environment variables seen by the resolver.
    pub fn without_env(mut self) -> Self {
        self.environment.clear();
        self
    }

    /// Highest-priority overrides, typically from command-line flags.
    pub fn with_overrides(mut self, overrides: Settings) -> Self {
        self.overrides = overrides;
        self
    }

    fn config_dir(&self) -> Option<PathBuf> {
        if let Some(ref dir) = self.config_dir_override {
            return Some(dir.clone());
        }
        dirs::config_dir().map(|d| d.join("chatmate"))
    }

    fn env_path(&self, key: &str) -> Option<PathBuf> {
        self.environment
            .get(key)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    fn load_config_file(&self) -> Result<Option<(PathBuf, Settings)>> {
        let Some(dir) = self.config_dir() else {
            return Ok(None);
        };
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.is_file() {
                tracing::debug!(?path, "loading config file");
                let settings: Settings = ConfigStore::new().load(&NormalizedPath::new(&path))?;
                return Ok(Some((path, settings)));
            }
        }
        tracing::debug!(?dir, "no config file found");
        Ok(None)
    }

    /// Merge all layers.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let mut settings = Settings::default();
        let mut config_file = None;

        if let Some((path, file_settings)) = self.load_config_file()? {
            settings.merge(file_settings);
            config_file = Some(path);
        }

        settings.merge(Settings {
            source_dir: self.env_path(ENV_SOURCE_DIR),
            prompts_dir: self.env_path(ENV_PROMPTS_DIR),
        });
        settings.merge(self.overrides.clone());

        let prompts_dir = match settings.prompts_dir {
            Some(dir) => dir,
            None => platform::prompts_dir(self.platform, &self.platform_env)?,
        };

        let source_dir_explicit = settings.source_dir.is_some();
        let source_dir = settings.source_dir.or_else(default_source_dir);

        Ok(ResolvedConfig {
            source_dir,
            source_dir_explicit,
            prompts_dir,
            config_file,
        })
    }
}

/// `chatmodes/` next to the running executable.
fn default_source_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(DEFAULT_SOURCE_DIR_NAME))
}
