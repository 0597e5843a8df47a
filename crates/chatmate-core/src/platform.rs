//! Destination directory resolution
//!
//! The prompts directory lives under the editor's per-user configuration
//! directory:
//!
//! - macOS: `$HOME/Library/Application Support/Code/User/prompts`
//! - Linux and anything unrecognised: `$HOME/.config/Code/User/prompts`
//! - Windows: `$APPDATA/Code/User/prompts`, or
//!   `$HOME/AppData/Roaming/Code/User/prompts` when `APPDATA` is unset

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Operating system family that decides the destination layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Other,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(windows) {
            Self::Windows
        } else {
            Self::Other
        }
    }
}

/// Environment inputs to destination resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformEnv {
    pub home: Option<PathBuf>,
    pub appdata: Option<PathBuf>,
}

impl PlatformEnv {
    /// Read the home directory and `APPDATA` from the running process.
    pub fn from_process() -> Self {
        Self {
            home: home_for(Platform::current(), std::env::var_os("HOME")),
            appdata: non_empty(std::env::var_os("APPDATA")),
        }
    }
}

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|value| !value.is_empty()).map(PathBuf::from)
}

/// Home directory for `platform`.
///
/// `dirs::home_dir` ignores `HOME` on Windows, so there a set `HOME` wins and
/// the profile directory is only the fallback. Elsewhere `dirs` already
/// honours `HOME`.
fn home_for(platform: Platform, home_var: Option<OsString>) -> Option<PathBuf> {
    match platform {
        Platform::Windows => non_empty(home_var).or_else(dirs::home_dir),
        Platform::MacOs | Platform::Linux | Platform::Other => dirs::home_dir(),
    }
}

fn editor_prompts(root: &Path) -> PathBuf {
    root.join("Code").join("User").join("prompts")
}

/// Resolve the prompts directory for `platform` from `env`.
pub fn prompts_dir(platform: Platform, env: &PlatformEnv) -> Result<PathBuf> {
    let home = || env.home.as_deref().ok_or(Error::HomeDirNotFound);
    let dir = match platform {
        Platform::MacOs => editor_prompts(&home()?.join("Library").join("Application Support")),
        Platform::Windows => match &env.appdata {
            Some(appdata) => editor_prompts(appdata),
            None => editor_prompts(&home()?.join("AppData").join("Roaming")),
        },
        Platform::Linux | Platform::Other => editor_prompts(&home()?.join(".config")),
    };
    Ok(dir)
}

/// Prompts directory for the current platform and process environment.
pub fn default_prompts_dir() -> Result<PathBuf> {
    prompts_dir(Platform::current(), &PlatformEnv::from_process())
}
