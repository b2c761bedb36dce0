//! Built-in table (layer 1) and config file locations

use classmerge_families::FamilyConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File name of the project config, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".classmerge.toml";

/// The built-in layer.
#[derive(Debug, Clone)]
pub struct BuiltinDefaults {
    config: FamilyConfig,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinDefaults {
    pub fn new() -> Self {
        Self {
            config: FamilyConfig::builtin(),
        }
    }

    pub fn config(&self) -> &FamilyConfig {
        &self.config
    }

    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.config)
    }
}

/// User config path from the process environment.
pub fn user_config_path() -> Option<PathBuf> {
    user_config_path_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

/// User config path: `$XDG_CONFIG_HOME/classmerge/config.toml`, else
/// `$HOME/.config/classmerge/config.toml`. Empty variables count as unset.
pub fn user_config_path_from(
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Option<PathBuf> {
    let base = match xdg_config_home.filter(|v| !v.is_empty()) {
        Some(xdg) => PathBuf::from(xdg),
        None => PathBuf::from(home.filter(|v| !v.is_empty())?).join(".config"),
    };
    Some(base.join("classmerge").join("config.toml"))
}

/// Project config path inside `dir`.
pub fn project_config_path(dir: &Path) -> PathBuf {
    dir.join(PROJECT_CONFIG_FILE)
}
