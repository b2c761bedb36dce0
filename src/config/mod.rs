//! Configuration layering
//!
//! The family table is assembled from four layers:
//! 1. The built-in Tailwind table
//! 2. User config (`$XDG_CONFIG_HOME/classmerge/config.toml`)
//! 3. Project config (`.classmerge.toml` or `--config`)
//! 4. CLI flags

mod defaults;
mod effective;
mod merge;

pub use defaults::{project_config_path, user_config_path, user_config_path_from, BuiltinDefaults};
pub use effective::{
    ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig, SCHEMA_ID, SCHEMA_VERSION,
};
pub use merge::{deep_merge, merge_layers};
