//! Effective configuration with provenance
//!
//! Records the merged family table together with every source that
//! contributed to it.

use chrono::{DateTime, Utc};
use classmerge_families::{FamilyConfig, TableError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use super::defaults::{project_config_path, user_config_path, BuiltinDefaults};
use super::merge::merge_layers;
use crate::merger::ClassMerger;

/// Schema version for effective_config
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "classmerge/effective_config@1";

/// Origin of a configuration source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    User,
    Project,
    Cli,
}

/// A contributing config source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl ConfigSource {
    fn inline(origin: ConfigOrigin) -> Self {
        Self {
            origin,
            path: None,
            digest: None,
        }
    }

    fn file(origin: ConfigOrigin, path: &Path, digest: String) -> Self {
        Self {
            origin,
            path: Some(path.to_string_lossy().into_owned()),
            digest: Some(digest),
        }
    }
}

/// Merged and validated family table with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub schema_version: u32,
    pub schema_id: String,

    /// When this config was computed
    pub created_at: DateTime<Utc>,

    /// SHA-256 over the canonical JSON of the family table
    pub table_fingerprint: String,

    /// The merged family table
    pub config: FamilyConfig,

    /// Contributing sources in precedence order
    pub sources: Vec<ConfigSource>,
}

impl EffectiveConfig {
    /// Build the effective config from explicit layers.
    ///
    /// Missing user or project files are skipped.
    pub fn build(
        user_path: Option<&Path>,
        project_path: Option<&Path>,
        cli_overrides: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = vec![BuiltinDefaults::new().to_value()?];
        let mut sources = vec![ConfigSource::inline(ConfigOrigin::Builtin)];

        let files = [
            (ConfigOrigin::User, user_path),
            (ConfigOrigin::Project, project_path),
        ];
        for (origin, path) in files {
            let Some(path) = path.filter(|p| p.exists()) else {
                continue;
            };
            let (value, digest) = load_toml_layer(path)?;
            tracing::debug!(path = %path.display(), ?origin, %digest, "loaded config layer");
            layers.push(value);
            sources.push(ConfigSource::file(origin, path, digest));
        }

        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource::inline(ConfigOrigin::Cli));
        }

        let config: FamilyConfig = serde_json::from_value(merge_layers(layers))?;
        config.validate()?;

        let table_fingerprint = sha256_hex(&serde_json_canonicalizer::to_vec(&config)?);
        tracing::debug!(layers = sources.len(), %table_fingerprint, "effective config ready");

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            table_fingerprint,
            config,
            sources,
        })
    }

    /// Build from the standard locations.
    ///
    /// `explicit_project` replaces `.classmerge.toml` in `cwd` and must exist.
    pub fn load(
        explicit_project: Option<&Path>,
        cwd: &Path,
        cli_overrides: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let project = match explicit_project {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.display().to_string()))
            }
            Some(path) => path.to_path_buf(),
            None => project_config_path(cwd),
        };
        let user = user_config_path();

        Self::build(user.as_deref(), Some(project.as_path()), cli_overrides)
    }

    /// CLI override layer from optional `--prefix` and `--separator` flags.
    pub fn cli_overrides(prefix: Option<&str>, separator: Option<&str>) -> Option<Value> {
        let mut layer = serde_json::Map::new();
        if let Some(prefix) = prefix {
            layer.insert("prefix".to_string(), Value::String(prefix.to_string()));
        }
        if let Some(separator) = separator {
            layer.insert("separator".to_string(), Value::String(separator.to_string()));
        }
        (!layer.is_empty()).then_some(Value::Object(layer))
    }

    /// Merger for this table.
    pub fn merger(&self) -> Result<ClassMerger, ConfigError> {
        Ok(ClassMerger::from_config(self.config.clone())?)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Read a TOML layer as a JSON value, with the digest of its raw bytes.
fn load_toml_layer(path: &Path) -> Result<(Value, String), ConfigError> {
    let bytes =
        fs::read(path).map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;
    let digest = sha256_hex(&bytes);

    let contents = std::str::from_utf8(&bytes)
        .map_err(|e| ConfigError::ParseError(format!("{}: invalid UTF-8: {}", path.display(), e)))?;
    let value: Value = toml::from_str(contents)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

    Ok((value, digest))
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid config: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("Invalid family table: {0}")]
    Table(#[from] TableError),
}
