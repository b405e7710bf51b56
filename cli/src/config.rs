//! TOML configuration file for the CLI.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default store file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "./ethvault_keys.json";

/// Settings the CLI reads from a TOML file.
///
/// File settings are the base; CLI flags and environment variables
/// override them.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VaultConfig {
    /// Path of the JSON file holding the key records.
    pub store_path: PathBuf,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

/// Load the config file if one was given, falling back to defaults on a
/// missing or malformed file.
pub fn load_config(path: Option<&Path>) -> VaultConfig {
    let Some(path) = path else {
        return VaultConfig::default();
    };
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<VaultConfig>(&contents) {
            Ok(config) => {
                tracing::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("failed to parse config file: {e}, using defaults");
                VaultConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                "failed to read config file {}: {e}, using defaults",
                path.display()
            );
            VaultConfig::default()
        }
    }
}
