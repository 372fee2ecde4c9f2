//! Configuration loading for cask-keeper.
//!
//! Settings come from an optional `config.toml` (path overridable through
//! `CASK_KEEPER_CONFIG`) with environment overrides applied on top. A `.env`
//! file is honoured when present. The API token is never part of the loaded
//! configuration; see [`api::load_api_token`].

/// REST API connection settings
pub mod api;

/// Pricing query settings
pub mod pricing;

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

pub use api::ApiConfig;
pub use pricing::PricingConfig;

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const CONFIG_PATH_VAR: &str = "CASK_KEEPER_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Where and how to reach the collection API
    pub api: ApiConfig,
    /// Parameters for the pricing endpoint
    pub pricing: PricingConfig,
}

/// Loads configuration from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the application configuration the way a running page expects it:
/// `.env`, then the TOML file (defaults when it does not exist), then
/// environment overrides.
pub fn load_app_config() -> Result<AppConfig> {
    // Non-fatal, env vars can be set externally
    dotenvy::dotenv().ok();

    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = if Path::new(&path).exists() {
        load_config(&path)?
    } else {
        tracing::info!("No config file at {path}, using defaults");
        AppConfig::default()
    };

    config.api.apply_env_overrides()?;
    Ok(config)
}
