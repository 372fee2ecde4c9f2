//! REST API connection settings.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

const API_URL_VAR: &str = "CASK_KEEPER_API_URL";
const TIMEOUT_VAR: &str = "CASK_KEEPER_TIMEOUT_SECS";
const API_TOKEN_VAR: &str = "CASK_KEEPER_API_TOKEN";

/// Connection settings for the collection API.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL without the `/v1` prefix, e.g. `https://cellar.example.com`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 15,
        }
    }
}

impl ApiConfig {
    #[must_use]
    /// Timeout as a [`Duration`].
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Applies `CASK_KEEPER_API_URL` and `CASK_KEEPER_TIMEOUT_SECS` when set.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var(API_URL_VAR) {
            self.base_url = url;
        }
        if let Ok(raw) = std::env::var(TIMEOUT_VAR) {
            self.timeout_secs = parse_timeout(&raw)?;
        }
        Ok(())
    }
}

fn parse_timeout(raw: &str) -> Result<u64> {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => Err(Error::Config {
            message: format!("{TIMEOUT_VAR} must be a positive number of seconds, got '{raw}'"),
        }),
        Ok(secs) => Ok(secs),
    }
}

/// Reads the bearer token from `CASK_KEEPER_API_TOKEN`.
///
/// Loaded directly before building the client, not stored in [`ApiConfig`].
/// Returns `None` when unset, in which case requests go out unauthenticated.
#[must_use]
pub fn load_api_token() -> Option<String> {
    std::env::var(API_TOKEN_VAR)
        .ok()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
