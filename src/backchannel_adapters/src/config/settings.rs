use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::constants;

/// Runtime settings, read from an optional `configuration.json` file with
/// environment-variable overrides (`BACKCHANNEL__OIDC__ISSUER`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationSettings,
    pub oidc: OidcSettings,
    #[serde(default)]
    pub redis: RedisSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    #[serde(default = "default_app_address")]
    pub address: String,
    /// When set, rejection bodies include internal error detail. Never
    /// enable in production.
    #[serde(default)]
    pub diagnostics: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OidcSettings {
    /// Identity-provider issuer URL; the `iss` claim must equal it exactly.
    pub issuer: String,
    /// Our client identifier; the `aud` claim must contain it.
    pub client_id: String,
    /// Explicit JWKS endpoint; derived from the issuer when absent.
    pub jwks_url: Option<String>,
    #[serde(default = "default_max_token_age_seconds")]
    pub max_token_age_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    #[serde(default = "default_redis_host_name")]
    pub host_name: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(constants::SETTINGS_FILE).required(false))
            .add_source(
                Environment::with_prefix(constants::env::SETTINGS_PREFIX)
                    .separator(constants::env::SETTINGS_SEPARATOR),
            )
            .build()?
            .try_deserialize()
    }
}

impl OidcSettings {
    /// JWKS endpoint to fetch signing keys from.
    pub fn jwks_url(&self) -> String {
        match &self.jwks_url {
            Some(url) => url.clone(),
            None => format!(
                "{}{}",
                self.issuer.trim_end_matches('/'),
                constants::JWKS_WELL_KNOWN_PATH
            ),
        }
    }

    pub fn max_token_age(&self) -> Duration {
        Duration::from_secs(self.max_token_age_seconds)
    }
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            address: default_app_address(),
            diagnostics: false,
        }
    }
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            host_name: default_redis_host_name(),
        }
    }
}

fn default_app_address() -> String {
    constants::prod::APP_ADDRESS.to_string()
}

fn default_redis_host_name() -> String {
    constants::prod::REDIS_HOST_NAME.to_string()
}

fn default_max_token_age_seconds() -> u64 {
    constants::DEFAULT_MAX_TOKEN_AGE_SECONDS
}
