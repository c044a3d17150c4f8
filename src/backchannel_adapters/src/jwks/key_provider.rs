use std::time::Duration;

use dashmap::DashMap;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::JwkSet;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum KeyProviderError {
    #[error("Failed to fetch the provider key set: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("No key with kid '{0}' in the provider key set")]
    UnknownKey(String),
}

/// Fetches and caches the identity provider's published signing keys
/// (JWKS), keyed by `kid`.
///
/// The cache is populated lazily: a `kid` miss triggers a full re-fetch of
/// the key set (the provider has rotated keys, or the cache is cold) and
/// one retried lookup. A second miss is a hard `UnknownKey` failure.
///
/// Reads of cached keys take no exclusive lock. Refreshes are coalesced
/// through a single-flight mutex so a burst of tokens signed with a fresh
/// key produces one upstream fetch, not a thundering herd. Fetch failures
/// surface to every waiting caller and are never cached as negative
/// results.
pub struct JwksKeyProvider {
    http_client: reqwest::Client,
    jwks_url: String,
    keys: DashMap<String, DecodingKey>,
    refresh_lock: Mutex<()>,
}

impl JwksKeyProvider {
    /// Create a provider for the given JWKS endpoint. Does not fetch; the
    /// first lookup populates the cache.
    pub fn new(jwks_url: String, fetch_timeout: Duration) -> Result<Self, KeyProviderError> {
        let http_client = reqwest::Client::builder().timeout(fetch_timeout).build()?;
        Ok(Self {
            http_client,
            jwks_url,
            keys: DashMap::new(),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Resolve the public key for `kid`, refreshing the key set once on a
    /// cache miss.
    #[tracing::instrument(name = "JwksKeyProvider::key_for", skip(self))]
    pub async fn key_for(&self, kid: &str) -> Result<DecodingKey, KeyProviderError> {
        if let Some(key) = self.keys.get(kid) {
            return Ok(key.clone());
        }

        let _refresh_guard = self.refresh_lock.lock().await;

        // A caller holding the lock before us may already have refreshed.
        if let Some(key) = self.keys.get(kid) {
            return Ok(key.clone());
        }

        self.refresh().await?;

        self.keys
            .get(kid)
            .map(|key| key.clone())
            .ok_or_else(|| KeyProviderError::UnknownKey(kid.to_string()))
    }

    /// Re-fetch the key set and replace the cache contents wholesale.
    ///
    /// Callers must hold `refresh_lock`.
    async fn refresh(&self) -> Result<(), KeyProviderError> {
        tracing::debug!(jwks_url = %self.jwks_url, "refreshing provider key set");

        let jwk_set: JwkSet = self
            .http_client
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        self.keys.clear();
        for jwk in &jwk_set.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                continue;
            };
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    self.keys.insert(kid, key);
                }
                Err(error) => {
                    tracing::warn!(kid = %kid, %error, "skipping unusable key in provider key set");
                }
            }
        }

        tracing::info!(key_count = self.keys.len(), "provider key set cached");
        Ok(())
    }
}
