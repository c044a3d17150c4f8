pub mod config;
pub mod jwks;
pub mod persistence;
pub mod verification;

// Re-export commonly used adapters for convenience
pub use config::settings::{ApplicationSettings, OidcSettings, RedisSettings, Settings};
pub use jwks::key_provider::{JwksKeyProvider, KeyProviderError};
pub use persistence::{
    hashmap_revocation_store::HashMapRevocationStore,
    redis_revocation_store::RedisRevocationStore,
};
pub use verification::jwks_logout_verifier::{JwksLogoutVerifier, VerifierConfig};
