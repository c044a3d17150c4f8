//! # Backchannel - OIDC Back-Channel Logout Library
//!
//! This is a facade crate that re-exports all public APIs from the
//! back-channel logout service components. Use this crate to get access to
//! the whole pipeline in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! backchannel = { path = "../backchannel" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `LogoutClaims`, `ValidatedLogout`, the claim
//!   validation rules and revocation key layout
//! - **Ports**: `RevocationStore`, `LogoutTokenVerifier`
//! - **Use cases**: `BackchannelLogoutUseCase`, `SessionRevocationCheck`
//! - **Adapters**: `JwksKeyProvider`, `JwksLogoutVerifier`,
//!   `RedisRevocationStore`, `HashMapRevocationStore`
//! - **Service**: `LogoutService` - the HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and port traits
pub mod core {
    pub use backchannel_core::*;
}

// Re-export most commonly used core types at the root level
pub use backchannel_core::{
    Audience, BACKCHANNEL_LOGOUT_EVENT, LogoutClaims, LogoutClaimsError, REVOKED_MARKER,
    ValidatedLogout, session_logout_key, user_logout_key, validate_logout_claims,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository and strategy trait definitions
pub mod ports {
    pub use backchannel_core::{
        LogoutTokenError, LogoutTokenVerifier, RevocationStore, RevocationStoreError,
    };
}

pub use backchannel_core::{
    LogoutTokenError, LogoutTokenVerifier, RevocationStore, RevocationStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use backchannel_application::*;
}

pub use backchannel_application::{
    BackchannelLogoutError, BackchannelLogoutUseCase, RevocationStatus, SessionRevocationCheck,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// JWKS key provider
    pub mod jwks {
        pub use backchannel_adapters::jwks::*;
    }

    /// Logout token verification
    pub mod verification {
        pub use backchannel_adapters::verification::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use backchannel_adapters::persistence::*;
    }

    /// Configuration
    pub mod config {
        pub use backchannel_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use backchannel_adapters::{
    HashMapRevocationStore, JwksKeyProvider, JwksLogoutVerifier, KeyProviderError,
    RedisRevocationStore, Settings, VerifierConfig,
};

// ============================================================================
// Logout Service (Main Entry Point)
// ============================================================================

/// Main logout service
pub use backchannel_service::{LogoutService, configure_redis, get_redis_client};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;
