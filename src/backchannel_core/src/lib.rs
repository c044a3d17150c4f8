pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    logout_claims::{
        Audience, BACKCHANNEL_LOGOUT_EVENT, LogoutClaims, LogoutClaimsError, ValidatedLogout,
        validate_logout_claims,
    },
    revocation::{REVOKED_MARKER, session_logout_key, user_logout_key},
};

pub use ports::repositories::{RevocationStore, RevocationStoreError};

pub use strategies::logout_verifier::{LogoutTokenError, LogoutTokenVerifier};
