use async_trait::async_trait;
use thiserror::Error;

use crate::domain::logout_claims::LogoutClaims;

/// Errors from cryptographic and standard-claim verification of a logout
/// token.
///
/// The `Display` strings are the stable, rule-identifying reasons surfaced
/// to the sender; internal detail rides along in variant payloads and is
/// only emitted through logs or an explicit diagnostic mode.
#[derive(Debug, Clone, Error)]
pub enum LogoutTokenError {
    #[error("Need logout token")]
    MissingToken,
    #[error("Logout token is malformed")]
    MalformedToken(String),
    #[error("Logout token signature could not be verified")]
    SignatureInvalid(String),
    #[error("Logout token issuer does not match the configured issuer")]
    IssuerMismatch,
    #[error("Logout token audience does not include this client")]
    AudienceMismatch,
    #[error("Logout token is expired or older than the freshness window")]
    TokenExpiredOrTooOld,
}

impl LogoutTokenError {
    /// Internal detail for logs and diagnostic responses; never part of the
    /// production response body.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::MalformedToken(detail) | Self::SignatureInvalid(detail) => Some(detail),
            _ => None,
        }
    }
}

impl PartialEq for LogoutTokenError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::MissingToken, Self::MissingToken) => true,
            (Self::MalformedToken(_), Self::MalformedToken(_)) => true,
            (Self::SignatureInvalid(_), Self::SignatureInvalid(_)) => true,
            (Self::IssuerMismatch, Self::IssuerMismatch) => true,
            (Self::AudienceMismatch, Self::AudienceMismatch) => true,
            (Self::TokenExpiredOrTooOld, Self::TokenExpiredOrTooOld) => true,
            _ => false,
        }
    }
}

/// Strategy for verifying a raw logout token into trusted claims.
///
/// Implementations check the signature against the provider's published
/// keys plus the standard issuer / audience / temporal claims. They do NOT
/// apply the back-channel-logout semantic rules; that is
/// [`validate_logout_claims`](crate::domain::logout_claims::validate_logout_claims).
///
/// Verification is pure apart from a possible key-cache refresh inside the
/// implementation. A key that cannot be fetched means the signature cannot
/// be checked, so implementations fail closed with `SignatureInvalid`.
#[async_trait]
pub trait LogoutTokenVerifier: Send + Sync {
    async fn verify(&self, raw_token: &str) -> Result<LogoutClaims, LogoutTokenError>;
}
