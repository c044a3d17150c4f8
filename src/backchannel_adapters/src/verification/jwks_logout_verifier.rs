use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backchannel_core::{LogoutClaims, LogoutTokenError, LogoutTokenVerifier};
use chrono::Utc;
use jsonwebtoken::{Algorithm, Validation, decode, decode_header};

use crate::jwks::key_provider::JwksKeyProvider;

/// How the relying party identifies its provider and itself.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Expected `iss` claim, compared exactly.
    pub issuer: String,
    /// Client identifier the `aud` claim must contain.
    pub audience: String,
    /// Maximum accepted age of a token measured from its `iat` claim.
    /// Enforced independently of `exp` to defend against delayed-delivery
    /// replay. Defaults to two minutes in [`Settings`](crate::Settings).
    pub max_token_age: Duration,
}

/// Verifies logout-token signatures against the provider's JWKS plus the
/// standard issuer / audience / temporal claims.
#[derive(Clone)]
pub struct JwksLogoutVerifier {
    key_provider: Arc<JwksKeyProvider>,
    config: VerifierConfig,
}

impl JwksLogoutVerifier {
    pub fn new(key_provider: Arc<JwksKeyProvider>, config: VerifierConfig) -> Self {
        Self {
            key_provider,
            config,
        }
    }
}

#[async_trait]
impl LogoutTokenVerifier for JwksLogoutVerifier {
    #[tracing::instrument(name = "JwksLogoutVerifier::verify", skip(self, raw_token))]
    async fn verify(&self, raw_token: &str) -> Result<LogoutClaims, LogoutTokenError> {
        let raw_token = raw_token.trim();
        if raw_token.is_empty() {
            return Err(LogoutTokenError::MissingToken);
        }

        let header = decode_header(raw_token)
            .map_err(|error| LogoutTokenError::MalformedToken(error.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| LogoutTokenError::MalformedToken("header carries no kid".to_string()))?;

        // Without the key the signature cannot be checked; fail closed.
        let key = self
            .key_provider
            .key_for(&kid)
            .await
            .map_err(|error| LogoutTokenError::SignatureInvalid(error.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.algorithms = vec![Algorithm::RS256, Algorithm::RS384, Algorithm::RS512];
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_audience(&[self.config.audience.as_str()]);

        let claims = decode::<LogoutClaims>(raw_token, &key, &validation)
            .map_err(map_jwt_error)?
            .claims;

        // Freshness window on iat, stricter than and independent of exp.
        let issued_at = claims.iat.ok_or_else(|| {
            LogoutTokenError::MalformedToken("payload carries no iat".to_string())
        })?;
        let age_seconds = Utc::now().timestamp() - issued_at;
        if age_seconds > self.config.max_token_age.as_secs() as i64 {
            return Err(LogoutTokenError::TokenExpiredOrTooOld);
        }

        Ok(claims)
    }
}

fn map_jwt_error(error: jsonwebtoken::errors::Error) -> LogoutTokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
            LogoutTokenError::SignatureInvalid(error.to_string())
        }
        ErrorKind::InvalidIssuer => LogoutTokenError::IssuerMismatch,
        ErrorKind::InvalidAudience => LogoutTokenError::AudienceMismatch,
        ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => {
            LogoutTokenError::TokenExpiredOrTooOld
        }
        _ => LogoutTokenError::MalformedToken(error.to_string()),
    }
}
