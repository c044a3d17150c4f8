use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// Event-type URI that every back-channel logout token must carry in its
/// `events` claim.
pub const BACKCHANNEL_LOGOUT_EVENT: &str = "http://schemas.openid.net/event/backchannel-logout";

/// The `aud` claim, which providers serialize either as a single string or
/// as an array of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    pub fn contains(&self, client_id: &str) -> bool {
        match self {
            Audience::One(aud) => aud == client_id,
            Audience::Many(auds) => auds.iter().any(|aud| aud == client_id),
        }
    }
}

/// Payload of a logout token whose signature and standard JWT claims
/// (issuer, audience, expiry) have already been verified.
///
/// Optional fields are modeled as present-or-absent so that the semantic
/// rules in [`validate_logout_claims`] can fail with a named error instead
/// of an unhandled type fault.
#[derive(Debug, Clone, Deserialize)]
pub struct LogoutClaims {
    pub iss: String,
    pub aud: Audience,
    pub exp: i64,
    pub iat: Option<i64>,
    pub sub: Option<String>,
    pub sid: Option<String>,
    pub events: Option<HashMap<String, serde_json::Value>>,
    /// A logout token must never carry a nonce; the value is retained only
    /// so its presence can be detected.
    pub nonce: Option<serde_json::Value>,
    pub jti: Option<String>,
}

/// Outcome of semantic validation: the identifiers a logout applies to.
///
/// Invariant: at least one of `subject` and `session_id` is `Some`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLogout {
    pub subject: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LogoutClaimsError {
    #[error("Logout token must contain either sub claim or sid claim, or both")]
    MissingSubjectAndSession,
    #[error("Logout token must contain events claim with correct schema")]
    MissingOrMalformedEvents,
    #[error("Logout token must not contain a nonce claim")]
    ForbiddenNonce,
}

/// Enforce the Back-Channel-Logout-specific rules on a verified payload.
///
/// Rules, in order (first failure wins):
/// 1. `sub` or `sid` must be present.
/// 2. `events` must be present and contain the
///    [`BACKCHANNEL_LOGOUT_EVENT`] key with a JSON object value.
/// 3. `nonce` must be absent, regardless of its value. A nonce marks an ID
///    token; accepting one here would open a token-substitution hole.
pub fn validate_logout_claims(claims: &LogoutClaims) -> Result<ValidatedLogout, LogoutClaimsError> {
    if claims.sub.is_none() && claims.sid.is_none() {
        return Err(LogoutClaimsError::MissingSubjectAndSession);
    }

    let has_logout_event = claims
        .events
        .as_ref()
        .and_then(|events| events.get(BACKCHANNEL_LOGOUT_EVENT))
        .is_some_and(serde_json::Value::is_object);
    if !has_logout_event {
        return Err(LogoutClaimsError::MissingOrMalformedEvents);
    }

    if claims.nonce.is_some() {
        return Err(LogoutClaimsError::ForbiddenNonce);
    }

    Ok(ValidatedLogout {
        subject: claims.sub.clone(),
        session_id: claims.sid.clone(),
    })
}
