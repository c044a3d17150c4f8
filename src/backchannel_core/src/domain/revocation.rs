//! Revocation marker keys.
//!
//! The key layout is shared contract between this service and the session
//! middleware that consults (and later clears) the markers, so it lives in
//! the domain rather than in a store adapter.

// We are using key prefixes to prevent collisions and organize data!
const SESSION_LOGOUT_KEY_PREFIX: &str = "logout:";
const USER_KEY_PREFIX: &str = "user:";
const USER_LOGOUT_KEY_SUFFIX: &str = ":logout";

/// Marker value written for a revoked session or user. Boolean by contract;
/// replays overwrite it with the same value (last-writer-wins).
pub const REVOKED_MARKER: &str = "true";

/// Key recording that the provider session `sid` was logged out.
pub fn session_logout_key(session_id: &str) -> String {
    format!("{}{}", SESSION_LOGOUT_KEY_PREFIX, session_id)
}

/// Key recording that every session belonging to `sub` was logged out.
pub fn user_logout_key(subject: &str) -> String {
    format!("{}{}{}", USER_KEY_PREFIX, subject, USER_LOGOUT_KEY_SUFFIX)
}
