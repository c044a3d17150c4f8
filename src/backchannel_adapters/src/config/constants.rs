pub mod env {
    pub const SETTINGS_PREFIX: &str = "BACKCHANNEL";
    pub const SETTINGS_SEPARATOR: &str = "__";
}

/// Base name of the optional settings file (`configuration.json`).
pub const SETTINGS_FILE: &str = "configuration";

/// Well-known JWKS path appended to the issuer URL when no explicit JWKS
/// URL is configured.
pub const JWKS_WELL_KNOWN_PATH: &str = "/.well-known/jwks.json";

/// Freshness window applied to the `iat` claim of logout tokens.
pub const DEFAULT_MAX_TOKEN_AGE_SECONDS: u64 = 120;

/// Bound on a single JWKS fetch; a slow provider fails the request rather
/// than hanging it.
pub const KEY_FETCH_TIMEOUT_SECONDS: u64 = 10;

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const REDIS_HOST_NAME: &str = "127.0.0.1";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
