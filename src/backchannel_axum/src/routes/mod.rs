//! Axum-specific route handlers.

pub mod backchannel_logout;

pub use backchannel_logout::backchannel_logout;
