//! Axum integration for the back-channel logout library.
//!
//! This crate provides the Axum route for the framework-agnostic logout
//! pipeline defined in `backchannel_core` and `backchannel_application`.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  backchannel_core: claims, rules, port traits │
//! └──────────────┬────────────────────────────────┘
//!                │
//!                ▼
//! ┌───────────────────────────────────────────────┐
//! │  backchannel_application: logout use case     │
//! └──────────────┬────────────────────────────────┘
//!                │
//!                ▼
//! ┌───────────────────────────────────────────────┐
//! │  backchannel_axum: POST /backchannel-logout   │
//! │  - form extraction                            │
//! │  - error → 400/500 mapping                    │
//! └───────────────────────────────────────────────┘
//! ```

pub mod routes;

// Re-export for convenience
pub use routes::backchannel_logout::{BackchannelLogoutState, backchannel_logout};
