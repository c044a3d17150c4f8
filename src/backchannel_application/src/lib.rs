pub mod use_cases;

pub use use_cases::{
    backchannel_logout::{BackchannelLogoutError, BackchannelLogoutUseCase},
    session_revocation_check::{RevocationStatus, SessionRevocationCheck},
};
