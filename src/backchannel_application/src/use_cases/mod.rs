pub mod backchannel_logout;
pub mod session_revocation_check;
