pub mod logout_claims;
pub mod revocation;
