pub mod jwks_logout_verifier;
