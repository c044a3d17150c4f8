pub mod logout_verifier;
