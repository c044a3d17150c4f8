pub mod key_provider;
