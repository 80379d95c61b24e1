//! Persistent storage

pub mod flash_secret;

pub use flash_secret::{FlashSecretStore, SecretRecord, SECRET_RECORD_VERSION};
