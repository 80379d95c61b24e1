//! Flash-backed secret store
//!
//! The secret is kept as a small postcard-encoded record under
//! `StorageKey::UserPassword`. The record carries a format version so a
//! future layout change can be detected instead of misread.

use serde::{Deserialize, Serialize};
use tripwire_core::config::SECRET_CAPACITY;
use tripwire_core::secret::{to_secret, Secret};
use tripwire_core::traits::{SecretStore, StoreError};
use tripwire_hal::{FlashError, FlashStorage, StorageKey};

/// Current record layout
pub const SECRET_RECORD_VERSION: u8 = 1;

/// Encoded record size bound: version byte, length varint, string bytes
const RECORD_BUFFER_SIZE: usize = SECRET_CAPACITY + 8;

/// Persisted secret record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRecord {
    pub version: u8,
    pub secret: Secret,
}

/// Secret store on top of a flash key-value partition
pub struct FlashSecretStore<F> {
    flash: F,
}

impl<F: FlashStorage> FlashSecretStore<F> {
    pub fn new(flash: F) -> Self {
        Self { flash }
    }
}

fn store_error(err: FlashError) -> StoreError {
    match err {
        FlashError::Full => StoreError::Full,
        FlashError::BufferTooSmall => StoreError::Corrupt,
        FlashError::Flash | FlashError::Storage | FlashError::NotFound => StoreError::Io,
    }
}

impl<F: FlashStorage> SecretStore for FlashSecretStore<F> {
    async fn load(&mut self) -> Result<Option<Secret>, StoreError> {
        let mut buffer = [0u8; RECORD_BUFFER_SIZE];
        let len = match self.flash.read(StorageKey::UserPassword, &mut buffer).await {
            Ok(len) => len,
            Err(FlashError::NotFound) => return Ok(None),
            Err(err) => return Err(store_error(err)),
        };

        let record: SecretRecord =
            postcard::from_bytes(&buffer[..len]).map_err(|_| StoreError::Corrupt)?;
        if record.version != SECRET_RECORD_VERSION {
            return Err(StoreError::Corrupt);
        }
        Ok(Some(record.secret))
    }

    async fn save(&mut self, secret: &str) -> Result<(), StoreError> {
        let record = SecretRecord {
            version: SECRET_RECORD_VERSION,
            secret: to_secret(secret).ok_or(StoreError::Full)?,
        };

        let mut buffer = [0u8; RECORD_BUFFER_SIZE];
        let encoded = postcard::to_slice(&record, &mut buffer).map_err(|_| StoreError::Full)?;
        self.flash
            .write(StorageKey::UserPassword, encoded)
            .await
            .map_err(store_error)
    }
}
