//! Secret persistence

use core::future::Future;

use crate::secret::Secret;

/// Errors from the secret store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Underlying storage failed
    Io,
    /// Stored record could not be decoded
    Corrupt,
    /// No room left to write
    Full,
}

/// Persistent store for the single secret
pub trait SecretStore {
    /// Load the secret, `None` if it was never set
    fn load(&mut self) -> impl Future<Output = Result<Option<Secret>, StoreError>>;

    /// Replace the stored secret
    fn save(&mut self, secret: &str) -> impl Future<Output = Result<(), StoreError>>;
}
