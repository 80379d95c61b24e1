//! Flash storage abstractions
//!
//! Persistent key-value storage implemented by chip-specific HALs on top of
//! their flash memory.

/// Keys of the records the guard keeps in flash
///
/// The guard persists nothing but the owner's secret. Countdown and alarm
/// state are deliberately memory-only and start over on every boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// The owner's password record (`userPassword`)
    UserPassword = 0x10,
}

impl StorageKey {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        [StorageKey::UserPassword]
            .into_iter()
            .find(|key| key.as_u8() == value)
    }

    /// Name of the record as the panel and logs refer to it
    pub fn name(self) -> &'static str {
        match self {
            StorageKey::UserPassword => "userPassword",
        }
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// The flash peripheral reported an error
    Flash,
    /// Partition contents could not be interpreted
    Storage,
    NotFound,
    /// Record is larger than the caller's buffer
    BufferTooSmall,
    /// No room left even after page rotation
    Full,
}

/// Flash storage trait
///
/// Wear-leveled key-value storage. Writes to an existing key replace the
/// previous value.
pub trait FlashStorage {
    /// Copy the record for `key` into `buffer`, returning its length
    ///
    /// A key that was never written is `FlashError::NotFound`.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Store the record for `key`, replacing any older one
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

#[cfg(feature = "sequential-storage")]
mod key {
    use sequential_storage::map::{Key, SerializationError};

    use super::StorageKey;

    /// Keys are stored as their single byte value
    impl Key for StorageKey {
        fn serialize_into(&self, buffer: &mut [u8]) -> Result<usize, SerializationError> {
            let slot = buffer.first_mut().ok_or(SerializationError::BufferTooSmall)?;
            *slot = self.as_u8();
            Ok(1)
        }

        fn deserialize_from(buffer: &[u8]) -> Result<(Self, usize), SerializationError> {
            let byte = *buffer.first().ok_or(SerializationError::BufferTooSmall)?;
            let key = StorageKey::from_u8(byte).ok_or(SerializationError::InvalidFormat)?;
            Ok((key, 1))
        }
    }
}
