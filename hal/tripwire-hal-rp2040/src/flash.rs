//! Flash storage driver for RP2040
//!
//! Uses sequential-storage for wear-leveled key-value storage in the last
//! 16KB of flash. The guard keeps a single small record there.
//!
//! Implements the `FlashStorage` trait from `tripwire-hal`.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use tripwire_hal::flash::{FlashError, StorageKey};

/// 2MB flash on the reference board
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
/// Four erase sectors, enough for sequential-storage to rotate pages
pub const SECRET_PARTITION_SIZE: usize = 4 * ERASE_SIZE;
pub const SECRET_PARTITION_START: usize = FLASH_SIZE - SECRET_PARTITION_SIZE;

/// Flash range for the secret partition
pub const SECRET_RANGE: core::ops::Range<u32> =
    (SECRET_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch space for one stored item (key + record)
const ITEM_BUFFER_SIZE: usize = 256;

/// RP2040 flash storage
pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> Rp2040FlashStorage<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }

    /// Look up `key`, leaving the record in `scratch`
    async fn fetch<'b>(
        &mut self,
        key: StorageKey,
        scratch: &'b mut [u8; ITEM_BUFFER_SIZE],
    ) -> Result<Option<&'b [u8]>, FlashError> {
        map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            SECRET_RANGE,
            &mut NoCache::new(),
            scratch,
            &key,
        )
        .await
        .map_err(|_| FlashError::Storage)
    }
}

impl<'d> tripwire_hal::FlashStorage for Rp2040FlashStorage<'d> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let mut scratch = [0u8; ITEM_BUFFER_SIZE];
        let record = self.fetch(key, &mut scratch).await?.ok_or(FlashError::NotFound)?;
        let target = buffer
            .get_mut(..record.len())
            .ok_or(FlashError::BufferTooSmall)?;
        target.copy_from_slice(record);
        Ok(record.len())
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        let mut scratch = [0u8; ITEM_BUFFER_SIZE];
        let result = map::store_item(
            &mut self.flash,
            SECRET_RANGE,
            &mut NoCache::new(),
            &mut scratch,
            &key,
            &data,
        )
        .await;

        result.map_err(|err| match err {
            sequential_storage::Error::FullStorage => FlashError::Full,
            sequential_storage::Error::Storage { .. } => FlashError::Flash,
            _ => FlashError::Storage,
        })
    }
}
