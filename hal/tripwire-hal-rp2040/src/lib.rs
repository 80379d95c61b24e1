//! RP2040-specific HAL for the Tripwire guard firmware
//!
//! Implements the shared `tripwire-hal` traits on the RP2040 and adds the
//! chip-specific helpers the firmware needs:
//!
//! - Flash storage for the secret record (implements `tripwire_hal::FlashStorage`)
//! - PWM slice timing for the siren tone

#![no_std]

pub mod flash;
pub mod pwm;

// Re-export shared traits from tripwire-hal for convenience
pub use tripwire_hal::{FlashStorage as FlashStorageTrait, StorageKey};
