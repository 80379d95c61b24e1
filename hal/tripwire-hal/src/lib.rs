//! Tripwire Hardware Abstraction Layer
//!
//! Traits that chip-specific HALs implement so the guard logic and drivers
//! stay board-agnostic.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tripwire-drivers / tripwire-firmware   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tripwire-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tripwire-hal-rp2040                    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Digital I/O, PWM and I2C come from `embedded-hal` 1.0 directly; this
//! crate only covers what `embedded-hal` does not: wear-leveled key-value
//! storage for the guard secret.

#![no_std]
#![deny(unsafe_code)]

pub mod flash;

pub use flash::{FlashError, FlashStorage, StorageKey};
