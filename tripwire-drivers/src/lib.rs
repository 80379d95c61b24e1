//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tripwire-core for the reference board:
//!
//! - Siren (piezo on a PWM output)
//! - Vibration motor (GPIO) and pattern playback
//! - Accelerometer (LIS3DH over I2C)
//! - Secret store (postcard record in flash)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod sensor;
pub mod siren;
pub mod storage;
pub mod vibration;
