//! Board-agnostic guard logic for the Tripwire motion alarm
//!
//! Everything that decides *when* the alarm sounds lives here, with no
//! dependency on a particular board:
//!
//! - Guard state machine (arm, countdown, settle, monitor, trigger, disarm)
//! - Countdown bookkeeping and timer generations
//! - Motion threshold detection
//! - Secret validation rules
//! - Collaborator traits (secret store, siren, vibrator, motion sensor, timers)
//! - The serialized controller that applies state machine effects
//! - Board configuration types and the `board.toml` parser

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod countdown;
pub mod error;
pub mod guard;
pub mod motion;
pub mod secret;
pub mod state;
pub mod traits;

pub use error::GuardError;
