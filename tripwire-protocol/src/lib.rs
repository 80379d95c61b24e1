//! Panel link protocol
//!
//! This crate defines the UART protocol between the guard controller and
//! its panel (keypad, display and the app-style front end). The panel only
//! captures input and renders what it is told; every decision is made on
//! the controller.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CRC8 │
//! │ 0x7E  │ 1B     │ 1B   │ 0–160B      │ 1B   │
//! └───────┴────────┴──────┴─────────────┴──────┘
//! ```
//!
//! CRC8 is CRC-8/SMBUS (poly 0x07, init 0x00) over LENGTH, TYPE and PAYLOAD.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod codes;
pub mod crc;
pub mod frame;
pub mod messages;

pub use codes::{GuardStatus, LifecycleReport, NoticeCode};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{ControllerMessage, PanelMessage};
