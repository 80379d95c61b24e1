//! Vibration motor output and pattern playback

pub mod motor;
pub mod pattern;

pub use motor::VibrationMotor;
pub use pattern::{PatternPlayer, PatternStep, VibrationPattern};
