//! Alarm output traits

use core::future::Future;

/// Errors from an alarm output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorError {
    /// Output pin or PWM slice rejected the request
    Hardware,
    /// Request not valid for this output (e.g. empty pattern)
    InvalidRequest,
    /// Output task is not accepting commands
    Busy,
}

/// Continuous alarm tone
///
/// `play_looped` keeps sounding until `stop`. Both are idempotent.
pub trait Siren {
    /// Set the output level (0-100)
    fn set_volume(&mut self, percent: u8) -> impl Future<Output = Result<(), ActuatorError>>;

    /// Start the tone, looping until stopped
    fn play_looped(&mut self) -> impl Future<Output = Result<(), ActuatorError>>;

    /// Silence the tone
    fn stop(&mut self) -> impl Future<Output = Result<(), ActuatorError>>;
}

/// Vibration motor
pub trait Vibrator {
    /// Play a pattern of alternating off/on durations in milliseconds
    ///
    /// The first entry is a pause. With `repeat` the pattern loops until
    /// `cancel` is called.
    fn vibrate(
        &mut self,
        pattern_ms: &[u16],
        repeat: bool,
    ) -> impl Future<Output = Result<(), ActuatorError>>;

    /// Stop vibrating
    fn cancel(&mut self) -> impl Future<Output = Result<(), ActuatorError>>;
}
