//! GPIO vibration motor
//!
//! An ERM motor switched by a transistor or driver IC on one GPIO. The pin
//! can be configured as active-high (default) or active-low.

use embedded_hal::digital::OutputPin;
use tripwire_core::traits::ActuatorError;

/// Vibration motor on a GPIO pin
pub struct VibrationMotor<P> {
    pin: P,
    /// If true, motor ON = pin LOW
    active_low: bool,
    on: bool,
}

impl<P: OutputPin> VibrationMotor<P> {
    /// Create a motor output, initially off
    pub fn new(pin: P, active_low: bool) -> Self {
        let mut motor = Self {
            pin,
            active_low,
            on: false,
        };
        let _ = motor.set_on(false);
        motor
    }

    /// Switch the motor on or off
    pub fn set_on(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.on = on;
        let result = if on != self.active_low {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        result.map_err(|_| ActuatorError::Hardware)
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
