//! PWM piezo siren
//!
//! The PWM carrier sets the pitch (configured by the platform), the duty
//! cycle sets the loudness. A piezo is loudest at 50% duty, so volume maps
//! linearly onto 0-50%.

use embedded_hal::pwm::SetDutyCycle;
use tripwire_core::traits::{ActuatorError, Siren};

/// Piezo siren on a PWM channel
pub struct PwmSiren<P> {
    pwm: P,
    /// Volume (0-100)
    volume: u8,
    sounding: bool,
}

impl<P: SetDutyCycle> PwmSiren<P> {
    /// Create a silent siren
    pub fn new(mut pwm: P) -> Self {
        let _ = pwm.set_duty_cycle_fully_off();
        Self {
            pwm,
            volume: 100,
            sounding: false,
        }
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    fn apply(&mut self) -> Result<(), ActuatorError> {
        let result = if self.sounding && self.volume > 0 {
            self.pwm.set_duty_cycle_fraction(self.volume as u16, 200)
        } else {
            self.pwm.set_duty_cycle_fully_off()
        };
        result.map_err(|_| ActuatorError::Hardware)
    }
}

impl<P: SetDutyCycle> Siren for PwmSiren<P> {
    async fn set_volume(&mut self, percent: u8) -> Result<(), ActuatorError> {
        if percent > 100 {
            return Err(ActuatorError::InvalidRequest);
        }
        self.volume = percent;
        if self.sounding {
            self.apply()?;
        }
        Ok(())
    }

    async fn play_looped(&mut self) -> Result<(), ActuatorError> {
        self.sounding = true;
        self.apply()
    }

    async fn stop(&mut self) -> Result<(), ActuatorError> {
        self.sounding = false;
        self.apply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embedded_hal::pwm::{ErrorKind, ErrorType};

    struct MockPwm {
        duty: u16,
        broken: bool,
    }

    impl MockPwm {
        fn new() -> Self {
            Self {
                duty: 1234,
                broken: false,
            }
        }
    }

    impl ErrorType for MockPwm {
        type Error = ErrorKind;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_starts_silent() {
        let siren = PwmSiren::new(MockPwm::new());
        assert_eq!(siren.pwm.duty, 0);
        assert!(!siren.is_sounding());
    }

    #[test]
    fn test_full_volume_is_half_duty() {
        let mut siren = PwmSiren::new(MockPwm::new());
        block_on(siren.set_volume(100)).unwrap();
        block_on(siren.play_looped()).unwrap();
        assert_eq!(siren.pwm.duty, 500);
        assert!(siren.is_sounding());
    }

    #[test]
    fn test_volume_change_while_sounding() {
        let mut siren = PwmSiren::new(MockPwm::new());
        block_on(siren.play_looped()).unwrap();
        block_on(siren.set_volume(40)).unwrap();
        assert_eq!(siren.pwm.duty, 200);
    }

    #[test]
    fn test_volume_change_while_silent_stays_silent() {
        let mut siren = PwmSiren::new(MockPwm::new());
        block_on(siren.set_volume(80)).unwrap();
        assert_eq!(siren.pwm.duty, 0);
    }

    #[test]
    fn test_stop() {
        let mut siren = PwmSiren::new(MockPwm::new());
        block_on(siren.play_looped()).unwrap();
        block_on(siren.stop()).unwrap();
        assert_eq!(siren.pwm.duty, 0);
        assert!(!siren.is_sounding());
        // Idempotent
        block_on(siren.stop()).unwrap();
    }

    #[test]
    fn test_invalid_volume() {
        let mut siren = PwmSiren::new(MockPwm::new());
        assert_eq!(block_on(siren.set_volume(101)), Err(ActuatorError::InvalidRequest));
        assert_eq!(siren.volume(), 100);
    }

    #[test]
    fn test_hardware_error() {
        let mut pwm = MockPwm::new();
        pwm.broken = true;
        let mut siren = PwmSiren::new(pwm);
        assert_eq!(block_on(siren.play_looped()), Err(ActuatorError::Hardware));
    }
}
