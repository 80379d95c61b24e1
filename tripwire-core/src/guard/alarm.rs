//! Alarm actuator
//!
//! Drives the siren and the vibrator as one alarm. The two outputs are
//! independent: a siren that refuses to start must not keep the vibrator
//! quiet, so every call reaches both and the outcome is reported per output.

use crate::config::AlarmConfig;
use crate::error::{Actuator, GuardError};
use crate::traits::{ActuatorError, Siren, Vibrator};

/// Per-output result of starting or stopping the alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmReport {
    pub siren: Result<(), ActuatorError>,
    pub vibrator: Result<(), ActuatorError>,
}

impl AlarmReport {
    /// Report for a call that had nothing to do
    pub const fn unchanged() -> Self {
        Self {
            siren: Ok(()),
            vibrator: Ok(()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.siren.is_ok() && self.vibrator.is_ok()
    }

    /// First failed output, as a guard error
    pub fn fault(&self) -> Option<GuardError> {
        if self.siren.is_err() {
            Some(GuardError::ActuatorFault(Actuator::Siren))
        } else if self.vibrator.is_err() {
            Some(GuardError::ActuatorFault(Actuator::Vibrator))
        } else {
            None
        }
    }
}

/// Siren plus vibrator
pub struct AlarmActuator<S, V> {
    siren: S,
    vibrator: V,
    config: AlarmConfig,
    active: bool,
}

impl<S: Siren, V: Vibrator> AlarmActuator<S, V> {
    pub fn new(siren: S, vibrator: V, config: AlarmConfig) -> Self {
        Self {
            siren,
            vibrator,
            config,
            active: false,
        }
    }

    /// Whether the alarm is currently sounding
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start the siren (looped, configured volume) and the vibration pattern
    ///
    /// No-op while already active.
    pub async fn start(&mut self) -> AlarmReport {
        if self.active {
            return AlarmReport::unchanged();
        }
        self.active = true;

        let siren = match self.siren.set_volume(self.config.volume()).await {
            Ok(()) => self.siren.play_looped().await,
            Err(err) => {
                // Still try to sound at whatever level the output is at
                let _ = self.siren.play_looped().await;
                Err(err)
            }
        };
        let vibrator = self
            .vibrator
            .vibrate(&self.config.pattern_ms, self.config.repeat)
            .await;

        AlarmReport { siren, vibrator }
    }

    /// Stop the siren and cancel vibration
    ///
    /// No-op while inactive.
    pub async fn stop(&mut self) -> AlarmReport {
        if !self.active {
            return AlarmReport::unchanged();
        }
        self.active = false;

        let siren = self.siren.stop().await;
        let vibrator = self.vibrator.cancel().await;
        AlarmReport { siren, vibrator }
    }

    pub fn siren(&self) -> &S {
        &self.siren
    }

    pub fn vibrator(&self) -> &V {
        &self.vibrator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[derive(Default)]
    struct MockSiren {
        volume: Option<u8>,
        playing: bool,
        fail_volume: bool,
        fail_play: bool,
        play_calls: u32,
    }

    impl Siren for MockSiren {
        async fn set_volume(&mut self, percent: u8) -> Result<(), ActuatorError> {
            if self.fail_volume {
                return Err(ActuatorError::Hardware);
            }
            self.volume = Some(percent);
            Ok(())
        }

        async fn play_looped(&mut self) -> Result<(), ActuatorError> {
            self.play_calls += 1;
            if self.fail_play {
                return Err(ActuatorError::Hardware);
            }
            self.playing = true;
            Ok(())
        }

        async fn stop(&mut self) -> Result<(), ActuatorError> {
            self.playing = false;
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockVibrator {
        pattern: std::vec::Vec<u16>,
        repeat: bool,
        vibrating: bool,
    }

    impl Vibrator for MockVibrator {
        async fn vibrate(&mut self, pattern_ms: &[u16], repeat: bool) -> Result<(), ActuatorError> {
            self.pattern = pattern_ms.to_vec();
            self.repeat = repeat;
            self.vibrating = true;
            Ok(())
        }

        async fn cancel(&mut self) -> Result<(), ActuatorError> {
            self.vibrating = false;
            Ok(())
        }
    }

    fn actuator(siren: MockSiren) -> AlarmActuator<MockSiren, MockVibrator> {
        AlarmActuator::new(siren, MockVibrator::default(), AlarmConfig::default())
    }

    #[test]
    fn test_start_sounds_both_outputs() {
        let mut alarm = actuator(MockSiren::default());
        let report = block_on(alarm.start());

        assert!(report.is_ok());
        assert!(alarm.is_active());
        assert_eq!(alarm.siren().volume, Some(100));
        assert!(alarm.siren().playing);
        assert!(alarm.vibrator().vibrating);
        assert_eq!(alarm.vibrator().pattern, [500, 500, 500]);
        assert!(alarm.vibrator().repeat);
    }

    #[test]
    fn test_siren_fault_does_not_block_vibration() {
        let mut alarm = actuator(MockSiren {
            fail_play: true,
            ..Default::default()
        });
        let report = block_on(alarm.start());

        assert_eq!(report.siren, Err(ActuatorError::Hardware));
        assert!(report.vibrator.is_ok());
        assert_eq!(report.fault(), Some(GuardError::ActuatorFault(Actuator::Siren)));
        assert!(alarm.vibrator().vibrating);
    }

    #[test]
    fn test_volume_fault_still_plays() {
        let mut alarm = actuator(MockSiren {
            fail_volume: true,
            ..Default::default()
        });
        let report = block_on(alarm.start());
        assert!(report.siren.is_err());
        assert!(alarm.siren().playing);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut alarm = actuator(MockSiren::default());
        block_on(alarm.start());
        let report = block_on(alarm.start());
        assert_eq!(report, AlarmReport::unchanged());
        assert_eq!(alarm.siren().play_calls, 1);
    }

    #[test]
    fn test_stop_silences_everything() {
        let mut alarm = actuator(MockSiren::default());
        block_on(alarm.start());
        let report = block_on(alarm.stop());

        assert!(report.is_ok());
        assert!(!alarm.is_active());
        assert!(!alarm.siren().playing);
        assert!(!alarm.vibrator().vibrating);
    }

    #[test]
    fn test_stop_while_inactive_is_noop() {
        let mut alarm = actuator(MockSiren::default());
        assert_eq!(block_on(alarm.stop()), AlarmReport::unchanged());
    }
}
