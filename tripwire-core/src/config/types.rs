//! Guard policy constants and alarm output settings
//!
//! The timing and detection policy is fixed at compile time. Only the alarm
//! output (siren volume, vibration pattern) is taken from `board.toml`.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grace period after arming, in seconds
pub const GRACE_PERIOD_S: u8 = 10;

/// Countdown tick interval
pub const TICK_INTERVAL_MS: u32 = 1000;

/// Settle window between countdown zero and motion sampling
pub const SETTLE_WINDOW_MS: u32 = 2000;

/// Motion sample period while monitoring
pub const SAMPLE_INTERVAL_MS: u32 = 500;

/// Per-axis deviation from rest that counts as motion (milli-g)
pub const MOTION_THRESHOLD_MG: i16 = 150;

/// Acceleration along Z when the device lies flat (milli-g)
pub const REST_Z_MG: i16 = 1000;

/// Minimum secret length in characters
pub const MIN_SECRET_LEN: usize = 4;

/// Maximum secret length in characters
pub const MAX_SECRET_LEN: usize = 32;

/// Secret storage capacity in bytes (UTF-8)
pub const SECRET_CAPACITY: usize = 64;

/// Maximum entries in a vibration pattern
pub const MAX_PATTERN_LEN: usize = 8;

/// Default vibration pattern: pause, buzz, pause (milliseconds)
pub const DEFAULT_VIBRATION_PATTERN_MS: [u16; 3] = [500, 500, 500];

/// Default siren volume
pub const DEFAULT_SIREN_VOLUME_PERCENT: u8 = 100;

/// Alarm output configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlarmConfig {
    /// Siren volume (1-100)
    pub volume_percent: u8,
    /// Vibration pattern in milliseconds, alternating off/on, starting with off
    pub pattern_ms: Vec<u16, MAX_PATTERN_LEN>,
    /// Repeat the pattern until cancelled
    pub repeat: bool,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        let mut pattern_ms = Vec::new();
        for step in DEFAULT_VIBRATION_PATTERN_MS {
            let _ = pattern_ms.push(step);
        }
        Self {
            volume_percent: DEFAULT_SIREN_VOLUME_PERCENT,
            pattern_ms,
            repeat: true,
        }
    }
}

impl AlarmConfig {
    /// Volume clamped to the valid 1-100 range
    ///
    /// The siren is never configured silent.
    pub fn volume(&self) -> u8 {
        self.volume_percent.clamp(1, 100)
    }

    /// Check that the pattern can actually vibrate
    ///
    /// A pattern needs at least one "on" entry (odd index) with a non-zero
    /// duration, otherwise the motor never runs.
    pub fn pattern_is_usable(&self) -> bool {
        self.pattern_ms
            .iter()
            .skip(1)
            .step_by(2)
            .any(|&on_ms| on_ms > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alarm_config() {
        let config = AlarmConfig::default();
        assert_eq!(config.volume(), 100);
        assert_eq!(config.pattern_ms.as_slice(), &[500, 500, 500]);
        assert!(config.repeat);
        assert!(config.pattern_is_usable());
    }

    #[test]
    fn test_volume_clamped() {
        let config = AlarmConfig {
            volume_percent: 250,
            ..Default::default()
        };
        assert_eq!(config.volume(), 100);

        let config = AlarmConfig {
            volume_percent: 0,
            ..Default::default()
        };
        assert_eq!(config.volume(), 1);
    }

    #[test]
    fn test_pattern_without_on_time() {
        let mut config = AlarmConfig::default();
        config.pattern_ms.clear();
        let _ = config.pattern_ms.push(500);
        assert!(!config.pattern_is_usable());

        let _ = config.pattern_ms.push(0);
        assert!(!config.pattern_is_usable());
    }

    #[test]
    fn test_total_arming_delay() {
        // Ten ticks plus the settle window
        let total_ms = GRACE_PERIOD_S as u32 * TICK_INTERVAL_MS + SETTLE_WINDOW_MS;
        assert_eq!(total_ms, 12_000);
    }
}
