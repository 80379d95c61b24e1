//! Board configuration types
//!
//! Describes the peripherals hanging off the controller board. Pin
//! assignments are fixed by the board layout and live in the firmware; this
//! only carries the settings that differ between builds.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::AlarmConfig;

/// Current board config format version
pub const BOARD_CONFIG_VERSION: u8 = 1;

/// Default LIS3DH I2C address (SA0 pulled high)
pub const DEFAULT_ACCEL_ADDRESS: u8 = 0x19;

/// Siren (piezo/buzzer) configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SirenHwConfig {
    /// PWM carrier frequency in Hz (the tone of the siren)
    pub frequency_hz: u32,
}

impl Default for SirenHwConfig {
    fn default() -> Self {
        Self { frequency_hz: 3_100 }
    }
}

/// Vibration motor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VibrationHwConfig {
    /// Motor driver is active-low
    pub active_low: bool,
}

/// Accelerometer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccelHwConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// I2C bus frequency in Hz
    pub bus_frequency_hz: u32,
    /// Consecutive failed reads before the sensor is reported faulty
    pub max_read_failures: u8,
}

impl Default for AccelHwConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ACCEL_ADDRESS,
            bus_frequency_hz: 400_000,
            max_read_failures: 3,
        }
    }
}

/// Panel UART link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelHwConfig {
    /// Baud rate
    pub baud: u32,
}

impl Default for PanelHwConfig {
    fn default() -> Self {
        Self { baud: 115_200 }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// Config format version
    pub version: u8,
    pub siren: SirenHwConfig,
    pub vibration: VibrationHwConfig,
    pub accelerometer: AccelHwConfig,
    pub panel: PanelHwConfig,
    pub alarm: AlarmConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardConfig {
    /// Board config with every section at its default
    pub fn new() -> Self {
        Self {
            version: BOARD_CONFIG_VERSION,
            siren: SirenHwConfig::default(),
            vibration: VibrationHwConfig::default(),
            accelerometer: AccelHwConfig::default(),
            panel: PanelHwConfig::default(),
            alarm: AlarmConfig::default(),
        }
    }
}
