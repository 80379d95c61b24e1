//! PWM slice timing
//!
//! The siren is a piezo driven by one PWM slice. Its pitch is set by the
//! slice clock divider and the wrap value (`top`):
//!
//! freq = SYS_CLK / (divider * (top + 1))
//!
//! The divider is an 8.4 fixed-point value, so it is computed in
//! sixteenths to keep the arithmetic in integers.

use embassy_rp::pwm::Config;
use fixed::types::extra::U4;
use fixed::FixedU16;

/// System clock frequency (default RP2040 clock)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Smallest divider the slice accepts (1.0 in 8.4 fixed point)
const MIN_DIVIDER_X16: u32 = 16;
/// Largest divider (255 + 15/16)
const MAX_DIVIDER_X16: u32 = 0xFFF;

/// Divider and wrap value for a tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Clock divider in sixteenths
    pub divider_x16: u16,
    /// Counter wrap value
    pub top: u16,
}

/// Calculate the divider and wrap value for a tone frequency
///
/// Uses the smallest divider that lets `top` fit in 16 bits, which keeps
/// the duty cycle resolution as fine as possible.
pub fn calc_pwm_timing(freq_hz: u32) -> PwmTiming {
    let freq_hz = freq_hz.max(1) as u64;
    let clk_x16 = SYS_CLK_HZ as u64 * 16;

    // divider_x16 >= clk_x16 / (freq * 65536), rounded up
    let span = freq_hz * 65_536;
    let divider_x16 = clk_x16.div_ceil(span) as u32;
    let divider_x16 = divider_x16.clamp(MIN_DIVIDER_X16, MAX_DIVIDER_X16);

    let counts = clk_x16 / (freq_hz * divider_x16 as u64);
    let top = counts.saturating_sub(1).min(u16::MAX as u64) as u16;

    PwmTiming {
        divider_x16: divider_x16 as u16,
        top,
    }
}

/// Slice configuration for a tone, output initially silent
pub fn tone_config(freq_hz: u32) -> Config {
    let timing = calc_pwm_timing(freq_hz);
    let mut config = Config::default();
    config.divider = FixedU16::<U4>::from_bits(timing.divider_x16);
    config.top = timing.top;
    config.compare_a = 0;
    config.compare_b = 0;
    config
}
