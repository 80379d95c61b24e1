//! Vibration pattern playback
//!
//! Patterns are lists of durations in milliseconds that alternate between
//! off and on, starting with off: `[500, 500, 500]` waits half a second,
//! buzzes for half a second, then waits again. A repeating pattern starts
//! over from the first entry.

use heapless::Vec;
use tripwire_core::config::MAX_PATTERN_LEN;
use tripwire_core::traits::ActuatorError;

/// Validated vibration pattern
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VibrationPattern {
    steps_ms: Vec<u16, MAX_PATTERN_LEN>,
    repeat: bool,
}

impl VibrationPattern {
    /// Build a pattern, rejecting ones that never switch the motor on
    ///
    /// A repeating pattern must also have a non-zero total length, or
    /// playback would spin without ever waiting.
    pub fn new(steps_ms: &[u16], repeat: bool) -> Result<Self, ActuatorError> {
        let steps_ms = Vec::from_slice(steps_ms).map_err(|_| ActuatorError::InvalidRequest)?;
        let has_on_time = steps_ms.iter().skip(1).step_by(2).any(|&ms| ms > 0);
        if !has_on_time {
            return Err(ActuatorError::InvalidRequest);
        }
        Ok(Self { steps_ms, repeat })
    }

    pub fn steps_ms(&self) -> &[u16] {
        &self.steps_ms
    }

    pub fn repeats(&self) -> bool {
        self.repeat
    }

    /// Length of one pass through the pattern
    pub fn period_ms(&self) -> u32 {
        self.steps_ms.iter().map(|&ms| ms as u32).sum()
    }
}

/// One step of playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PatternStep {
    /// Motor state for this step
    pub on: bool,
    /// How long to hold it
    pub duration_ms: u16,
}

/// Walks a pattern step by step
#[derive(Debug, Clone)]
pub struct PatternPlayer {
    pattern: VibrationPattern,
    index: usize,
}

impl PatternPlayer {
    pub fn new(pattern: VibrationPattern) -> Self {
        Self { pattern, index: 0 }
    }

    /// Next step, `None` when a one-shot pattern is done
    pub fn next_step(&mut self) -> Option<PatternStep> {
        if self.index >= self.pattern.steps_ms.len() {
            if !self.pattern.repeat {
                return None;
            }
            self.index = 0;
        }

        let step = PatternStep {
            on: self.index % 2 == 1,
            duration_ms: self.pattern.steps_ms[self.index],
        };
        self.index += 1;
        Some(step)
    }

    pub fn pattern(&self) -> &VibrationPattern {
        &self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(on: bool, duration_ms: u16) -> Option<PatternStep> {
        Some(PatternStep { on, duration_ms })
    }

    #[test]
    fn test_off_on_alternation() {
        let pattern = VibrationPattern::new(&[500, 500, 500], false).unwrap();
        let mut player = PatternPlayer::new(pattern);
        assert_eq!(player.next_step(), step(false, 500));
        assert_eq!(player.next_step(), step(true, 500));
        assert_eq!(player.next_step(), step(false, 500));
        assert_eq!(player.next_step(), None);
    }

    #[test]
    fn test_repeat_starts_over() {
        let pattern = VibrationPattern::new(&[100, 200, 300], true).unwrap();
        let mut player = PatternPlayer::new(pattern);
        for _ in 0..3 {
            player.next_step();
        }
        assert_eq!(player.next_step(), step(false, 100));
        assert_eq!(player.next_step(), step(true, 200));
    }

    #[test]
    fn test_rejects_pattern_without_on_time() {
        assert_eq!(VibrationPattern::new(&[], true), Err(ActuatorError::InvalidRequest));
        assert_eq!(VibrationPattern::new(&[500], true), Err(ActuatorError::InvalidRequest));
        assert_eq!(
            VibrationPattern::new(&[500, 0, 500], true),
            Err(ActuatorError::InvalidRequest)
        );
    }

    #[test]
    fn test_rejects_oversized_pattern() {
        let long = [100u16; MAX_PATTERN_LEN + 1];
        assert_eq!(VibrationPattern::new(&long, false), Err(ActuatorError::InvalidRequest));
    }

    #[test]
    fn test_period() {
        let pattern = VibrationPattern::new(&[500, 500, 500], true).unwrap();
        assert_eq!(pattern.period_ms(), 1500);
    }
}
