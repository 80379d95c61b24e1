//! Grace period bookkeeping

use crate::config::{GRACE_PERIOD_S, SETTLE_WINDOW_MS, TICK_INTERVAL_MS};

/// Countdown phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownPhase {
    /// Seconds still counting down
    Ticking,
    /// Countdown reached zero, waiting out the settle window
    Settling,
}

/// Result of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountdownStep {
    /// One second elapsed, this many remain
    Ticked(u8),
    /// Remaining reached zero; the settle window starts now
    SettleStarted,
    /// Already settling, nothing to count
    Ignored,
}

/// Running countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    remaining_s: u8,
    started_at_ms: u64,
    phase: CountdownPhase,
}

impl Countdown {
    /// Start a fresh countdown at the full grace period
    pub fn start(now_ms: u64) -> Self {
        Self {
            remaining_s: GRACE_PERIOD_S,
            started_at_ms: now_ms,
            phase: CountdownPhase::Ticking,
        }
    }

    /// Advance by one tick
    pub fn tick(&mut self) -> CountdownStep {
        if self.phase == CountdownPhase::Settling {
            return CountdownStep::Ignored;
        }

        self.remaining_s = self.remaining_s.saturating_sub(1);
        if self.remaining_s == 0 {
            self.phase = CountdownPhase::Settling;
            CountdownStep::SettleStarted
        } else {
            CountdownStep::Ticked(self.remaining_s)
        }
    }

    /// Seconds left in the grace period
    pub fn remaining_s(&self) -> u8 {
        self.remaining_s
    }

    /// When the arm request was accepted
    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    pub fn is_settling(&self) -> bool {
        self.phase == CountdownPhase::Settling
    }

    /// Earliest time motion sampling may begin
    pub fn monitoring_at_ms(&self) -> u64 {
        self.started_at_ms
            + GRACE_PERIOD_S as u64 * TICK_INTERVAL_MS as u64
            + SETTLE_WINDOW_MS as u64
    }

    /// When the next timer is due: the next tick, or the end of the settle
    /// window once settling
    ///
    /// Deadlines are counted from the arm time, so late handling of one tick
    /// does not push back the ones after it.
    pub fn next_deadline_ms(&self) -> u64 {
        match self.phase {
            CountdownPhase::Ticking => {
                let ticks = (GRACE_PERIOD_S - self.remaining_s) as u64 + 1;
                self.started_at_ms + ticks * TICK_INTERVAL_MS as u64
            }
            CountdownPhase::Settling => self.monitoring_at_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_grace_period() {
        let countdown = Countdown::start(1234);
        assert_eq!(countdown.remaining_s(), 10);
        assert_eq!(countdown.started_at_ms(), 1234);
        assert_eq!(countdown.phase(), CountdownPhase::Ticking);
    }

    #[test]
    fn test_tenth_tick_starts_settle() {
        let mut countdown = Countdown::start(0);
        for expected in (1..10).rev() {
            assert_eq!(countdown.tick(), CountdownStep::Ticked(expected));
        }
        assert_eq!(countdown.tick(), CountdownStep::SettleStarted);
        assert_eq!(countdown.remaining_s(), 0);
        assert!(countdown.is_settling());
    }

    #[test]
    fn test_tick_while_settling_is_noop() {
        let mut countdown = Countdown::start(0);
        while countdown.tick() != CountdownStep::SettleStarted {}
        assert_eq!(countdown.tick(), CountdownStep::Ignored);
        assert_eq!(countdown.remaining_s(), 0);
    }

    #[test]
    fn test_remaining_never_increases() {
        let mut countdown = Countdown::start(0);
        let mut last = countdown.remaining_s();
        for _ in 0..20 {
            countdown.tick();
            assert!(countdown.remaining_s() <= last);
            last = countdown.remaining_s();
        }
    }

    #[test]
    fn test_monitoring_deadline() {
        let countdown = Countdown::start(5_000);
        assert_eq!(countdown.monitoring_at_ms(), 17_000);
    }

    #[test]
    fn test_deadlines_anchored_to_start() {
        let mut countdown = Countdown::start(5_000);
        assert_eq!(countdown.next_deadline_ms(), 6_000);
        for second in 2..=10u64 {
            countdown.tick();
            assert_eq!(countdown.next_deadline_ms(), 5_000 + second * 1000);
        }
        assert_eq!(countdown.tick(), CountdownStep::SettleStarted);
        assert_eq!(countdown.next_deadline_ms(), 17_000);
    }
}
