//! Events fed to the guard machine
//!
//! User commands (arm, disarm, set secret, back) are not events; they are
//! handled by dedicated machine operations because they can fail. Events
//! come from timers, the motion sensor and the panel lifecycle.

use crate::countdown::Generation;
use crate::motion::AccelSample;

/// Panel lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// Foreground and interactive
    Active,
    /// Visible but not interactive (e.g. notification shade pulled down)
    Inactive,
    /// Not visible
    Background,
    /// About to be torn down
    Terminating,
}

impl Lifecycle {
    /// Foreground-active is the only state that does not count as tampering
    pub fn is_active(self) -> bool {
        matches!(self, Lifecycle::Active)
    }
}

/// Kinds of one-shot timers the machine schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerKind {
    /// One second countdown tick
    Tick,
    /// End of the settle window after countdown zero
    Settle,
}

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A scheduled timer expired
    TimerFired {
        kind: TimerKind,
        generation: Generation,
    },
    /// New accelerometer reading
    MotionSample(AccelSample),
    /// Panel lifecycle changed
    LifecycleChanged(Lifecycle),
    /// Motion sensor could not be subscribed or stopped answering
    SensorFault,
}

impl Event {
    /// Check if this event can only matter while armed
    pub fn is_tamper_signal(&self) -> bool {
        match self {
            Event::LifecycleChanged(lifecycle) => !lifecycle.is_active(),
            Event::SensorFault => true,
            _ => false,
        }
    }

    /// Check if this event comes from a timer
    pub fn is_timer_event(&self) -> bool {
        matches!(self, Event::TimerFired { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_is_active() {
        assert!(Lifecycle::Active.is_active());
        assert!(!Lifecycle::Inactive.is_active());
        assert!(!Lifecycle::Background.is_active());
        assert!(!Lifecycle::Terminating.is_active());
    }

    #[test]
    fn test_tamper_signals() {
        assert!(Event::LifecycleChanged(Lifecycle::Background).is_tamper_signal());
        assert!(Event::LifecycleChanged(Lifecycle::Inactive).is_tamper_signal());
        assert!(Event::LifecycleChanged(Lifecycle::Terminating).is_tamper_signal());
        assert!(Event::SensorFault.is_tamper_signal());
        assert!(!Event::LifecycleChanged(Lifecycle::Active).is_tamper_signal());
        assert!(!Event::MotionSample(AccelSample::REST).is_tamper_signal());
    }

    #[test]
    fn test_timer_events() {
        let event = Event::TimerFired {
            kind: TimerKind::Tick,
            generation: Generation::new(),
        };
        assert!(event.is_timer_event());
        assert!(!Event::SensorFault.is_timer_event());
    }
}
