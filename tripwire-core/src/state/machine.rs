//! Guard state definition

use crate::countdown::Countdown;

/// Guard states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuardState {
    /// Not armed (with or without a secret set)
    Idle,
    /// Armed, grace period or settle window running
    Countdown(Countdown),
    /// Grace period elapsed, motion sampling active
    Monitoring,
    /// Alarm sounding until the correct secret is entered
    Triggered,
}

impl GuardState {
    /// Check if the guard is armed but not yet triggered
    pub fn is_armed(&self) -> bool {
        matches!(self, GuardState::Countdown(_) | GuardState::Monitoring)
    }

    /// Check if a "go back" request must be swallowed
    pub fn swallows_back(&self) -> bool {
        !matches!(self, GuardState::Idle)
    }

    /// Check if the alarm actuator must be running
    pub fn alarm_active(&self) -> bool {
        matches!(self, GuardState::Triggered)
    }

    /// Check if this is the countdown state
    pub fn is_countdown(&self) -> bool {
        matches!(self, GuardState::Countdown(_))
    }

    /// Short name for logs and the panel
    pub fn name(&self) -> &'static str {
        match self {
            GuardState::Idle => "idle",
            GuardState::Countdown(_) => "countdown",
            GuardState::Monitoring => "monitoring",
            GuardState::Triggered => "triggered",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armed_states() {
        assert!(!GuardState::Idle.is_armed());
        assert!(GuardState::Countdown(Countdown::start(0)).is_armed());
        assert!(GuardState::Monitoring.is_armed());
        assert!(!GuardState::Triggered.is_armed());
    }

    #[test]
    fn test_back_swallowed_unless_idle() {
        assert!(!GuardState::Idle.swallows_back());
        assert!(GuardState::Countdown(Countdown::start(0)).swallows_back());
        assert!(GuardState::Monitoring.swallows_back());
        assert!(GuardState::Triggered.swallows_back());
    }

    #[test]
    fn test_alarm_only_when_triggered() {
        assert!(GuardState::Triggered.alarm_active());
        assert!(!GuardState::Monitoring.alarm_active());
        assert!(!GuardState::Idle.alarm_active());
    }

    #[test]
    fn test_names() {
        assert_eq!(GuardState::Idle.name(), "idle");
        assert_eq!(GuardState::Countdown(Countdown::start(5)).name(), "countdown");
        assert_eq!(GuardState::Triggered.name(), "triggered");
    }
}
