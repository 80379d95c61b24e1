//! Translation between guard types and panel protocol codes

use tripwire_core::error::{Actuator, GuardError, ValidationError};
use tripwire_core::guard::GuardMachine;
use tripwire_core::state::{GuardState, Lifecycle};
use tripwire_protocol::{ControllerMessage, GuardStatus, LifecycleReport, NoticeCode};

/// Status message for the current machine state
pub fn status_message(machine: &GuardMachine) -> ControllerMessage {
    let status = match machine.state() {
        GuardState::Idle => GuardStatus::Idle,
        GuardState::Countdown(countdown) if countdown.is_settling() => GuardStatus::Settling,
        GuardState::Countdown(_) => GuardStatus::Countdown,
        GuardState::Monitoring => GuardStatus::Monitoring,
        GuardState::Triggered => GuardStatus::Triggered,
    };
    ControllerMessage::Status {
        status,
        remaining_s: machine.remaining_s(),
    }
}

pub fn notice_for(error: GuardError) -> NoticeCode {
    match error {
        GuardError::Validation(ValidationError::TooShort) => NoticeCode::SecretTooShort,
        GuardError::Validation(ValidationError::Mismatch) => NoticeCode::SecretMismatch,
        GuardError::Validation(ValidationError::TooLong) => NoticeCode::SecretTooLong,
        GuardError::SecretUnavailable => NoticeCode::SecretUnavailable,
        GuardError::AuthMismatch => NoticeCode::AuthMismatch,
        GuardError::ActuatorFault(Actuator::Siren) => NoticeCode::SirenFault,
        GuardError::ActuatorFault(Actuator::Vibrator) => NoticeCode::VibratorFault,
        GuardError::InvalidState => NoticeCode::InvalidState,
        GuardError::Storage => NoticeCode::StorageFailed,
    }
}

pub fn lifecycle_from(report: LifecycleReport) -> Lifecycle {
    match report {
        LifecycleReport::Active => Lifecycle::Active,
        LifecycleReport::Inactive => Lifecycle::Inactive,
        LifecycleReport::Background => Lifecycle::Background,
        LifecycleReport::Terminating => Lifecycle::Terminating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_status() {
        let machine = GuardMachine::new();
        assert_eq!(
            status_message(&machine),
            ControllerMessage::Status {
                status: GuardStatus::Idle,
                remaining_s: 10,
            }
        );
    }

    #[test]
    fn test_every_error_has_an_error_notice() {
        let errors = [
            GuardError::Validation(ValidationError::TooShort),
            GuardError::Validation(ValidationError::Mismatch),
            GuardError::Validation(ValidationError::TooLong),
            GuardError::SecretUnavailable,
            GuardError::AuthMismatch,
            GuardError::ActuatorFault(Actuator::Siren),
            GuardError::ActuatorFault(Actuator::Vibrator),
            GuardError::InvalidState,
            GuardError::Storage,
        ];
        for error in errors {
            assert!(notice_for(error).is_error());
        }
    }
}
