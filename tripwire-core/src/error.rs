//! Guard error taxonomy
//!
//! Errors are terminal to the command that produced them. None of them
//! change the guard state, and none of them silence a triggered alarm.

/// Reasons a new secret is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationError {
    /// Fewer than the minimum number of characters
    TooShort,
    /// Confirmation entry differs
    Mismatch,
    /// Longer than the store can hold
    TooLong,
}

/// Alarm output that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Actuator {
    Siren,
    Vibrator,
}

/// Guard command errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuardError {
    /// New secret rejected
    Validation(ValidationError),
    /// No secret stored (arm or disarm attempted without one)
    SecretUnavailable,
    /// Wrong secret on disarm
    AuthMismatch,
    /// Siren or vibrator failed; the alarm state is unaffected
    ActuatorFault(Actuator),
    /// Command not meaningful in the current state
    InvalidState,
    /// Secret could not be written
    Storage,
}

impl GuardError {
    /// User-facing message for the panel
    pub fn message(&self) -> &'static str {
        match self {
            GuardError::Validation(ValidationError::TooShort) => {
                "Password must be at least 4 characters"
            }
            GuardError::Validation(ValidationError::Mismatch) => "Passwords do not match",
            GuardError::Validation(ValidationError::TooLong) => "Password is too long",
            GuardError::SecretUnavailable => "No password set",
            GuardError::AuthMismatch => "Incorrect password",
            GuardError::ActuatorFault(Actuator::Siren) => "Siren failed",
            GuardError::ActuatorFault(Actuator::Vibrator) => "Vibration failed",
            GuardError::InvalidState => "Not available right now",
            GuardError::Storage => "Could not save password",
        }
    }
}

impl From<ValidationError> for GuardError {
    fn from(err: ValidationError) -> Self {
        GuardError::Validation(err)
    }
}
