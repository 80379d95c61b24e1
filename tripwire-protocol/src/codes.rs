//! Single-byte codes carried inside messages

/// Guard state as shown on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuardStatus {
    Idle,
    /// Countdown running
    Countdown,
    /// Countdown at zero, settle window running
    Settling,
    Monitoring,
    Triggered,
}

// Wire format values
const STATUS_IDLE: u8 = 0x00;
const STATUS_COUNTDOWN: u8 = 0x01;
const STATUS_SETTLING: u8 = 0x02;
const STATUS_MONITORING: u8 = 0x03;
const STATUS_TRIGGERED: u8 = 0x04;

impl GuardStatus {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            STATUS_IDLE => Some(GuardStatus::Idle),
            STATUS_COUNTDOWN => Some(GuardStatus::Countdown),
            STATUS_SETTLING => Some(GuardStatus::Settling),
            STATUS_MONITORING => Some(GuardStatus::Monitoring),
            STATUS_TRIGGERED => Some(GuardStatus::Triggered),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            GuardStatus::Idle => STATUS_IDLE,
            GuardStatus::Countdown => STATUS_COUNTDOWN,
            GuardStatus::Settling => STATUS_SETTLING,
            GuardStatus::Monitoring => STATUS_MONITORING,
            GuardStatus::Triggered => STATUS_TRIGGERED,
        }
    }
}

/// Panel lifecycle as reported by the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleReport {
    Active,
    Inactive,
    Background,
    Terminating,
}

const LIFECYCLE_ACTIVE: u8 = 0x00;
const LIFECYCLE_INACTIVE: u8 = 0x01;
const LIFECYCLE_BACKGROUND: u8 = 0x02;
const LIFECYCLE_TERMINATING: u8 = 0x03;

impl LifecycleReport {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            LIFECYCLE_ACTIVE => Some(LifecycleReport::Active),
            LIFECYCLE_INACTIVE => Some(LifecycleReport::Inactive),
            LIFECYCLE_BACKGROUND => Some(LifecycleReport::Background),
            LIFECYCLE_TERMINATING => Some(LifecycleReport::Terminating),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            LifecycleReport::Active => LIFECYCLE_ACTIVE,
            LifecycleReport::Inactive => LIFECYCLE_INACTIVE,
            LifecycleReport::Background => LIFECYCLE_BACKGROUND,
            LifecycleReport::Terminating => LIFECYCLE_TERMINATING,
        }
    }
}

/// Result notices shown to the user
///
/// `0x0_` success, `0x1_` secret validation, `0x2_` command errors,
/// `0x3_` hardware faults, `0x4_` link errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoticeCode {
    SecretSaved,
    Disarmed,
    SecretTooShort,
    SecretMismatch,
    SecretTooLong,
    SecretUnavailable,
    AuthMismatch,
    InvalidState,
    StorageFailed,
    SirenFault,
    VibratorFault,
    Malformed,
}

const NOTICE_SECRET_SAVED: u8 = 0x01;
const NOTICE_DISARMED: u8 = 0x02;
const NOTICE_SECRET_TOO_SHORT: u8 = 0x10;
const NOTICE_SECRET_MISMATCH: u8 = 0x11;
const NOTICE_SECRET_TOO_LONG: u8 = 0x12;
const NOTICE_SECRET_UNAVAILABLE: u8 = 0x20;
const NOTICE_AUTH_MISMATCH: u8 = 0x21;
const NOTICE_INVALID_STATE: u8 = 0x22;
const NOTICE_STORAGE_FAILED: u8 = 0x23;
const NOTICE_SIREN_FAULT: u8 = 0x30;
const NOTICE_VIBRATOR_FAULT: u8 = 0x31;
const NOTICE_MALFORMED: u8 = 0x40;

impl NoticeCode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            NOTICE_SECRET_SAVED => Some(NoticeCode::SecretSaved),
            NOTICE_DISARMED => Some(NoticeCode::Disarmed),
            NOTICE_SECRET_TOO_SHORT => Some(NoticeCode::SecretTooShort),
            NOTICE_SECRET_MISMATCH => Some(NoticeCode::SecretMismatch),
            NOTICE_SECRET_TOO_LONG => Some(NoticeCode::SecretTooLong),
            NOTICE_SECRET_UNAVAILABLE => Some(NoticeCode::SecretUnavailable),
            NOTICE_AUTH_MISMATCH => Some(NoticeCode::AuthMismatch),
            NOTICE_INVALID_STATE => Some(NoticeCode::InvalidState),
            NOTICE_STORAGE_FAILED => Some(NoticeCode::StorageFailed),
            NOTICE_SIREN_FAULT => Some(NoticeCode::SirenFault),
            NOTICE_VIBRATOR_FAULT => Some(NoticeCode::VibratorFault),
            NOTICE_MALFORMED => Some(NoticeCode::Malformed),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            NoticeCode::SecretSaved => NOTICE_SECRET_SAVED,
            NoticeCode::Disarmed => NOTICE_DISARMED,
            NoticeCode::SecretTooShort => NOTICE_SECRET_TOO_SHORT,
            NoticeCode::SecretMismatch => NOTICE_SECRET_MISMATCH,
            NoticeCode::SecretTooLong => NOTICE_SECRET_TOO_LONG,
            NoticeCode::SecretUnavailable => NOTICE_SECRET_UNAVAILABLE,
            NoticeCode::AuthMismatch => NOTICE_AUTH_MISMATCH,
            NoticeCode::InvalidState => NOTICE_INVALID_STATE,
            NoticeCode::StorageFailed => NOTICE_STORAGE_FAILED,
            NoticeCode::SirenFault => NOTICE_SIREN_FAULT,
            NoticeCode::VibratorFault => NOTICE_VIBRATOR_FAULT,
            NoticeCode::Malformed => NOTICE_MALFORMED,
        }
    }

    /// Returns true if this notice reports a failure
    pub fn is_error(&self) -> bool {
        self.to_byte() >= 0x10
    }

    /// Returns true if this notice reports broken hardware
    pub fn is_fault(&self) -> bool {
        matches!(self, NoticeCode::SirenFault | NoticeCode::VibratorFault)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bytes() {
        for byte in 0..=4 {
            let status = GuardStatus::from_byte(byte).unwrap();
            assert_eq!(status.to_byte(), byte);
        }
        assert_eq!(GuardStatus::from_byte(5), None);
    }

    #[test]
    fn test_lifecycle_bytes() {
        assert_eq!(LifecycleReport::from_byte(2), Some(LifecycleReport::Background));
        assert_eq!(LifecycleReport::from_byte(3), Some(LifecycleReport::Terminating));
        assert_eq!(LifecycleReport::from_byte(4), None);
    }

    #[test]
    fn test_notice_classes() {
        assert!(!NoticeCode::SecretSaved.is_error());
        assert!(!NoticeCode::Disarmed.is_error());
        assert!(NoticeCode::AuthMismatch.is_error());
        assert!(NoticeCode::SirenFault.is_fault());
        assert!(!NoticeCode::Malformed.is_fault());
    }

    #[test]
    fn test_unknown_notice() {
        assert_eq!(NoticeCode::from_byte(0x00), None);
        assert_eq!(NoticeCode::from_byte(0xFF), None);
    }
}
