//! Secret rules
//!
//! The secret is the only thing that survives a restart. It is compared by
//! exact string equality; there is no hashing because the store is local
//! flash on the same chip.

use heapless::String;

use crate::config::{MAX_SECRET_LEN, MIN_SECRET_LEN, SECRET_CAPACITY};
use crate::error::ValidationError;

/// Stored secret
pub type Secret = String<SECRET_CAPACITY>;

/// Validate a new secret and its confirmation entry
///
/// Checks run in a fixed order: length first, then the confirmation, then
/// storage capacity.
pub fn validate_new_secret(first: &str, confirm: &str) -> Result<Secret, ValidationError> {
    let chars = first.chars().count();
    if chars < MIN_SECRET_LEN {
        return Err(ValidationError::TooShort);
    }
    if first != confirm {
        return Err(ValidationError::Mismatch);
    }
    if chars > MAX_SECRET_LEN {
        return Err(ValidationError::TooLong);
    }

    let mut secret = Secret::new();
    secret
        .push_str(first)
        .map_err(|_| ValidationError::TooLong)?;
    Ok(secret)
}

/// Compare a disarm candidate against the stored secret
pub fn secrets_match(candidate: &str, stored: &str) -> bool {
    candidate == stored
}

/// Copy a string into a [`Secret`], if it fits
pub fn to_secret(value: &str) -> Option<Secret> {
    let mut secret = Secret::new();
    secret.push_str(value).ok()?;
    Some(secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_secret() {
        let secret = validate_new_secret("hunter2", "hunter2").unwrap();
        assert_eq!(secret.as_str(), "hunter2");
    }

    #[test]
    fn test_minimum_length() {
        assert_eq!(validate_new_secret("abc", "abc"), Err(ValidationError::TooShort));
        assert!(validate_new_secret("abcd", "abcd").is_ok());
    }

    #[test]
    fn test_too_short_reported_before_mismatch() {
        assert_eq!(validate_new_secret("ab", "xy"), Err(ValidationError::TooShort));
    }

    #[test]
    fn test_mismatch() {
        assert_eq!(validate_new_secret("abcd", "abce"), Err(ValidationError::Mismatch));
    }

    #[test]
    fn test_too_long() {
        let long = "a".repeat(33);
        assert_eq!(validate_new_secret(&long, &long), Err(ValidationError::TooLong));
        let max = "a".repeat(32);
        assert!(validate_new_secret(&max, &max).is_ok());
    }

    #[test]
    fn test_length_counts_characters() {
        // Four characters, eight bytes
        assert!(validate_new_secret("ßßßß", "ßßßß").is_ok());
        // Three characters, still too short despite nine bytes
        assert_eq!(validate_new_secret("€€€", "€€€"), Err(ValidationError::TooShort));
    }

    #[test]
    fn test_wide_characters_exceed_capacity() {
        // 17 four-byte characters fit the character limit but not the store
        let wide = "😀".repeat(17);
        assert_eq!(validate_new_secret(&wide, &wide), Err(ValidationError::TooLong));
    }

    #[test]
    fn test_exact_match() {
        assert!(secrets_match("1234", "1234"));
        assert!(!secrets_match("1234 ", "1234"));
        assert!(!secrets_match("ABCD", "abcd"));
        assert!(!secrets_match("", "1234"));
    }

    #[test]
    fn test_to_secret_capacity() {
        assert!(to_secret("short").is_some());
        assert!(to_secret(&"x".repeat(65)).is_none());
    }
}
