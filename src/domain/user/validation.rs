//! User validation and email normalization

use thiserror::Error;
use validator::ValidateEmail;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("User ID can only contain alphanumeric characters and hyphens")]
    InvalidIdCharacters,

    #[error("User ID cannot start or end with a hyphen")]
    InvalidIdFormat,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Display name cannot be empty")]
    EmptyName,

    #[error("Display name cannot exceed {0} characters")]
    NameTooLong(usize),
}

const MAX_USER_ID_LENGTH: usize = 50;
const MAX_DISPLAY_NAME_LENGTH: usize = 100;

/// Validate a user ID
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::IdTooLong(MAX_USER_ID_LENGTH));
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(UserValidationError::InvalidIdCharacters);
    }

    if id.starts_with('-') || id.ends_with('-') {
        return Err(UserValidationError::InvalidIdFormat);
    }

    Ok(())
}

/// Normalize an email address: trim surrounding whitespace and lowercase.
///
/// All membership and invitation comparisons operate on normalized emails.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a (normalized) email address syntactically
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(UserValidationError::InvalidEmail)
    }
}

/// Validate a display name
pub fn validate_display_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    if name.len() > MAX_DISPLAY_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong(MAX_DISPLAY_NAME_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_id() {
        assert!(validate_user_id("alice").is_ok());
        assert!(validate_user_id("user-123").is_ok());
    }

    #[test]
    fn test_invalid_user_id() {
        assert_eq!(validate_user_id(""), Err(UserValidationError::EmptyId));
        assert_eq!(
            validate_user_id("alice_b"),
            Err(UserValidationError::InvalidIdCharacters)
        );
        assert_eq!(
            validate_user_id("-alice"),
            Err(UserValidationError::InvalidIdFormat)
        );
    }

    #[test]
    fn test_user_id_too_long() {
        let long_id = "a".repeat(51);
        assert_eq!(
            validate_user_id(&long_id),
            Err(UserValidationError::IdTooLong(50))
        );
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Bob@X.COM "), "bob@x.com");
        assert_eq!(normalize_email("alice@example.com"), "alice@example.com");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("bob@x.com").is_ok());
        assert_eq!(
            validate_email("not-an-email"),
            Err(UserValidationError::InvalidEmail)
        );
        assert_eq!(validate_email(""), Err(UserValidationError::InvalidEmail));
    }

    #[test]
    fn test_validate_display_name() {
        assert!(validate_display_name("Alice").is_ok());
        assert_eq!(
            validate_display_name("   "),
            Err(UserValidationError::EmptyName)
        );
        assert_eq!(
            validate_display_name(&"a".repeat(101)),
            Err(UserValidationError::NameTooLong(100))
        );
    }
}
