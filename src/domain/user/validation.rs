//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username is too short. Minimum length is {0} characters")]
    UsernameTooShort(usize),

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username contains invalid character: '{0}'. Only alphanumeric characters, underscores, and hyphens are allowed")]
    InvalidUsernameCharacter(char),

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),

    #[error("Full name cannot be empty")]
    EmptyFullName,

    #[error("Full name exceeds maximum length of {0} characters")]
    FullNameTooLong(usize),
}

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_FULL_NAME_LENGTH: usize = 100;

/// Validate a username
///
/// Rules:
/// - Cannot be empty
/// - Minimum 3 characters
/// - Maximum 50 characters
/// - Only alphanumeric characters, underscores, and hyphens
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if username.len() < MIN_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooShort(MIN_USERNAME_LENGTH));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    for c in username.chars() {
        if !c.is_ascii_alphanumeric() && c != '_' && c != '-' {
            return Err(UserValidationError::InvalidUsernameCharacter(c));
        }
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Minimum 8 characters
/// - Maximum 128 characters
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Validate a full name
///
/// Rules:
/// - Cannot be empty
/// - Maximum 100 characters
pub fn validate_full_name(full_name: &str) -> Result<(), UserValidationError> {
    if full_name.trim().is_empty() {
        return Err(UserValidationError::EmptyFullName);
    }

    if full_name.len() > MAX_FULL_NAME_LENGTH {
        return Err(UserValidationError::FullNameTooLong(MAX_FULL_NAME_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Username tests
    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("user_name").is_ok());
        assert!(validate_username("user-name").is_ok());
        assert!(validate_username("User123").is_ok());
    }

    #[test]
    fn test_empty_username() {
        assert_eq!(
            validate_username(""),
            Err(UserValidationError::EmptyUsername)
        );
    }

    #[test]
    fn test_username_too_short() {
        assert_eq!(
            validate_username("ab"),
            Err(UserValidationError::UsernameTooShort(3))
        );
    }

    #[test]
    fn test_username_too_long() {
        let long_username = "a".repeat(51);
        assert_eq!(
            validate_username(&long_username),
            Err(UserValidationError::UsernameTooLong(50))
        );
    }

    #[test]
    fn test_username_invalid_character() {
        assert_eq!(
            validate_username("user@name"),
            Err(UserValidationError::InvalidUsernameCharacter('@'))
        );
    }

    // Password tests
    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("P@ssw0rd!").is_ok());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        assert_eq!(
            validate_password("1234567"),
            Err(UserValidationError::PasswordTooShort(8))
        );
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(129);
        assert_eq!(
            validate_password(&long_password),
            Err(UserValidationError::PasswordTooLong(128))
        );
    }

    // Full name tests
    #[test]
    fn test_valid_full_names() {
        assert!(validate_full_name("John Doe").is_ok());
        assert!(validate_full_name("J").is_ok());
    }

    #[test]
    fn test_empty_full_name() {
        assert_eq!(
            validate_full_name(""),
            Err(UserValidationError::EmptyFullName)
        );
        assert_eq!(
            validate_full_name("   "),
            Err(UserValidationError::EmptyFullName)
        );
    }

    #[test]
    fn test_full_name_too_long() {
        let long_name = "a".repeat(101);
        assert_eq!(
            validate_full_name(&long_name),
            Err(UserValidationError::FullNameTooLong(100))
        );
    }
}
