//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("User ID contains invalid character: '{0}'. Only alphanumeric characters, underscores and hyphens are allowed")]
    InvalidIdCharacter(char),

    #[error("Name is required")]
    EmptyName,

    #[error("Name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Please provide a valid email")]
    InvalidEmail,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
}

const MAX_USER_ID_LENGTH: usize = 64;
const MAX_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 254;
const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate a user ID
///
/// User IDs end up inside cache keys and invalidation patterns, so only
/// alphanumerics, `_` and `-` are accepted. Glob metacharacters never reach
/// a pattern.
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::IdTooLong(MAX_USER_ID_LENGTH));
    }

    if let Some(c) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(UserValidationError::InvalidIdCharacter(c));
    }

    Ok(())
}

/// Returns the trimmed name
pub fn validate_name(name: &str) -> Result<String, UserValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(UserValidationError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong(MAX_NAME_LENGTH));
    }
    Ok(name.to_string())
}

/// Returns the trimmed, lowercased address if it looks like `local@domain.tld`
pub fn normalize_email(email: &str) -> Result<String, UserValidationError> {
    let email = email.trim().to_lowercase();

    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH || email.contains(char::is_whitespace) {
        return Err(UserValidationError::InvalidEmail);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(UserValidationError::InvalidEmail);
    };

    let domain_ok = domain.contains('.')
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if local.is_empty() || !domain_ok {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(email)
}

pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_ids() {
        assert!(validate_user_id("user-1").is_ok());
        assert!(validate_user_id("64b7f0c2e1d3a4b5c6d7e8f9").is_ok());
        assert!(validate_user_id("a_b").is_ok());
    }

    #[test]
    fn test_empty_user_id() {
        assert_eq!(validate_user_id(""), Err(UserValidationError::EmptyId));
    }

    #[test]
    fn test_user_id_too_long() {
        let id = "a".repeat(65);
        assert_eq!(
            validate_user_id(&id),
            Err(UserValidationError::IdTooLong(64))
        );
    }

    #[test]
    fn test_glob_characters_rejected() {
        assert_eq!(
            validate_user_id("user*"),
            Err(UserValidationError::InvalidIdCharacter('*'))
        );
        assert_eq!(
            validate_user_id("user:1"),
            Err(UserValidationError::InvalidIdCharacter(':'))
        );
        assert!(validate_user_id("user[1]").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Dev@Example.com ").unwrap(),
            "dev@example.com"
        );
        for invalid in ["", "dev", "@example.com", "dev@example", "dev@.com", "a@b@c.com", "d ev@x.io"] {
            assert_eq!(
                normalize_email(invalid),
                Err(UserValidationError::InvalidEmail),
                "{}",
                invalid
            );
        }
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Ravi ").unwrap(), "Ravi");
        assert_eq!(validate_name("   "), Err(UserValidationError::EmptyName));
        assert_eq!(
            validate_name(&"x".repeat(101)),
            Err(UserValidationError::NameTooLong(100))
        );
    }
}
