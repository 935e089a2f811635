//! Field validators for the sign-in and sign-up forms
//!
//! Each validator returns the first rule a value breaks. Rules are checked in a
//! fixed priority order, so e.g. a password missing a digit reports the digit
//! even when it also lacks an upper-case letter.

use thiserror::Error;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_DISPLAY_NAME_LENGTH: usize = 2;
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A single field-level rule violation. Never sent anywhere; shown inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("Username can only contain letters, numbers, underscores, and hyphens")]
    InvalidUsernameCharacters,
    #[error("Please enter a valid email")]
    InvalidEmail,
    #[error("Password must contain at least one digit")]
    MissingDigit,
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,
}

/// Login identifier: username or email, anything non-blank
pub fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required("Email or username"));
    }
    Ok(())
}

pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required("Username"));
    }
    if trimmed.chars().count() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::TooShort {
            field: "Username",
            min: MIN_USERNAME_LENGTH,
        });
    }
    // Checked on the raw value: surrounding spaces are not allowed either.
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::InvalidUsernameCharacters);
    }
    Ok(())
}

pub fn validate_display_name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required("Name"));
    }
    if trimmed.chars().count() < MIN_DISPLAY_NAME_LENGTH {
        return Err(ValidationError::TooShort {
            field: "Name",
            min: MIN_DISPLAY_NAME_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required("Email"));
    }
    if !is_email_shaped(value.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside the domain
fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Sign-in only needs a password to be present
pub fn validate_login_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required("Password"));
    }
    Ok(())
}

/// New passwords: length, then digit, then upper-case, then lower-case
pub fn validate_new_password(value: &str) -> Result<(), ValidationError> {
    validate_login_password(value)?;
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "Password",
            min: MIN_PASSWORD_LENGTH,
        });
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::MissingDigit);
    }
    if !value.chars().any(char::is_uppercase) {
        return Err(ValidationError::MissingUppercase);
    }
    if !value.chars().any(char::is_lowercase) {
        return Err(ValidationError::MissingLowercase);
    }
    Ok(())
}
