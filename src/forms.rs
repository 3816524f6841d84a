//! Client-side form validation for the login and signup flows.
//!
//! These checks run before any network call and surface as inline field
//! messages; they never propagate past the form that triggered them.

use thiserror::Error;

/// Minimum accepted password length
const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Minimal email shape check: one `@` with non-empty local part and a dotted
/// domain, no whitespace. Deliverability is the backend's problem.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !is_plausible_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_signup(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    if email.is_empty() || password.is_empty() || confirm_password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !is_plausible_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_plausible_email("anna.larsson@example.com"));
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("annaexample.com")); // no @
        assert!(!is_plausible_email("@example.com")); // empty local part
        assert!(!is_plausible_email("anna@example")); // no dot in domain
        assert!(!is_plausible_email("anna larsson@example.com")); // whitespace
        assert!(!is_plausible_email("anna@@example.com"));
    }

    #[test]
    fn test_validate_login() {
        assert_eq!(validate_login("", "secret"), Err(ValidationError::MissingFields));
        assert_eq!(
            validate_login("not-an-email", "secret"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(validate_login("anna@example.com", "secret"), Ok(()));
    }

    #[test]
    fn test_validate_signup() {
        assert_eq!(
            validate_signup("anna@example.com", "short", "short"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            validate_signup("anna@example.com", "secret1", "secret2"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_signup("anna@example.com", "", ""),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(validate_signup("anna@example.com", "secret1", "secret1"), Ok(()));
    }
}
