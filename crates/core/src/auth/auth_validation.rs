use crate::auth::auth_model::{LoginRequest, RegisterRequest};
use crate::constants::MIN_PASSWORD_LENGTH;
use crate::errors::ValidationError;

/// Builds a login request from raw form input. The email is trimmed, the
/// password is taken as typed.
pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, ValidationError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Builds a registration request from raw form input.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
) -> Result<RegisterRequest, ValidationError> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingRegistrationFields);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}
