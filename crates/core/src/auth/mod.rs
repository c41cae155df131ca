//! Auth module - login/registration DTOs and form checks.

mod auth_model;
mod auth_validation;

pub use auth_model::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use auth_validation::{validate_login, validate_registration};
