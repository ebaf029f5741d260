// src/validation.rs

use serde::Serialize;
use validator::ValidateEmail;

use crate::models::user::{LoginRequest, RegisterRequest};

pub const MSG_REQUIRED: &str = "This field is required";
pub const MSG_USERNAME_LENGTH: &str = "Field must be between 1 and 40 characters long";
pub const MSG_REVIEW_LENGTH: &str = "Field must be between 5 and 500 characters long";
pub const MSG_INVALID_EMAIL: &str = "Invalid email address.";
pub const MSG_CONFIRM_MISMATCH: &str = "Field must be equal to password.";
pub const MSG_USERNAME_TAKEN: &str = "Username is taken";
pub const MSG_EMAIL_TAKEN: &str = "Email is taken";
pub const MSG_LOGIN_FAILED: &str = "Login failed. Check your username and/or password";
pub const MSG_TEAM_FULL: &str = "Team is full";

pub const USERNAME_MAX: usize = 40;
pub const REVIEW_MIN: usize = 5;
pub const REVIEW_MAX: usize = 500;

/// One failed check, tied to the input field it belongs to.
/// Checks run in a fixed order, so the first entry is the first failure.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

fn check_username(field: &'static str, username: &str, errors: &mut Vec<FieldError>) {
    if username.is_empty() {
        errors.push(FieldError::new(field, MSG_REQUIRED));
    } else if username.chars().count() > USERNAME_MAX {
        errors.push(FieldError::new(field, MSG_USERNAME_LENGTH));
    }
}

/// Registration checks, in order: presence, username length, email syntax,
/// password/confirm equality. Uniqueness is a database concern and stays in
/// the handler.
pub fn validate_registration(payload: &RegisterRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    check_username("username", &payload.username, &mut errors);

    if payload.email.is_empty() {
        errors.push(FieldError::new("email", MSG_REQUIRED));
    } else if !payload.email.validate_email() {
        errors.push(FieldError::new("email", MSG_INVALID_EMAIL));
    }

    if payload.password.is_empty() {
        errors.push(FieldError::new("password", MSG_REQUIRED));
    }

    if payload.confirm_password.is_empty() {
        errors.push(FieldError::new("confirm_password", MSG_REQUIRED));
    } else if payload.confirm_password != payload.password {
        errors.push(FieldError::new("confirm_password", MSG_CONFIRM_MISMATCH));
    }

    errors
}

pub fn validate_login(payload: &LoginRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if payload.username.is_empty() {
        errors.push(FieldError::new("username", MSG_REQUIRED));
    }
    if payload.password.is_empty() {
        errors.push(FieldError::new("password", MSG_REQUIRED));
    }

    errors
}

pub fn validate_username_update(username: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_username("username", username, &mut errors);
    errors
}

pub fn validate_review_content(content: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if content.is_empty() {
        errors.push(FieldError::new("content", MSG_REQUIRED));
    } else {
        let len = content.chars().count();
        if len < REVIEW_MIN || len > REVIEW_MAX {
            errors.push(FieldError::new("content", MSG_REVIEW_LENGTH));
        }
    }

    errors
}
