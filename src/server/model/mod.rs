//! Domain models and operation parameters used between controllers, services and repositories.

pub mod school;
pub mod teacher;

use crate::server::error::AppError;

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn require_non_blank(field: &str, value: String) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be blank", field)));
    }

    Ok(trimmed.to_string())
}

/// Like [`require_non_blank`], but also requires an `@` with text on both sides.
pub(crate) fn require_email(field: &str, value: String) -> Result<String, AppError> {
    let email = require_non_blank(field, value)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AppError::BadRequest(format!(
            "{} must be a valid email address",
            field
        ))),
    }
}

pub(crate) fn optional_non_blank(
    field: &str,
    value: Option<String>,
) -> Result<Option<String>, AppError> {
    value.map(|v| require_non_blank(field, v)).transpose()
}

pub(crate) fn optional_email(
    field: &str,
    value: Option<String>,
) -> Result<Option<String>, AppError> {
    value.map(|v| require_email(field, v)).transpose()
}
