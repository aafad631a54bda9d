//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! CRUD handlers before anything touches the document.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product titles, category names, first/last names
pub const MAX_NAME_LEN: usize = 200;

/// Product descriptions and comment bodies
pub const MAX_NOTE_LEN: usize = 2000;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Image URLs
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Minimal shape check: one `@` with text on both sides and a dot in the domain.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(AppError::validation("email is not a valid address"));
    }
    Ok(())
}

/// Validate every image URL of a product.
pub fn validate_images(images: &[String]) -> Result<(), AppError> {
    for image in images {
        validate_required_text(image, "images", MAX_URL_LEN)?;
    }
    Ok(())
}
