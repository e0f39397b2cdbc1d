//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - Reasonable UX limits for titles, descriptions, locations
//! - redb values have no built-in length enforcement

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Report titles
pub const MAX_TITLE_LEN: usize = 200;

/// Incident descriptions (long-form free text)
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Free-text locations / addresses
pub const MAX_LOCATION_LEN: usize = 500;

/// Opaque blob references handed back by the evidence store
pub const MAX_ATTACHMENT_REF_LEN: usize = 2048;

/// Number of attachment references per submission
pub const MAX_ATTACHMENTS: usize = 10;

/// Department names in investigator analysis
pub const MAX_DEPARTMENT_LEN: usize = 200;

// ── Validation helpers (HTTP handlers) ──────────────────────────────

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

/// Validate that an optional/free string, if non-empty, is within the length limit.
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}
