//! Field-level validation shared by upload and registration flows.

use crate::constants::{MIN_PASSWORD_LEN, MIN_PROCESS_NUMBER_LEN};
use crate::error::AppError;

/// Process numbers are free-text business identifiers but must carry some
/// substance: non-blank and at least five characters after trimming.
pub fn validate_process_number(value: &str) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "Process number is required".to_string(),
        ));
    }
    if trimmed.len() < MIN_PROCESS_NUMBER_LEN {
        return Err(AppError::Validation(format!(
            "Process number must have at least {} characters",
            MIN_PROCESS_NUMBER_LEN
        )));
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), AppError> {
    if value.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must have at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}
