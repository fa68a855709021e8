//! Status workflow for file records.
//!
//! Transitions: pending → approved | rejected; approved ↔ rejected. Entering
//! rejected requires a non-blank reason; leaving it clears the reason, so
//! `rejection_reason` is Some exactly when the status is rejected.

use crate::error::AppError;
use crate::models::{FileRecord, RecordStatus};

/// Apply a status transition to a record, returning the updated copy.
///
/// On success exactly `status` and `rejection_reason` differ from the
/// input. On failure the input is untouched and a validation error is
/// returned.
pub fn apply_status(
    record: &FileRecord,
    new_status: RecordStatus,
    reason: Option<&str>,
) -> Result<FileRecord, AppError> {
    let mut updated = record.clone();
    match new_status {
        RecordStatus::Rejected => {
            let reason = reason.map(str::trim).unwrap_or_default();
            if reason.is_empty() {
                return Err(AppError::Validation(
                    "A reason is required to reject a record".to_string(),
                ));
            }
            updated.status = RecordStatus::Rejected;
            updated.rejection_reason = Some(reason.to_string());
        }
        RecordStatus::Approved | RecordStatus::Pending => {
            updated.status = new_status;
            updated.rejection_reason = None;
        }
    }
    Ok(updated)
}
