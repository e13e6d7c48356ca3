//! Inspection status values and validation.

use crate::error::CoreError;

/// Status: inspection has been opened but not concluded.
pub const STATUS_IN_PROGRESS: &str = "in_progress";

/// Status: inspection concluded with a recorded outcome.
pub const STATUS_COMPLETED: &str = "completed";

/// Status: inspection abandoned before a conclusion.
pub const STATUS_CANCELLED: &str = "cancelled";

/// All recognized inspection status values.
pub const ALL_STATUSES: &[&str] = &[STATUS_IN_PROGRESS, STATUS_COMPLETED, STATUS_CANCELLED];

/// Validate that the given value is a recognized inspection status.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if ALL_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown inspection status: '{}'. Valid statuses: {}",
            status,
            ALL_STATUSES.join(", ")
        )))
    }
}
