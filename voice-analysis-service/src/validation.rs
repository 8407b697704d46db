//! Patient info validation
//!
//! The wizard needs every failing field at once so it can render inline
//! messages; the upload client only needs a fast yes/no before spending a
//! network call. Both views are built on the same canonical ranges.

use crate::models::PatientInfo;

/// Canonical age bounds, inclusive. The remote analysis endpoint enforces
/// the same range, so accepting anything wider locally would only defer
/// the rejection.
pub const AGE_MIN: u32 = 11;
pub const AGE_MAX: u32 = 119;

/// Maximum length of a patient name after trimming.
pub const NAME_MAX_LEN: usize = 100;

/// A single failed field with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl PatientInfo {
    /// Check every field and report all failures.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.full_name.trim();
        if name.is_empty() {
            errors.push(FieldError {
                field: "fullName",
                message: "Full name is required".into(),
            });
        } else if name.len() > NAME_MAX_LEN {
            errors.push(FieldError {
                field: "fullName",
                message: format!("Name must be between 1 and {} characters", NAME_MAX_LEN),
            });
        }

        if self.age < AGE_MIN || self.age > AGE_MAX {
            errors.push(FieldError {
                field: "age",
                message: format!("Age must be between {} and {}", AGE_MIN, AGE_MAX),
            });
        }

        if self.test_time <= 0.0 || !self.test_time.is_finite() {
            errors.push(FieldError {
                field: "testTime",
                message: "Test time must be greater than 0".into(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Single-message form of [`PatientInfo::validate`], used on the
    /// upload path to fail fast with one descriptive error.
    pub fn validate_message(&self) -> Result<(), String> {
        self.validate().map_err(|errors| {
            errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ")
        })
    }
}
