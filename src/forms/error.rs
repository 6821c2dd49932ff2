//! Form validation error types.

use homedeck_types::FieldRef;
use thiserror::Error;

/// Why a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldErrorKind {
    #[error("This field is required")]
    Required,
    #[error("Select at least one disk")]
    NoDisksSelected,
    #[error("Each disk can only be added once")]
    DuplicateMount,
    #[error("Invalid value")]
    Invalid,
}

/// Submit-level failure of a configuration form.
#[derive(Debug, Error)]
pub enum FormError {
    /// One or more fields failed validation; the session now carries a
    /// [`FieldErrorKind`] for each of them.
    #[error("{} field(s) failed validation", failed.len())]
    Validation { failed: Vec<FieldRef> },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedeck_types::{FieldId, SlotId};

    #[test]
    fn test_validation_error_reports_count() {
        let err = FormError::Validation {
            failed: vec![
                FieldRef::new(SlotId::Top, FieldId::Host),
                FieldRef::new(SlotId::Top, FieldId::SelectedDisks),
            ],
        };
        assert_eq!(err.to_string(), "2 field(s) failed validation");
    }
}
