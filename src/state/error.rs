//! Form validation error types.

use super::form::Field;

/// Errors raised while validating a form field.
///
/// These never abort anything: they are stored per field and rendered next to
/// the input until the user corrects it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Field left blank
    #[error("{}", .0.empty_message())]
    EmptyField(Field),

    /// Field present but not in the accepted shape
    #[error("{requirement}")]
    InvalidFormat {
        field: Field,
        requirement: &'static str,
    },

    /// Confirmation differs from the password
    #[error("Passwords do not match")]
    Mismatch,
}

impl ValidationError {
    /// Return the field this error belongs to.
    ///
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmptyField(field) => *field,
            ValidationError::InvalidFormat { field, .. } => *field,
            ValidationError::Mismatch => Field::ConfirmPassword,
        }
    }
}
