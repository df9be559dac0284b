//! Validation error types.

use crate::input::FormField;
use std::fmt;
use thiserror::Error;

/// A single failed rule on one form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Field the rule belongs to.
    pub field: FormField,
    /// Message shown next to the field.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every rule that failed while validating a form, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure.
    pub fn push(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.push(ValidationError::new(field, message));
    }

    /// Returns true if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns all failures.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns the first message recorded for `field`, if any.
    pub fn message_for(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_fields() {
        let mut errors = ValidationErrors::new();
        errors.push(FormField::Amount, "Required.");
        errors.push(FormField::Date, "Date is required.");

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "amount: Required.; date: Date is required."
        );
    }

    #[test]
    fn message_lookup() {
        let mut errors = ValidationErrors::new();
        errors.push(FormField::Tags, "Tags must contain at least one tag.");

        assert_eq!(
            errors.message_for(FormField::Tags),
            Some("Tags must contain at least one tag.")
        );
        assert_eq!(errors.message_for(FormField::Amount), None);
    }
}
