//! Error types for the mapping layer.

use thiserror::Error;

/// A present JSON value whose shape cannot be mapped onto the target field.
///
/// Absent keys and `null` values never produce this error; they fall back to
/// the field's default. Only values that exist but have the wrong shape do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// The value has a different JSON type than the field requires.
    #[error("field `{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        /// Dotted path to the offending field.
        field: String,
        /// What the mapper expected.
        expected: &'static str,
        /// The JSON type that was present.
        found: &'static str,
    },

    /// A string value that should hold an integer does not parse as one.
    #[error("field `{field}`: `{value}` is not an integer")]
    InvalidInteger {
        /// Dotted path to the offending field.
        field: String,
        /// The raw text that failed to parse.
        value: String,
    },
}

impl MapError {
    /// Creates a type mismatch error.
    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            found,
        }
    }

    /// Creates an invalid integer error.
    pub fn invalid_integer(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidInteger {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns the dotted path of the field that failed.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::TypeMismatch { field, .. } | Self::InvalidInteger { field, .. } => field,
        }
    }

    /// Prefixes the field path with the enclosing key, e.g. `bag[2]` + `eventDate`.
    #[must_use]
    pub fn within(self, parent: &str) -> Self {
        match self {
            Self::TypeMismatch {
                field,
                expected,
                found,
            } => Self::TypeMismatch {
                field: format!("{parent}.{field}"),
                expected,
                found,
            },
            Self::InvalidInteger { field, value } => Self::InvalidInteger {
                field: format!("{parent}.{field}"),
                value,
            },
        }
    }
}
