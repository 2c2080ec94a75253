//! Error types for catset library

use thiserror::Error;

/// Result type alias for catset operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`], for callers that only care about
/// which stage of the pipeline rejected their input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The bound type's declarations are unusable (raised by `attach` only)
    Schema,
    /// An unknown category or setting was referenced
    Lookup,
    /// Settings text is malformed
    Format,
    /// A string could not be converted, or a value had the wrong type
    Conversion,
    /// A validator rule rejected an otherwise convertible value
    Validation,
    /// The operation needs an attached object
    State,
}

/// Main error type for catset library
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Schema Errors (attach)
    // -------------------------------------------------------------------------
    #[error("Setting '{name}' in category '{category}' must be both readable and writable")]
    NonReadWrite { category: String, name: String },

    #[error(
        "Cannot convert setting '{name}' in category '{category}' with type {type_name} to and from string"
    )]
    UnsupportedType {
        category: String,
        name: String,
        type_name: &'static str,
    },

    #[error("Invalid name '{value}': {reason}")]
    InvalidName { value: String, reason: &'static str },

    #[error("Category '{category}' already contains setting named '{name}'")]
    DuplicateName { category: String, name: String },

    #[error("Given settings object does not declare any settings")]
    EmptySchema,

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Setting not found: '{name}' in category '{category}'")]
    SettingNotFound { category: String, name: String },

    // -------------------------------------------------------------------------
    // Text Format Errors
    // -------------------------------------------------------------------------
    #[error("Invalid settings text at line {line}: {reason}")]
    Format { line: usize, reason: &'static str },

    #[error("Value of setting '{name}' in category '{category}' contains a line break")]
    MultilineValue { category: String, name: String },

    // -------------------------------------------------------------------------
    // Conversion Errors
    // -------------------------------------------------------------------------
    #[error("Cannot parse '{input}' as {type_name}: {reason}")]
    Conversion {
        input: String,
        type_name: &'static str,
        reason: String,
    },

    #[error("Type mismatch for {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid value for '{name}' in category '{category}': {message}")]
    Validation {
        category: String,
        name: String,
        message: String,
    },

    // -------------------------------------------------------------------------
    // State Errors
    // -------------------------------------------------------------------------
    #[error("No settings object attached")]
    NotAttached,
}

impl Error {
    /// The broad kind of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NonReadWrite { .. }
            | Error::UnsupportedType { .. }
            | Error::InvalidName { .. }
            | Error::DuplicateName { .. }
            | Error::EmptySchema => ErrorKind::Schema,
            Error::CategoryNotFound(_) | Error::SettingNotFound { .. } => ErrorKind::Lookup,
            Error::Format { .. } | Error::MultilineValue { .. } => ErrorKind::Format,
            Error::Conversion { .. } | Error::TypeMismatch { .. } => ErrorKind::Conversion,
            Error::Validation { .. } => ErrorKind::Validation,
            Error::NotAttached => ErrorKind::State,
        }
    }

    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::Lookup
    }

    /// Check if this error was raised while building a schema
    #[must_use]
    pub fn is_schema_error(&self) -> bool {
        self.kind() == ErrorKind::Schema
    }

    pub(crate) fn setting_not_found(category: &str, name: &str) -> Self {
        Error::SettingNotFound {
            category: category.to_string(),
            name: name.to_string(),
        }
    }
}
