//! Custom error types for the tariff advisor
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for tariff advisor operations
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV read/write errors in the history log
    #[error("CSV error: {0}")]
    Csv(String),

    /// Free text that could not be read as a number
    #[error("Invalid input: '{input}' is not a number")]
    InvalidInput { input: String },

    /// A value that parsed but was refused
    #[error("Validation error: {0}")]
    Validation(String),

    /// Document or spreadsheet rendering errors
    #[error("Render error: {0}")]
    Render(String),

    /// History storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Delivery errors raised by a transport
    #[error("Transport error: {0}")]
    Transport(String),
}

impl AdvisorError {
    /// Create an "invalid input" error for a raw message
    pub fn invalid_input(input: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.into(),
        }
    }

    /// Check if this is an invalid input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for AdvisorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for AdvisorError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for AdvisorError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Render(format!("spreadsheet: {}", err))
    }
}

impl From<printpdf::Error> for AdvisorError {
    fn from(err: printpdf::Error) -> Self {
        Self::Render(format!("document: {}", err))
    }
}

/// Result type alias for tariff advisor operations
pub type AdvisorResult<T> = Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AdvisorError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_invalid_input_error() {
        let err = AdvisorError::invalid_input("abc");
        assert_eq!(err.to_string(), "Invalid input: 'abc' is not a number");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let advisor_err: AdvisorError = io_err.into();
        assert!(matches!(advisor_err, AdvisorError::Io(_)));
        assert!(!advisor_err.is_invalid_input());
    }
}
