//! ═══════════════════════════════════════════════════════════════════════════════
//! ERROR — Unified Error Type for vOmega
//! ═══════════════════════════════════════════════════════════════════════════════
//! Construction and report-writing failures. Non-convergence is an outcome, not an error.
//! ═══════════════════════════════════════════════════════════════════════════════

use thiserror::Error;

/// The unified error type for the vOmega crate
#[derive(Debug, Error)]
pub enum VomegaError {
    /// I/O error while writing the report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Configuration-specific errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validation-specific errors for field construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Paired arrays must have the same length
    #[error("Length mismatch between '{left}' ({left_len}) and '{right}' ({right_len})")]
    LengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },
    /// Field has no entries
    #[error("Field '{0}' is empty")]
    Empty(&'static str),
    /// NaN or infinite entry
    #[error("Field '{field}' has a non-finite entry at index {index}")]
    NonFinite { field: &'static str, index: usize },
    /// Negative entry in a non-negative field
    #[error("Field '{field}' has a negative entry at index {index}")]
    Negative { field: &'static str, index: usize },
    /// Distribution does not sum to 1
    #[error("Field '{field}' must sum to 1, got {sum}")]
    NotNormalized { field: &'static str, sum: f64 },
}

/// Type alias for Result with VomegaError
pub type VomegaResult<T> = Result<T, VomegaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err: VomegaError = ValidationError::LengthMismatch {
            left: "p",
            left_len: 3,
            right: "q",
            right_len: 4,
        }
        .into();
        let msg = err.to_string();
        assert!(msg.contains("'p' (3)"));
        assert!(msg.contains("'q' (4)"));

        let err: VomegaError = ConfigError::invalid("lr", "must be positive and finite").into();
        assert!(err.to_string().contains("lr"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: VomegaError = io_err.into();
        assert!(matches!(err, VomegaError::Io(_)));
    }

    #[test]
    fn test_error_from_validation() {
        let err: VomegaError = ValidationError::Empty("a").into();
        assert!(matches!(err, VomegaError::Validation(ValidationError::Empty("a"))));
    }
}
