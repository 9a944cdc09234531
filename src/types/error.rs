//! Engine error taxonomy

use thiserror::Error;

/// Errors raised at the engine's input boundary.
///
/// Zero denominators and empty fleets are not errors: the affected figures
/// resolve to zero where they are computed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// A required field is missing, non-numeric, or otherwise unusable
    #[error("invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// The payload is not well-formed JSON
    #[error("failed to parse readings: {0}")]
    Parse(String),
}

impl EngineError {
    pub fn invalid(field: &str, reason: &str) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
