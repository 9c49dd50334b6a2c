//! Error types for scenario input validation and calculation

use thiserror::Error;

/// Errors raised while validating inputs or running a calculation
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid scenario selector {0}: expected 1, 2 or 3")]
    InvalidScenario(u8),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("CSV error: {0}")]
    Csv(String),
}

impl CalcError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input rather than the engine
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::InvalidScenario(_)
                | CalcError::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::Serialization(e.to_string())
    }
}

impl From<csv::Error> for CalcError {
    fn from(e: csv::Error) -> Self {
        CalcError::Csv(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

/// Reject negative or non-finite amounts
pub fn ensure_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid(field, format!("must not be negative (got {value})")));
    }
    Ok(())
}
