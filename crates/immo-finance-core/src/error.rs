use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImmoFinanceError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Calculation failure: {0}")]
    CalculationFailure(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ImmoFinanceError {
    fn from(e: serde_json::Error) -> Self {
        ImmoFinanceError::SerializationError(e.to_string())
    }
}
