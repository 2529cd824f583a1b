use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrustLendError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Not eligible: {0}")]
    Ineligible(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for TrustLendError {
    fn from(e: serde_json::Error) -> Self {
        TrustLendError::SerializationError(e.to_string())
    }
}
