use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanScheduleError {
    #[error("Malformed input: needed {needed} byte(s) at offset {offset}, only {available} available")]
    MalformedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanScheduleError {
    fn from(e: serde_json::Error) -> Self {
        LoanScheduleError::SerializationError(e.to_string())
    }
}
