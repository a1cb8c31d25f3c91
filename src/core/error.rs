use thiserror::Error;

/// Core error types for fwtable
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input validation failed
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    /// Table exceeds the entry cap
    #[error("Table holds {got} entries (max: {max})")]
    TooManyEntries { got: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
