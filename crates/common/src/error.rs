use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid parameter: {name} must be >= {min}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        min: i64,
    },

    #[error("Malformed sample at index {index}: {reason}")]
    MalformedSample { index: usize, reason: String },

    #[error("Numeric overflow in {line} at index {index}: prices too large to average")]
    NumericOverflow { index: usize, line: &'static str },

    #[error("Price source error: {0}")]
    Source(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// True for errors caused by the caller's input rather than by the server.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidParameter { .. }
                | Error::MalformedSample { .. }
                | Error::NumericOverflow { .. }
                | Error::Json(_)
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
