use thiserror::Error;

/// Failures the engine can surface to a caller. Validation failures leave
/// stored state untouched; storage failures are propagated unchanged and any
/// in-progress aggregation is abandoned whole.
#[derive(Error, Debug)]
pub enum HoursError {
    #[error("invalid value: {message}")]
    Validation { message: String },

    #[error("storage failed: {0}")]
    Storage(#[source] anyhow::Error),
}

impl HoursError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HoursError>;
