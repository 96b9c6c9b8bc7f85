use thiserror::Error;

/// Result type alias for payload operations
pub type Result<T> = std::result::Result<T, PayloadError>;

/// APNs Payload Error Types
#[derive(Error, Debug)]
pub enum PayloadError {
    /// A setter received a value of the wrong shape
    #[error("Invalid argument for '{field}': {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("Failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Payload too large: {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Message has no device token")]
    MissingToken,
}

impl PayloadError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PayloadError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Returns true for setter validation failures
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PayloadError::InvalidArgument { .. })
    }
}
