//! Error types for the Immich provider

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// Immich provider errors
#[derive(Error, Debug)]
pub enum ImmichError {
    /// API request returned a non-2xx status
    #[error("Immich API error (status {status_code}): {body}")]
    Http { status_code: u16, body: String },

    /// Service could not be reached
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Request could not be built (e.g. unserializable body)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Bridge error
    #[error(transparent)]
    BridgeError(#[from] BridgeError),
}

/// Result type for Immich operations
pub type Result<T> = std::result::Result<T, ImmichError>;

impl From<ImmichError> for BridgeError {
    fn from(error: ImmichError) -> Self {
        match error {
            ImmichError::Http { status_code, body } => BridgeError::Http {
                status: status_code,
                body,
            },
            ImmichError::NetworkError(msg) => BridgeError::Network(msg),
            ImmichError::ParseError(msg) => {
                BridgeError::OperationFailed(format!("Parse error: {}", msg))
            }
            ImmichError::InvalidRequest(msg) => {
                BridgeError::OperationFailed(format!("Invalid request: {}", msg))
            }
            ImmichError::BridgeError(e) => e,
        }
    }
}
