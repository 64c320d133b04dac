use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    /// The remote could not be reached (DNS, connect, TLS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The remote answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Whether this error came from the transport rather than the remote.
    pub fn is_network(&self) -> bool {
        matches!(self, BridgeError::Network(_))
    }

    /// Status code of a non-2xx response, if that is what this error is.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            BridgeError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let error = BridgeError::Http {
            status: 400,
            body: "bad request".to_string(),
        };

        assert_eq!(error.to_string(), "HTTP 400: bad request");
        assert_eq!(error.http_status(), Some(400));
        assert!(!error.is_network());
    }

    #[test]
    fn test_network_error_classification() {
        let error = BridgeError::Network("connection refused".to_string());

        assert!(error.is_network());
        assert_eq!(error.http_status(), None);
    }
}
