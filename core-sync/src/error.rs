use bridge_traits::error::BridgeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// The photo service could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The photo service answered with a non-2xx status.
    #[error("HTTP {status} from photo service: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed album descriptor {path}: {reason}")]
    MalformedDescriptor { path: PathBuf, reason: String },

    #[error("Invalid album name pattern: {0}")]
    InvalidNamePattern(String),

    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

impl SyncError {
    pub(crate) fn file_system(path: &std::path::Path, error: BridgeError) -> Self {
        SyncError::FileSystem(format!("{}: {}", path.display(), error))
    }
}

impl From<BridgeError> for SyncError {
    fn from(error: BridgeError) -> Self {
        match error {
            BridgeError::Network(msg) => SyncError::Network(msg),
            BridgeError::Http { status, body } => SyncError::Http { status, body },
            BridgeError::Io(e) => SyncError::FileSystem(e.to_string()),
            other => SyncError::Provider(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
