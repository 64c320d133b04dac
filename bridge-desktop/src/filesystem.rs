//! File System Access Implementation using Tokio

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    storage::{FileMetadata, FileSystemAccess},
};
use bytes::Bytes;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::trace;

/// Tokio-based file system implementation
///
/// Paths are used as given; the photo library is expected to be mounted at
/// the same location the remote service indexed it under.
#[derive(Debug, Clone, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    pub fn new() -> Self {
        Self
    }

    /// Convert std::io::Error to BridgeError
    fn map_io_error(e: io::Error) -> BridgeError {
        BridgeError::Io(e)
    }
}

/// Errors meaning "nothing is there" rather than "could not look": a regular
/// file used as a directory, or a symlink loop.
fn names_nothing(e: &io::Error) -> bool {
    if e.kind() == io::ErrorKind::NotFound {
        return true;
    }

    #[cfg(unix)]
    {
        matches!(e.raw_os_error(), Some(libc::ENOTDIR) | Some(libc::ELOOP))
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#[async_trait]
impl FileSystemAccess for TokioFileSystem {
    async fn exists(&self, path: &Path) -> Result<bool> {
        match fs::try_exists(path).await {
            Ok(found) => Ok(found),
            Err(e) if names_nothing(&e) => {
                trace!(path = ?path, error = %e, "Treating path as absent");
                Ok(false)
            }
            Err(e) => Err(Self::map_io_error(e)),
        }
    }

    async fn metadata(&self, path: &Path) -> Result<FileMetadata> {
        let metadata = fs::metadata(path).await.map_err(Self::map_io_error)?;

        Ok(FileMetadata {
            size: metadata.len(),
            is_directory: metadata.is_dir(),
        })
    }

    async fn read_file(&self, path: &Path) -> Result<Bytes> {
        let data = fs::read(path).await.map_err(Self::map_io_error)?;
        trace!(path = ?path, size = data.len(), "Read file");
        Ok(Bytes::from(data))
    }
}
