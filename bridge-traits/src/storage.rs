//! Local filesystem access
//!
//! Read-only: the sync pass only probes for `.album` markers and reads them.
//! The photo library itself is never touched.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    pub size: u64,
    pub is_directory: bool,
}

/// Read-only filesystem capability.
///
/// Missing paths are not errors for [`exists`](Self::exists) and
/// [`is_file`](Self::is_file); they are for [`metadata`](Self::metadata) and
/// [`read_file`](Self::read_file).
///
/// ```ignore
/// async fn has_marker(fs: &dyn FileSystemAccess, dir: &Path) -> Result<bool> {
///     fs.is_file(&dir.join(".album")).await
/// }
/// ```
#[async_trait]
pub trait FileSystemAccess: Send + Sync {
    async fn exists(&self, path: &Path) -> Result<bool>;

    async fn metadata(&self, path: &Path) -> Result<FileMetadata>;

    async fn read_file(&self, path: &Path) -> Result<Bytes>;

    /// `path` exists and is not a directory.
    async fn is_file(&self, path: &Path) -> Result<bool> {
        if !self.exists(path).await? {
            return Ok(false);
        }
        Ok(!self.metadata(path).await?.is_directory)
    }
}
