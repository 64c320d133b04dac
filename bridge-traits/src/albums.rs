//! Remote Album Service Abstraction
//!
//! Contract between the sync core and a photo service that organizes assets
//! into albums and indexes them by the folder they live in.

use async_trait::async_trait;

use crate::error::Result;

/// An album as known to the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAlbum {
    pub id: String,
    pub album_name: String,
}

impl RemoteAlbum {
    pub fn new(id: impl Into<String>, album_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            album_name: album_name.into(),
        }
    }
}

/// An asset (photo or video) indexed by the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAsset {
    pub id: String,
}

impl RemoteAsset {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Album/folder operations offered by a remote photo service
///
/// Every call is a single request: no retries, no caching. Failures surface as
/// [`BridgeError::Network`](crate::error::BridgeError::Network) when the
/// service is unreachable and
/// [`BridgeError::Http`](crate::error::BridgeError::Http) when it answers
/// with a non-2xx status.
#[async_trait]
pub trait AlbumService: Send + Sync {
    /// List every album visible to the API key
    async fn list_albums(&self) -> Result<Vec<RemoteAlbum>>;

    /// List the distinct folder paths that hold at least one asset
    ///
    /// Paths are reported as the service indexes them; they are not checked
    /// against the local filesystem.
    async fn list_unique_asset_paths(&self) -> Result<Vec<String>>;

    /// List the assets located directly in `path`
    async fn list_folder_assets(&self, path: &str) -> Result<Vec<RemoteAsset>>;

    /// Create an empty album
    async fn create_album(&self, name: &str, description: &str) -> Result<RemoteAlbum>;

    /// Add assets to an album
    ///
    /// Per-asset results reported by the service are ignored; any non-2xx
    /// status fails the whole batch.
    async fn add_assets_to_album(&self, album_id: &str, asset_ids: &[String]) -> Result<()>;

    /// Delete a single album (assets are left untouched)
    async fn delete_album(&self, album_id: &str) -> Result<()>;

    /// Delete every album, one after another
    ///
    /// Stops at the first failing delete and returns its error; albums not
    /// reached yet are left in place.
    async fn delete_all_albums(&self) -> Result<()> {
        let albums = self.list_albums().await?;
        for album in albums {
            self.delete_album(&album.id).await?;
        }
        Ok(())
    }
}
