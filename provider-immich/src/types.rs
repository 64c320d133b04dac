//! Immich API request and response types
//!
//! Only the fields this crate reads are modeled; everything else in the
//! payloads is ignored on deserialization.

use serde::{Deserialize, Serialize};

/// Album resource as returned by `GET /albums` and `POST /albums`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResponse {
    /// Album ID
    pub id: String,

    /// Display name
    pub album_name: String,
}

/// Asset resource as returned by `GET /view/folder`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetResponse {
    /// Asset ID
    pub id: String,
}

/// Body of `POST /albums`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest<'a> {
    pub album_name: &'a str,
    pub asset_ids: Vec<String>,
    pub description: &'a str,
}

/// Body of `PUT /albums/{id}/assets`
#[derive(Debug, Serialize)]
pub struct BulkIdsRequest<'a> {
    pub ids: &'a [String],
}
