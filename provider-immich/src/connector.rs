//! Immich API connector implementation
//!
//! Implements the `AlbumService` trait over the Immich REST API.

use async_trait::async_trait;
use bridge_traits::albums::{AlbumService, RemoteAlbum, RemoteAsset};
use bridge_traits::error::Result;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::error::ImmichError;
use crate::types::{AlbumResponse, AssetResponse, BulkIdsRequest, CreateAlbumRequest};

/// Header carrying the static API key
const API_KEY_HEADER: &str = "x-api-key";

/// Immich API connector
///
/// # Example
///
/// ```ignore
/// use provider_immich::ImmichConnector;
/// use bridge_traits::AlbumService;
///
/// let connector = ImmichConnector::new(http_client, "http://immich:2283/api", api_key);
/// let albums = connector.list_albums().await?;
/// ```
pub struct ImmichConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// API root, without trailing slash (typically ends in `/api`)
    base_url: String,

    /// Static API key
    api_key: String,
}

impl ImmichConnector {
    /// Create a new Immich connector
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client implementation
    /// * `base_url` - API root, e.g. `http://immich:2283/api`
    /// * `api_key` - API key with album read/write permissions
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: HttpMethod, endpoint: &str) -> HttpRequest {
        HttpRequest::new(method, format!("{}{}", self.base_url, endpoint))
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header("Accept", "application/json")
    }

    /// Send a request once and turn non-2xx statuses into errors
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, ImmichError> {
        let response = self.http_client.execute(request).await.map_err(|e| {
            if e.is_network() {
                ImmichError::NetworkError(e.to_string())
            } else {
                ImmichError::BridgeError(e)
            }
        })?;

        if response.is_success() {
            debug!(status = response.status, "API request succeeded");
            Ok(response)
        } else {
            let body = response.body_text();
            warn!(status = response.status, body = %body, "API request failed");
            Err(ImmichError::Http {
                status_code: response.status,
                body,
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> std::result::Result<T, ImmichError> {
        let response = self.send(self.request(HttpMethod::Get, endpoint)).await?;
        serde_json::from_slice(&response.body).map_err(|e| {
            ImmichError::ParseError(format!("Failed to parse response of {}: {}", endpoint, e))
        })
    }

    fn convert_album(album: AlbumResponse) -> RemoteAlbum {
        RemoteAlbum {
            id: album.id,
            album_name: album.album_name,
        }
    }

    fn convert_asset(asset: AssetResponse) -> RemoteAsset {
        RemoteAsset::new(asset.id)
    }
}

#[async_trait]
impl AlbumService for ImmichConnector {
    #[instrument(skip(self))]
    async fn list_albums(&self) -> Result<Vec<RemoteAlbum>> {
        let albums: Vec<AlbumResponse> = self.get_json("/albums").await?;
        debug!("Listed {} albums", albums.len());
        Ok(albums.into_iter().map(Self::convert_album).collect())
    }

    #[instrument(skip(self))]
    async fn list_unique_asset_paths(&self) -> Result<Vec<String>> {
        let paths: Vec<String> = self.get_json("/view/folder/unique-paths").await?;
        debug!("Listed {} unique asset paths", paths.len());
        Ok(paths)
    }

    #[instrument(skip(self))]
    async fn list_folder_assets(&self, path: &str) -> Result<Vec<RemoteAsset>> {
        let endpoint = format!("/view/folder?path={}", urlencoding::encode(path));
        let assets: Vec<AssetResponse> = self.get_json(&endpoint).await?;
        Ok(assets.into_iter().map(Self::convert_asset).collect())
    }

    #[instrument(skip(self))]
    async fn create_album(&self, name: &str, description: &str) -> Result<RemoteAlbum> {
        let body = CreateAlbumRequest {
            album_name: name,
            asset_ids: Vec::new(),
            description,
        };
        let request = self
            .request(HttpMethod::Post, "/albums")
            .json(&body)
            .map_err(|e| ImmichError::InvalidRequest(e.to_string()))?;

        let response = self.send(request).await?;
        let album: AlbumResponse = serde_json::from_slice(&response.body).map_err(|e| {
            ImmichError::ParseError(format!("Failed to parse created album: {}", e))
        })?;

        Ok(Self::convert_album(album))
    }

    #[instrument(skip(self, asset_ids), fields(count = asset_ids.len()))]
    async fn add_assets_to_album(&self, album_id: &str, asset_ids: &[String]) -> Result<()> {
        let endpoint = format!("/albums/{}/assets", urlencoding::encode(album_id));
        let request = self
            .request(HttpMethod::Put, &endpoint)
            .json(&BulkIdsRequest { ids: asset_ids })
            .map_err(|e| ImmichError::InvalidRequest(e.to_string()))?;

        // The body lists a per-asset outcome (e.g. "duplicate"); only the
        // overall status matters here.
        self.send(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_album(&self, album_id: &str) -> Result<()> {
        let endpoint = format!("/albums/{}", urlencoding::encode(album_id));
        self.send(self.request(HttpMethod::Delete, &endpoint)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::BridgeError;
    use mockall::mock;
    use mockall::Sequence;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
        }
    }

    fn ok(body: &str) -> Result<HttpResponse> {
        status(200, body)
    }

    fn status(code: u16, body: &str) -> Result<HttpResponse> {
        Ok(HttpResponse::new(code, body.to_string()))
    }

    fn connector(mock_http: MockHttpClient) -> ImmichConnector {
        ImmichConnector::new(Arc::new(mock_http), "http://immich.local/api/", "key-123")
    }

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let connector = connector(MockHttpClient::new());
        assert_eq!(connector.base_url(), "http://immich.local/api");
    }

    #[tokio::test]
    async fn test_list_albums_success() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.method, HttpMethod::Get);
            assert_eq!(req.url, "http://immich.local/api/albums");
            assert_eq!(req.header_value("x-api-key"), Some("key-123"));
            ok(r#"[
                {"id": "a1", "albumName": "Holidays", "assetCount": 3},
                {"id": "a2", "albumName": "2024"}
            ]"#)
        });

        let albums = connector(mock_http).list_albums().await.unwrap();

        assert_eq!(
            albums,
            vec![RemoteAlbum::new("a1", "Holidays"), RemoteAlbum::new("a2", "2024")]
        );
    }

    #[tokio::test]
    async fn test_list_unique_asset_paths() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.url, "http://immich.local/api/view/folder/unique-paths");
            ok(r#"["/photos/2024", "/photos/2024/Trip"]"#)
        });

        let paths = connector(mock_http).list_unique_asset_paths().await.unwrap();

        assert_eq!(paths, vec!["/photos/2024", "/photos/2024/Trip"]);
    }

    #[tokio::test]
    async fn test_list_folder_assets_encodes_path() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(
                req.url,
                "http://immich.local/api/view/folder?path=%2Fphotos%2F2024%20Vacation"
            );
            ok(r#"[{"id": "x1", "originalFileName": "IMG_1.jpg", "isFavorite": false}, {"id": "x2"}]"#)
        });

        let assets = connector(mock_http)
            .list_folder_assets("/photos/2024 Vacation")
            .await
            .unwrap();

        assert_eq!(assets, vec![RemoteAsset::new("x1"), RemoteAsset::new("x2")]);
    }

    #[tokio::test]
    async fn test_create_album_posts_name_and_description() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.method, HttpMethod::Post);
            assert_eq!(req.url, "http://immich.local/api/albums");
            let body: serde_json::Value =
                serde_json::from_slice(req.body.as_ref().unwrap()).unwrap();
            assert_eq!(body["albumName"], "Trip");
            assert_eq!(body["description"], "Summer");
            assert_eq!(body["assetIds"], serde_json::json!([]));
            status(201, r#"{"id": "new-1", "albumName": "Trip"}"#)
        });

        let album = connector(mock_http)
            .create_album("Trip", "Summer")
            .await
            .unwrap();

        assert_eq!(album, RemoteAlbum::new("new-1", "Trip"));
    }

    #[tokio::test]
    async fn test_add_assets_ignores_per_id_results() {
        let mut mock_http = MockHttpClient::new();

        mock_http.expect_execute().times(1).returning(|req| {
            assert_eq!(req.method, HttpMethod::Put);
            assert_eq!(req.url, "http://immich.local/api/albums/a1/assets");
            let body: serde_json::Value =
                serde_json::from_slice(req.body.as_ref().unwrap()).unwrap();
            assert_eq!(body, serde_json::json!({ "ids": ["x1", "x2"] }));
            ok(r#"[{"id": "x1", "success": true}, {"id": "x2", "success": false, "error": "duplicate"}]"#)
        });

        connector(mock_http)
            .add_assets_to_album("a1", &["x1".to_string(), "x2".to_string()])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_2xx_is_http_error_with_body() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| status(400, r#"{"message": "ids must be an array"}"#));

        let err = connector(mock_http)
            .add_assets_to_album("a1", &["x1".to_string()])
            .await
            .unwrap_err();

        match err {
            BridgeError::Http { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("ids must be an array"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| Err(BridgeError::Network("Connection failed".to_string())));

        let err = connector(mock_http).list_albums().await.unwrap_err();

        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_failure() {
        let mut mock_http = MockHttpClient::new();

        mock_http
            .expect_execute()
            .times(1)
            .returning(|_| ok(r#"{"not": "a list"}"#));

        let err = connector(mock_http).list_unique_asset_paths().await.unwrap_err();

        assert!(matches!(err, BridgeError::OperationFailed(_)));
    }

    #[tokio::test]
    async fn test_delete_all_albums_stops_on_first_failure() {
        let mut mock_http = MockHttpClient::new();
        let mut seq = Sequence::new();

        mock_http
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ok(r#"[{"id": "a1", "albumName": "A"}, {"id": "a2", "albumName": "B"}, {"id": "a3", "albumName": "C"}]"#));
        mock_http
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|req| {
                assert_eq!(req.method, HttpMethod::Delete);
                assert_eq!(req.url, "http://immich.local/api/albums/a1");
                status(204, "")
            });
        mock_http
            .expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|req| {
                assert_eq!(req.url, "http://immich.local/api/albums/a2");
                status(403, "forbidden")
            });

        let err = connector(mock_http).delete_all_albums().await.unwrap_err();

        assert_eq!(err.http_status(), Some(403));
    }
}
