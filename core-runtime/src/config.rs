//! # Core Configuration Module
//!
//! Resolved process configuration for a folder-albums run.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! holding the service coordinates, sync behavior switches and the bridge
//! implementations the core talks through. `build()` validates everything up
//! front so a bad regex or cron expression fails at startup, not at the first
//! scheduled tick.
//!
//! ## Required Settings
//!
//! - `api_url` - Immich API root (typically ends with `/api`)
//! - `api_key` - Immich API key
//!
//! ## Optional Dependencies (with platform defaults)
//!
//! - `HttpClient` - HTTP operations (desktop default: reqwest)
//! - `FileSystemAccess` - Marker file access (desktop default: tokio fs)
//!
//! When the `desktop-shims` feature is enabled, desktop defaults are injected
//! automatically if not provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .api_url("http://immich:2283/api")
//!     .api_key("secret")
//!     .album_name_pattern(r"\d{4}")
//!     .chunk_size(500)
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{FileSystemAccess, HttpClient};
use cron::Schedule;
use regex::Regex;
use std::str::FromStr;
use std::sync::Arc;

/// Core configuration for a folder-albums process.
///
/// Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Immich API root, without trailing slash
    pub api_url: String,

    /// Immich API key
    pub api_key: String,

    /// Pattern whose first match in a folder name becomes the album name
    pub album_name_pattern: Option<Regex>,

    /// Maximum number of assets per add-to-album request (`None` = unbounded)
    pub chunk_size: Option<usize>,

    /// Log what would be done without creating albums or adding assets
    pub dry_run: bool,

    /// Delete every existing album before syncing
    pub delete_all_albums: bool,

    /// Recurring schedule; `None` means run once and exit
    pub schedule: Option<Schedule>,

    /// Cron expression `schedule` was parsed from, as given
    pub cron_expression: Option<String>,

    /// HTTP client for API requests
    pub http_client: Arc<dyn HttpClient>,

    /// File system access used to find and read marker files
    pub file_system: Arc<dyn FileSystemAccess>,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field(
                "album_name_pattern",
                &self.album_name_pattern.as_ref().map(Regex::as_str),
            )
            .field("chunk_size", &self.chunk_size)
            .field("dry_run", &self.dry_run)
            .field("delete_all_albums", &self.delete_all_albums)
            .field("cron_expression", &self.cron_expression)
            .field("http_client", &"HttpClient { ... }")
            .field("file_system", &"FileSystemAccess { ... }")
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }
}

/// Expand a five-field Unix cron expression with a leading seconds field.
///
/// The `cron` crate expects seconds first; expressions that already have six
/// or seven fields are returned unchanged.
pub fn normalize_cron_expression(expression: &str) -> String {
    let trimmed = expression.trim();
    if trimmed.split_whitespace().count() == 5 {
        format!("0 {}", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Parse a (possibly five-field) cron expression.
pub fn parse_schedule(expression: &str) -> Result<Schedule> {
    let normalized = normalize_cron_expression(expression);
    Schedule::from_str(&normalized)
        .map_err(|e| Error::Config(format!("Invalid cron expression '{}': {}", expression, e)))
}

#[cfg(not(feature = "desktop-shims"))]
fn capability_missing(capability: &str) -> Error {
    Error::CapabilityMissing {
        capability: capability.to_string(),
        message: format!(
            "{} implementation is required. Enable the 'desktop-shims' feature \
             to use the bridge-desktop default, or inject one explicitly.",
            capability
        ),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    let client = bridge_desktop::ReqwestHttpClient::new().map_err(|source| Error::Bridge {
        capability: "HttpClient",
        source,
    })?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    Err(capability_missing("HttpClient"))
}

#[cfg(feature = "desktop-shims")]
fn provide_default_file_system() -> Result<Arc<dyn FileSystemAccess>> {
    Ok(Arc::new(bridge_desktop::TokioFileSystem::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_file_system() -> Result<Arc<dyn FileSystemAccess>> {
    Err(capability_missing("FileSystemAccess"))
}

/// Builder for constructing [`CoreConfig`] instances.
#[derive(Default)]
pub struct CoreConfigBuilder {
    api_url: Option<String>,
    api_key: Option<String>,
    album_name_pattern: Option<String>,
    chunk_size: Option<usize>,
    dry_run: bool,
    delete_all_albums: bool,
    cron_expression: Option<String>,
    http_client: Option<Arc<dyn HttpClient>>,
    file_system: Option<Arc<dyn FileSystemAccess>>,
}

impl CoreConfigBuilder {
    /// Sets the Immich API root URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Sets the Immich API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the album name extraction pattern (a regular expression).
    pub fn album_name_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.album_name_pattern = Some(pattern.into());
        self
    }

    /// Sets the maximum number of assets per add-to-album call.
    ///
    /// `0` means "no limit", same as never calling this.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = Some(size);
        self
    }

    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn delete_all_albums(mut self, enabled: bool) -> Self {
        self.delete_all_albums = enabled;
        self
    }

    /// Sets a recurring schedule as a cron expression (5, 6 or 7 fields).
    pub fn cron_expression(mut self, expression: impl Into<String>) -> Self {
        self.cron_expression = Some(expression.into());
        self
    }

    /// Sets the HTTP client implementation.
    ///
    /// If not provided, the reqwest-based default is used when the
    /// `desktop-shims` feature is enabled.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the file system implementation.
    ///
    /// If not provided, the tokio-based default is used when the
    /// `desktop-shims` feature is enabled.
    pub fn file_system(mut self, fs: Arc<dyn FileSystemAccess>) -> Self {
        self.file_system = Some(fs);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if:
    /// - The API URL or key is missing or empty
    /// - The API URL is not an http(s) URL
    /// - The album name pattern is not a valid regular expression
    /// - The cron expression cannot be parsed
    pub fn build(self) -> Result<CoreConfig> {
        let api_url = self
            .api_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| Error::Config("The Immich API URL is required".to_string()))?;

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "The Immich API URL must start with http:// or https:// (got '{}')",
                api_url
            )));
        }

        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("The Immich API key is required".to_string()))?;

        let album_name_pattern = match self.album_name_pattern.filter(|p| !p.is_empty()) {
            Some(pattern) => Some(Regex::new(&pattern).map_err(|e| {
                Error::Config(format!("Invalid album name pattern '{}': {}", pattern, e))
            })?),
            None => None,
        };

        let cron_expression = self.cron_expression.filter(|e| !e.trim().is_empty());
        let schedule = match cron_expression.as_deref() {
            Some(expression) => Some(parse_schedule(expression)?),
            None => None,
        };

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client()?,
        };

        let file_system = match self.file_system {
            Some(fs) => fs,
            None => provide_default_file_system()?,
        };

        Ok(CoreConfig {
            api_url,
            api_key,
            album_name_pattern,
            chunk_size: self.chunk_size.filter(|size| *size > 0),
            dry_run: self.dry_run,
            delete_all_albums: self.delete_all_albums,
            schedule,
            cron_expression,
            http_client,
            file_system,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::storage::FileMetadata;
    use bridge_traits::{HttpRequest, HttpResponse};
    use bytes::Bytes;
    use std::path::Path;

    struct NullHttpClient;

    #[async_trait]
    impl HttpClient for NullHttpClient {
        async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
            Err(BridgeError::NotAvailable("http".to_string()))
        }
    }

    struct NullFileSystem;

    #[async_trait]
    impl FileSystemAccess for NullFileSystem {
        async fn exists(&self, _path: &Path) -> BridgeResult<bool> {
            Ok(false)
        }

        async fn metadata(&self, _path: &Path) -> BridgeResult<FileMetadata> {
            Err(BridgeError::NotAvailable("metadata".to_string()))
        }

        async fn read_file(&self, _path: &Path) -> BridgeResult<Bytes> {
            Err(BridgeError::NotAvailable("read_file".to_string()))
        }
    }

    fn builder() -> CoreConfigBuilder {
        CoreConfig::builder()
            .api_url("http://immich.local:2283/api/")
            .api_key("secret")
            .http_client(Arc::new(NullHttpClient))
            .file_system(Arc::new(NullFileSystem))
    }

    #[test]
    fn test_minimal_config() {
        let config = builder().build().unwrap();

        assert_eq!(config.api_url, "http://immich.local:2283/api");
        assert_eq!(config.api_key, "secret");
        assert!(config.album_name_pattern.is_none());
        assert_eq!(config.chunk_size, None);
        assert!(!config.dry_run);
        assert!(!config.delete_all_albums);
        assert!(config.schedule.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = builder()
            .album_name_pattern(r"\d+")
            .chunk_size(200)
            .dry_run(true)
            .delete_all_albums(true)
            .cron_expression("*/15 * * * *")
            .build()
            .unwrap();

        assert_eq!(config.album_name_pattern.unwrap().as_str(), r"\d+");
        assert_eq!(config.chunk_size, Some(200));
        assert!(config.dry_run);
        assert!(config.delete_all_albums);
        assert!(config.schedule.is_some());
        assert_eq!(config.cron_expression.as_deref(), Some("*/15 * * * *"));
    }

    #[test]
    fn test_zero_chunk_size_means_unbounded() {
        let config = builder().chunk_size(0).build().unwrap();
        assert_eq!(config.chunk_size, None);
    }

    #[test]
    fn test_missing_api_url() {
        let result = CoreConfig::builder()
            .api_key("secret")
            .http_client(Arc::new(NullHttpClient))
            .file_system(Arc::new(NullFileSystem))
            .build();

        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("URL")));
    }

    #[test]
    fn test_empty_api_key() {
        let result = builder().api_key("  ").build();
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("key")));
    }

    #[test]
    fn test_api_url_scheme_is_checked() {
        let result = builder().api_url("immich.local/api").build();
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("http://")));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = builder().album_name_pattern("(unclosed").build();
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("pattern")));
    }

    #[test]
    fn test_invalid_cron_expression() {
        let result = builder().cron_expression("every tuesday").build();
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("cron")));
    }

    #[test]
    fn test_normalize_cron_expression() {
        assert_eq!(normalize_cron_expression("*/5 * * * *"), "0 */5 * * * *");
        assert_eq!(normalize_cron_expression(" 0 0 3 * * * "), "0 0 3 * * *");
        assert_eq!(
            normalize_cron_expression("0 30 2 * * Sun 2030"),
            "0 30 2 * * Sun 2030"
        );
    }

    #[test]
    fn test_parse_schedule_has_upcoming_fire_time() {
        let schedule = parse_schedule("0 3 * * *").unwrap();
        assert!(schedule.upcoming(chrono::Utc).next().is_some());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = builder().api_key("super-secret-key").build().unwrap();
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
