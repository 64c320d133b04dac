//! # Host Bridge Traits
//!
//! Capability traits the sync core depends on, implemented per host.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Single-shot async HTTP requests
//! - [`FileSystemAccess`](storage::FileSystemAccess) - Read-only local file access
//! - [`AlbumService`](albums::AlbumService) - Album and folder operations of a photo service
//!
//! ## Implementations
//!
//! | Trait              | Crate             | Backed by   |
//! |--------------------|-------------------|-------------|
//! | `HttpClient`       | `bridge-desktop`  | `reqwest`   |
//! | `FileSystemAccess` | `bridge-desktop`  | `tokio::fs` |
//! | `AlbumService`     | `provider-immich` | Immich REST |
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Transport
//! failures map to `BridgeError::Network`, non-2xx answers to
//! `BridgeError::Http`, so callers can tell "could not reach the service"
//! apart from "the service said no".
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` so implementations can be shared
//! behind `Arc` across tasks.

pub mod albums;
pub mod error;
pub mod http;
pub mod log;
pub mod storage;

pub use error::BridgeError;

// Re-export commonly used types
pub use albums::{AlbumService, RemoteAlbum, RemoteAsset};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use log::LogLevel;
pub use storage::{FileMetadata, FileSystemAccess};
