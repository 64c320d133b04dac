//! # Immich Provider
//!
//! Implements the `AlbumService` trait for the Immich REST API.
//!
//! ## Overview
//!
//! This module provides:
//! - API-key authentication (`x-api-key` header)
//! - Album listing, creation, deletion and membership updates
//! - Folder view queries (unique asset paths, assets under a path)
//!
//! Requests are sent once; a non-2xx answer becomes
//! [`ImmichError::Http`] carrying the status and body.

pub mod connector;
pub mod error;
pub mod types;

pub use connector::ImmichConnector;
pub use error::{ImmichError, Result};
