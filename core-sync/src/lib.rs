//! # Folder Album Sync
//!
//! Mirrors a directory tree into photo-service albums.
//!
//! ## Overview
//!
//! A directory holding a `.album` marker file is an album root. Each pass:
//! - Discovers album roots from the folders the service reports assets in
//! - Resolves each root's descriptor (name, description, recursion)
//! - Finds or creates the album by name and adds the folder's assets to it
//!
//! Passes are additive and idempotent: re-running against an unchanged tree
//! creates nothing new.
//!
//! ## Components
//!
//! - **Descriptors** (`descriptor`): Marker file parsing and album naming
//! - **Discovery** (`discovery`): Album roots from asset folder paths
//! - **Run Guard** (`run_guard`): Skips a pass while another is running
//! - **Sync Coordinator** (`coordinator`): Drives a pass end to end

pub mod coordinator;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod run_guard;

pub use coordinator::{chunk_asset_ids, SyncConfig, SyncCoordinator, SyncReport};
pub use descriptor::{
    album_name_for, resolve_descriptor, AlbumDescriptor, AlbumOrder, MARKER_FILE_NAME,
};
pub use discovery::{candidate_directories, discover_album_directories};
pub use error::{Result, SyncError};
pub use run_guard::{RunGuard, RunOutcome};
