//! # Sync Coordinator
//!
//! Runs one pass of folder-to-album synchronization against a photo service.
//!
//! ## Workflow
//!
//! 1. Optionally delete every remote album (also in dry-run mode)
//! 2. Fetch the folder paths that hold assets
//! 3. Discover album roots by probing for marker files
//! 4. Snapshot existing albums into a name → id map
//! 5. For each album root, in ascending path order:
//!    - resolve its descriptor
//!    - find or create the album by exact name
//!    - collect asset ids from the root (and descendants when recursive)
//!    - submit ids in chunks
//!
//! A pass never removes assets from albums and never renames albums. The first
//! failing remote call aborts the pass; albums handled before it keep their
//! changes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use core_sync::{SyncConfig, SyncCoordinator};
//!
//! let coordinator = SyncCoordinator::new(SyncConfig::from(&config), albums, fs);
//! match coordinator.run().await? {
//!     RunOutcome::Completed(report) => println!("{} albums", report.albums_discovered),
//!     RunOutcome::Skipped => println!("previous pass still running"),
//! }
//! ```

use crate::{
    descriptor::{resolve_descriptor, AlbumDescriptor},
    discovery::discover_album_directories,
    run_guard::{RunGuard, RunOutcome},
    Result, SyncError,
};
use bridge_traits::{albums::AlbumService, storage::FileSystemAccess};
use core_runtime::config::CoreConfig;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, info_span, instrument, trace, Instrument};

/// Behavior switches for a sync pass
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    /// Derive album names from the first match within the directory name
    pub album_name_pattern: Option<Regex>,

    /// Maximum asset ids per add request. `None` sends everything at once.
    pub chunk_size: Option<usize>,

    /// Resolve and log album names without creating albums or adding assets
    pub dry_run: bool,

    /// Delete every remote album before syncing
    pub delete_all_albums: bool,
}

impl SyncConfig {
    /// Compile and set the album name pattern.
    pub fn with_album_name_pattern(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| SyncError::InvalidNamePattern(format!("'{}': {}", pattern, e)))?;
        self.album_name_pattern = Some(regex);
        Ok(self)
    }
}

impl From<&CoreConfig> for SyncConfig {
    fn from(config: &CoreConfig) -> Self {
        Self {
            album_name_pattern: config.album_name_pattern.clone(),
            chunk_size: config.chunk_size,
            dry_run: config.dry_run,
            delete_all_albums: config.delete_all_albums,
        }
    }
}

/// Counters collected over one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Album roots found (marker files)
    pub albums_discovered: usize,

    /// Albums created during the pass
    pub albums_created: usize,

    /// Existing albums that received assets
    pub albums_updated: usize,

    /// Asset ids sent across all add requests
    pub assets_submitted: usize,

    /// Add requests sent
    pub chunks_submitted: usize,

    pub dry_run: bool,
}

/// Split asset ids into add requests.
///
/// No ids means no requests. A missing or zero chunk size keeps all ids in a
/// single request.
pub fn chunk_asset_ids(ids: &[String], chunk_size: Option<usize>) -> Vec<&[String]> {
    if ids.is_empty() {
        return Vec::new();
    }

    match chunk_size {
        Some(size) if size > 0 => ids.chunks(size).collect(),
        _ => vec![ids],
    }
}

/// Folder-to-album sync coordinator
pub struct SyncCoordinator {
    config: SyncConfig,
    albums: Arc<dyn AlbumService>,
    file_system: Arc<dyn FileSystemAccess>,
    run_guard: RunGuard,
}

impl SyncCoordinator {
    pub fn new(
        config: SyncConfig,
        albums: Arc<dyn AlbumService>,
        file_system: Arc<dyn FileSystemAccess>,
    ) -> Self {
        Self {
            config,
            albums,
            file_system,
            run_guard: RunGuard::new(),
        }
    }

    /// Share a guard with other coordinators so their passes exclude each other.
    pub fn with_run_guard(mut self, run_guard: RunGuard) -> Self {
        self.run_guard = run_guard;
        self
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn run_guard(&self) -> &RunGuard {
        &self.run_guard
    }

    /// Run a pass unless one is already in progress.
    ///
    /// Returns [`RunOutcome::Skipped`] without touching the service when the
    /// guard is held. The guard is released when the pass ends, including on
    /// error.
    pub async fn run(&self) -> Result<RunOutcome<SyncReport>> {
        match self.run_guard.try_run(|| self.sync_once()).await {
            RunOutcome::Completed(result) => result.map(RunOutcome::Completed),
            RunOutcome::Skipped => Ok(RunOutcome::Skipped),
        }
    }

    /// Run a single pass, ignoring the guard.
    #[instrument(name = "sync_pass", skip(self), fields(dry_run = self.config.dry_run))]
    pub async fn sync_once(&self) -> Result<SyncReport> {
        let mut report = SyncReport {
            dry_run: self.config.dry_run,
            ..SyncReport::default()
        };

        if self.config.delete_all_albums {
            debug!("Deleting all albums");
            self.albums.delete_all_albums().await?;
        }

        let asset_paths: BTreeMap<PathBuf, String> = self
            .albums
            .list_unique_asset_paths()
            .await?
            .into_iter()
            .map(|path| (PathBuf::from(&path), path))
            .collect();
        debug!("{} folders hold assets", asset_paths.len());

        let album_dirs =
            discover_album_directories(self.file_system.as_ref(), asset_paths.keys()).await?;
        report.albums_discovered = album_dirs.len();

        let mut album_ids: HashMap<String, String> = HashMap::new();
        for album in self.albums.list_albums().await? {
            album_ids.entry(album.album_name).or_insert(album.id);
        }

        for album_dir in &album_dirs {
            let span = info_span!("album", directory = %album_dir.display());
            self.sync_album(album_dir, &asset_paths, &mut album_ids, &mut report)
                .instrument(span)
                .await?;
        }

        debug!(
            discovered = report.albums_discovered,
            created = report.albums_created,
            updated = report.albums_updated,
            assets = report.assets_submitted,
            "Sync pass finished"
        );

        Ok(report)
    }

    async fn sync_album(
        &self,
        album_dir: &Path,
        asset_paths: &BTreeMap<PathBuf, String>,
        album_ids: &mut HashMap<String, String>,
        report: &mut SyncReport,
    ) -> Result<()> {
        info!("{}", album_dir.display());

        let descriptor = resolve_descriptor(
            self.file_system.as_ref(),
            album_dir,
            self.config.album_name_pattern.as_ref(),
        )
        .await?;
        debug!("Album name: '{}'", descriptor.name);

        if self.config.dry_run {
            if !album_ids.contains_key(&descriptor.name) {
                debug!("Album '{}' would be created", descriptor.name);
            }
            return Ok(());
        }

        let album_id = match album_ids.get(&descriptor.name) {
            Some(id) => {
                report.albums_updated += 1;
                id.clone()
            }
            None => {
                debug!("Creating new album '{}'", descriptor.name);
                let album = self
                    .albums
                    .create_album(&descriptor.name, &descriptor.description)
                    .await?;
                album_ids.insert(descriptor.name.clone(), album.id.clone());
                report.albums_created += 1;
                album.id
            }
        };

        let asset_ids = self
            .collect_asset_ids(album_dir, &descriptor, asset_paths)
            .await?;
        debug!("{} assets found", asset_ids.len());

        let asset_ids: Vec<String> = asset_ids.into_iter().collect();
        for chunk in chunk_asset_ids(&asset_ids, self.config.chunk_size) {
            trace!(
                "Adding {} assets to album '{}' (album id: {})",
                chunk.len(),
                descriptor.name,
                album_id
            );
            self.albums.add_assets_to_album(&album_id, chunk).await?;
            report.chunks_submitted += 1;
            report.assets_submitted += chunk.len();
        }

        Ok(())
    }

    /// Asset ids directly in `album_dir`, plus those in every asset folder
    /// below it when the descriptor is recursive.
    async fn collect_asset_ids(
        &self,
        album_dir: &Path,
        descriptor: &AlbumDescriptor,
        asset_paths: &BTreeMap<PathBuf, String>,
    ) -> Result<BTreeSet<String>> {
        let root = asset_paths
            .get(album_dir)
            .cloned()
            .unwrap_or_else(|| album_dir.to_string_lossy().into_owned());

        let mut ids: BTreeSet<String> = self
            .albums
            .list_folder_assets(&root)
            .await?
            .into_iter()
            .map(|asset| asset.id)
            .collect();

        if descriptor.recursive {
            let descendants = asset_paths
                .iter()
                .filter(|(path, _)| path.as_path() != album_dir && path.starts_with(album_dir));

            for (_, folder) in descendants {
                let assets = self.albums.list_folder_assets(folder).await?;
                trace!("{} assets in {}", assets.len(), folder);
                ids.extend(assets.into_iter().map(|asset| asset.id));
            }
        }

        Ok(ids)
    }
}
