//! Album directory discovery
//!
//! The photo service reports the set of folders that directly contain assets.
//! A folder becomes an album root when it, or any folder above it, holds a
//! marker file. Directories are only ever probed for the marker; nothing is
//! listed or walked.

use crate::descriptor::MARKER_FILE_NAME;
use crate::error::{Result, SyncError};
use bridge_traits::storage::FileSystemAccess;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Every asset path together with all of its ancestors, deduplicated and in
/// ascending path order.
pub fn candidate_directories<I, P>(asset_paths: I) -> BTreeSet<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    asset_paths
        .into_iter()
        .flat_map(|path| {
            path.as_ref()
                .ancestors()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Candidate directories that contain a marker file, in ascending path order.
///
/// Nested album roots are both returned; each is synced on its own.
pub async fn discover_album_directories<I, P>(
    fs: &dyn FileSystemAccess,
    asset_paths: I,
) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut album_dirs = Vec::new();

    for dir in candidate_directories(asset_paths) {
        let marker = dir.join(MARKER_FILE_NAME);
        let is_album = fs
            .is_file(&marker)
            .await
            .map_err(|e| SyncError::file_system(&marker, e))?;

        if is_album {
            trace!(directory = %dir.display(), "Found album marker");
            album_dirs.push(dir);
        }
    }

    Ok(album_dirs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_include_every_ancestor() {
        let candidates = candidate_directories(["/photos/2024/jan", "/photos/2024/feb"]);

        let expected: Vec<PathBuf> = [
            "/",
            "/photos",
            "/photos/2024",
            "/photos/2024/feb",
            "/photos/2024/jan",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();
        assert_eq!(candidates.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_candidates_of_relative_paths_skip_empty() {
        let candidates = candidate_directories(["library/a"]);

        assert_eq!(
            candidates.into_iter().collect::<Vec<_>>(),
            vec![PathBuf::from("library"), PathBuf::from("library/a")]
        );
    }

    #[test]
    fn test_candidates_order_by_component() {
        let candidates = candidate_directories(["/p/a b", "/p/a/c"]);
        let ordered: Vec<_> = candidates.into_iter().collect();

        let a = ordered.iter().position(|p| p == Path::new("/p/a")).unwrap();
        let a_c = ordered.iter().position(|p| p == Path::new("/p/a/c")).unwrap();
        let a_b = ordered.iter().position(|p| p == Path::new("/p/a b")).unwrap();
        assert!(a < a_c);
        assert!(a_c < a_b);
    }

    #[test]
    fn test_no_asset_paths_no_candidates() {
        assert!(candidate_directories(Vec::<String>::new()).is_empty());
    }
}
