//! # Album Descriptors
//!
//! Every album directory carries a `.album` marker file. The marker may be
//! empty, or it may hold a YAML mapping overriding the album's properties:
//!
//! ```yaml
//! name: Summer in Lisbon
//! description: Two weeks, three cameras
//! order: asc
//! recursive: true
//! ```
//!
//! Unrecognized keys are ignored. `name`, `description` and `recursive` with a
//! value of the wrong shape make the descriptor malformed; `order` never does.

use crate::error::{Result, SyncError};
use bridge_traits::storage::FileSystemAccess;
use regex::Regex;
use serde::Deserialize;
use serde_yaml::Value;
use std::path::Path;
use tracing::debug;

/// File name that marks a directory as an album root.
pub const MARKER_FILE_NAME: &str = ".album";

/// Sort order recorded in a descriptor.
///
/// Carried for completeness; it is not sent to the photo service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlbumOrder {
    Asc,
    #[default]
    Desc,
}

/// Fully resolved properties of one album directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumDescriptor {
    pub name: String,
    pub description: String,
    pub order: AlbumOrder,
    pub recursive: bool,
}

/// Marker file contents as written by the user.
#[derive(Debug, Default, Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    order: Option<Value>,
    #[serde(default)]
    recursive: Option<Value>,
}

/// Derive the album name from a directory's leaf name.
///
/// With a pattern, the first non-empty match within the leaf wins; without one,
/// or when nothing matches, the whole leaf is used. A path with no leaf (the
/// filesystem root) falls back to its full rendering.
pub fn album_name_for(directory: &Path, pattern: Option<&Regex>) -> String {
    let leaf = directory
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| directory.display().to_string());

    match pattern.and_then(|re| re.find(&leaf)) {
        Some(found) if !found.as_str().is_empty() => found.as_str().to_string(),
        _ => leaf,
    }
}

/// Resolve the descriptor for `directory`.
///
/// A missing or empty marker yields the defaults: name derived from the
/// directory, empty description, descending order, recursive.
pub async fn resolve_descriptor(
    fs: &dyn FileSystemAccess,
    directory: &Path,
    pattern: Option<&Regex>,
) -> Result<AlbumDescriptor> {
    let marker = directory.join(MARKER_FILE_NAME);

    let raw = if fs
        .is_file(&marker)
        .await
        .map_err(|e| SyncError::file_system(&marker, e))?
    {
        let bytes = fs
            .read_file(&marker)
            .await
            .map_err(|e| SyncError::file_system(&marker, e))?;
        std::str::from_utf8(&bytes)
            .map_err(|e| format!("not valid UTF-8: {}", e))
            .and_then(parse_marker)
            .map_err(|reason| SyncError::MalformedDescriptor {
                path: marker.clone(),
                reason,
            })?
    } else {
        RawDescriptor::default()
    };

    let malformed = |reason: String| SyncError::MalformedDescriptor {
        path: marker.clone(),
        reason,
    };

    let name = scalar_string("name", raw.name).map_err(malformed)?;
    let description = scalar_string("description", raw.description).map_err(malformed)?;
    let recursive = flag("recursive", raw.recursive).map_err(malformed)?;

    Ok(AlbumDescriptor {
        name: name.unwrap_or_else(|| album_name_for(directory, pattern)),
        description: description.unwrap_or_default(),
        order: order_hint(&marker, raw.order),
        recursive: recursive.unwrap_or(true),
    })
}

fn parse_marker(contents: &str) -> std::result::Result<RawDescriptor, String> {
    if contents.trim().is_empty() {
        return Ok(RawDescriptor::default());
    }

    let value: Value = serde_yaml::from_str(contents).map_err(|e| e.to_string())?;
    if value.is_null() {
        return Ok(RawDescriptor::default());
    }

    serde_yaml::from_value(value).map_err(|e| e.to_string())
}

/// Accept any YAML scalar as text so `name: 2024` names an album "2024".
fn scalar_string(key: &str, value: Option<Value>) -> std::result::Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(format!("`{}` must be a scalar, found {}", key, kind(&other))),
    }
}

/// Booleans, plus the YAML 1.1 spellings (`yes`, `off`, ...) hand-written
/// markers tend to use.
fn flag(key: &str, value: Option<Value>) -> std::result::Result<Option<bool>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" => Ok(Some(true)),
            "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(format!("`{}` must be a boolean, found \"{}\"", key, s)),
        },
        Some(other) => Err(format!("`{}` must be a boolean, found {}", key, kind(&other))),
    }
}

/// `asc` / `desc` in any case; anything else is the default order.
fn order_hint(marker: &Path, value: Option<Value>) -> AlbumOrder {
    match value {
        None | Some(Value::Null) => AlbumOrder::default(),
        Some(Value::String(s)) if s.eq_ignore_ascii_case("asc") => AlbumOrder::Asc,
        Some(Value::String(s)) if s.eq_ignore_ascii_case("desc") => AlbumOrder::Desc,
        Some(other) => {
            debug!(marker = %marker.display(), value = ?other, "Unrecognized album order, using desc");
            AlbumOrder::default()
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
