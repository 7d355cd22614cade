//! Storage-key derivation.
//!
//! Key format: an object key is a `/`-delimited path whose final segment
//! carries the file extension, e.g. `pwe/failed_tests.mp4`. Derivation
//! produces the asset basename (`failed_tests`) and the joined key
//! (`pwe/failed_tests`): root marker stripped, extension stripped, segments
//! joined with `/`. The joined key is what destination and invalidation
//! paths are built from, so all consumers must go through this module.

use crate::error::AppError;

/// A hierarchical object-storage key, held as its `/`-separated segments.
///
/// An absolute-style key (`/a/b/c.mp4`) is represented with a leading empty
/// segment, which derivation treats as a root marker and drops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey {
    segments: Vec<String>,
}

impl StorageKey {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Derive the asset basename and the joined key.
    ///
    /// Steps: drop a leading empty segment (root marker), replace the final
    /// segment with its stem, join with `/`. The stem uses the last-dot
    /// convention: `b.tar.gz` yields `b.tar`. A final segment without a dot,
    /// or with only a leading dot (`.gitignore`), has no extension and is
    /// used unchanged.
    ///
    /// Fails with `AppError::InvalidKey` when no segments remain.
    pub fn derive(&self) -> Result<DerivedAssetPath, AppError> {
        let mut segments: &[String] = &self.segments;
        if segments.first().is_some_and(|s| s.is_empty()) {
            segments = &segments[1..];
        }

        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| AppError::InvalidKey("empty storage key".to_string()))?;

        let stem = match last.rfind('.') {
            Some(idx) if idx > 0 => &last[..idx],
            _ => last.as_str(),
        };

        let mut parts: Vec<&str> = parents.iter().map(String::as_str).collect();
        parts.push(stem);

        Ok(DerivedAssetPath {
            basename: stem.to_string(),
            joined_key: parts.join("/"),
        })
    }
}

impl From<&str> for StorageKey {
    fn from(key: &str) -> Self {
        Self {
            segments: key.split('/').map(str::to_string).collect(),
        }
    }
}

/// The values derived from a storage key, computed once per ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedAssetPath {
    /// Final segment without directory or extension; identifies the asset.
    pub basename: String,
    /// All segments joined with `/`, extension and root marker removed.
    /// Never starts with `/` and never contains `//`.
    pub joined_key: String,
}
