//! Transcode job settings template.
//!
//! The job settings ship as a static JSON document (encoder settings,
//! output groups, codec parameters) and the pipeline fills three fields per
//! ingest: the source file input, the HLS group destination, and the
//! thumbnail (file group) destination. The rest of the document passes
//! through untouched. Expected shape:
//!
//! - `Inputs[0].FileInput`
//! - `OutputGroups[0].OutputGroupSettings.HlsGroupSettings.Destination`
//! - `OutputGroups[1].OutputGroupSettings.FileGroupSettings.Destination`

use std::fs;
use std::path::Path;

use serde_json::Value;

use vodpipe_core::error::AppError;

use crate::destinations::OutputLocations;

/// An immutable job settings document; `fill` returns a per-ingest copy.
#[derive(Debug, Clone)]
pub struct JobTemplate {
    settings: Value,
}

impl JobTemplate {
    /// Load the template from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::JobTemplate(format!(
                "failed to read job template {}: {}",
                path.display(),
                e
            ))
        })?;
        let settings: Value = serde_json::from_str(&raw).map_err(|e| {
            AppError::JobTemplate(format!(
                "job template {} is not valid JSON: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self { settings })
    }

    pub fn from_value(settings: Value) -> Self {
        Self { settings }
    }

    /// Produce a filled settings document for one ingest.
    pub fn fill(
        &self,
        input_url: &str,
        locations: &OutputLocations,
    ) -> Result<Value, AppError> {
        let mut settings = self.settings.clone();

        *field_mut(&mut settings, &["Inputs", "0", "FileInput"])? =
            Value::String(input_url.to_string());
        *field_mut(
            &mut settings,
            &[
                "OutputGroups",
                "0",
                "OutputGroupSettings",
                "HlsGroupSettings",
                "Destination",
            ],
        )? = Value::String(locations.hls_destination.clone());
        *field_mut(
            &mut settings,
            &[
                "OutputGroups",
                "1",
                "OutputGroupSettings",
                "FileGroupSettings",
                "Destination",
            ],
        )? = Value::String(locations.thumbnail_destination.clone());

        Ok(settings)
    }
}

/// Walk a path of object keys / array indices to a mutable leaf.
fn field_mut<'a>(root: &'a mut Value, path: &[&str]) -> Result<&'a mut Value, AppError> {
    let mut current = root;
    for (depth, part) in path.iter().enumerate() {
        let next = match part.parse::<usize>() {
            Ok(index) => current.get_mut(index),
            Err(_) => current.get_mut(*part),
        };
        current = next.ok_or_else(|| {
            AppError::JobTemplate(format!(
                "job settings missing {}",
                path[..=depth].join(".")
            ))
        })?;
    }
    Ok(current)
}
