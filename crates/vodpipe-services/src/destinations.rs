//! Output destination and invalidation path building.
//!
//! Layout under the destination bucket, per asset:
//!
//! - HLS renditions: `s3://{bucket}/assets/{joined_key}/HLS/{basename}`
//! - Thumbnails: `s3://{bucket}/assets/{joined_key}/Thumbnails/{basename}`
//!
//! The CDN serves the same tree, so the invalidation path for an asset is
//! `/assets/{joined_key}/HLS/*`.

use vodpipe_core::keys::DerivedAssetPath;

/// Where transcode outputs land and which CDN path goes stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocations {
    pub hls_destination: String,
    pub thumbnail_destination: String,
    pub invalidation_path: String,
}

impl OutputLocations {
    pub fn new(destination_bucket: &str, derived: &DerivedAssetPath) -> Self {
        let prefix = format!("assets/{}", derived.joined_key);
        Self {
            hls_destination: format!(
                "s3://{}/{}/HLS/{}",
                destination_bucket, prefix, derived.basename
            ),
            thumbnail_destination: format!(
                "s3://{}/{}/Thumbnails/{}",
                destination_bucket, prefix, derived.basename
            ),
            invalidation_path: format!("/{}/HLS/*", prefix),
        }
    }
}

/// URL of the uploaded source object.
pub fn source_url(bucket_name: &str, object_key: &str) -> String {
    format!("s3://{}/{}", bucket_name, object_key)
}
