//! Object-storage upload notification models.
//!
//! Mirrors the notification document delivered when an object lands in the
//! source bucket: a `Records` array where each record carries the bucket
//! name and the object key. Only the fields the pipeline consumes are
//! modeled; unknown fields are ignored during deserialization.

use serde::Deserialize;

use crate::error::AppError;

/// A storage upload notification (`Records[].s3.{bucket,object}`).
#[derive(Debug, Clone, Deserialize)]
pub struct UploadNotification {
    #[serde(rename = "Records", default)]
    pub records: Vec<UploadRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadRecord {
    pub s3: StorageEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageEntity {
    pub bucket: BucketEntity,
    pub object: ObjectEntity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketEntity {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectEntity {
    pub key: String,
}

/// The uploaded video the pipeline acts on: source bucket plus decoded
/// object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub bucket_name: String,
    pub object_key: String,
}

impl VideoRecord {
    /// Extract the video record from the first record of a notification.
    ///
    /// Object keys arrive percent-encoded, with spaces as `+`; the key is
    /// decoded here so the rest of the pipeline sees the real key.
    pub fn from_notification(notification: &UploadNotification) -> Result<Self, AppError> {
        let record = notification
            .records
            .first()
            .ok_or_else(|| AppError::InvalidEvent("notification contains no records".to_string()))?;

        let raw_key = record.s3.object.key.replace('+', " ");
        let object_key = urlencoding::decode(&raw_key)
            .map_err(|e| AppError::InvalidEvent(format!("object key is not valid UTF-8: {}", e)))?
            .into_owned();

        Ok(VideoRecord {
            bucket_name: record.s3.bucket.name.clone(),
            object_key,
        })
    }
}
