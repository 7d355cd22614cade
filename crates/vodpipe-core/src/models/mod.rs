//! Data models for upload-event notifications.

pub mod event;

pub use event::{UploadNotification, VideoRecord};
