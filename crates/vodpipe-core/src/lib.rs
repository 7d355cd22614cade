//! Core types for the vodpipe ingest service.
//!
//! This crate provides the error types, configuration, storage-key
//! derivation, and upload-event models shared by the pipeline and the CLI.
//!
//! # Key derivation
//!
//! An uploaded object key like `pwe/failed_tests.mp4` is derived into a
//! basename (`failed_tests`) and a joined key (`pwe/failed_tests`). The
//! joined key has no root marker and no extension; downstream code uses it
//! to build CDN invalidation paths and transcode output destinations.
//! Derivation is centralized in the `keys` module so every consumer agrees
//! on the same layout.

pub mod config;
pub mod error;
pub mod keys;
pub mod models;

// Re-export commonly used types
pub use config::IngestConfig;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use keys::{DerivedAssetPath, StorageKey};
pub use models::{UploadNotification, VideoRecord};
