//! vodpipe platform services.
//!
//! This crate provides the ingest pipeline and its seams: the
//! `TranscodeBackend` and `CdnBackend` traits, the job settings template,
//! and output destination building. AWS-backed implementations
//! (MediaConvert + CloudFront) live behind the `aws` feature so the
//! pipeline stays testable without network access.

#[cfg(feature = "aws")]
pub mod aws;
pub mod destinations;
pub mod job_template;
pub mod pipeline;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "aws")]
pub use aws::{CloudFrontBackend, MediaConvertBackend};
pub use destinations::{source_url, OutputLocations};
pub use job_template::JobTemplate;
pub use pipeline::{IngestPipeline, IngestPlan, IngestReceipt};
pub use traits::{CdnBackend, TranscodeBackend, TranscodeJobRequest};
