//! Platform client abstractions.
//!
//! The pipeline talks to the transcoding service and the CDN through these
//! traits. The AWS implementations live in the `aws` module; tests inject
//! in-memory fakes.

use async_trait::async_trait;
use serde_json::Value;

/// A transcode job ready for submission: the role the service assumes, the
/// asset id carried as user metadata (`assetID`), and the filled settings
/// document.
#[derive(Debug, Clone)]
pub struct TranscodeJobRequest {
    pub role_arn: String,
    pub asset_id: String,
    pub settings: Value,
}

/// Transcoding service operations.
#[async_trait]
pub trait TranscodeBackend: Send + Sync {
    /// Submit a job and return its id.
    async fn create_job(&self, request: TranscodeJobRequest) -> anyhow::Result<String>;
}

/// CDN cache operations.
#[async_trait]
pub trait CdnBackend: Send + Sync {
    /// Invalidate cached paths on a distribution and return the
    /// invalidation id. `caller_reference` must be unique per call.
    async fn invalidate(
        &self,
        distribution_id: &str,
        paths: &[String],
        caller_reference: &str,
    ) -> anyhow::Result<String>;
}
