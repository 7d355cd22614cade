//! Upload ingest orchestration: parse notification → derive paths →
//! invalidate CDN → submit transcode job.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use vodpipe_core::error::AppError;
use vodpipe_core::{IngestConfig, StorageKey, UploadNotification, VideoRecord};

use crate::destinations::{source_url, OutputLocations};
use crate::job_template::JobTemplate;
use crate::traits::{CdnBackend, TranscodeBackend, TranscodeJobRequest};

/// What one ingest will do, computed before any platform call. Also the
/// dry-run output.
#[derive(Debug, Clone, Serialize)]
pub struct IngestPlan {
    pub asset_id: String,
    pub source_bucket: String,
    pub input_url: String,
    pub hls_destination: String,
    pub thumbnail_destination: String,
    pub invalidation_path: String,
}

impl IngestPlan {
    /// Validate the notification and compute destinations, without touching
    /// the platform.
    pub fn from_notification(
        config: &IngestConfig,
        notification: &UploadNotification,
    ) -> Result<Self, AppError> {
        let record = VideoRecord::from_notification(notification)?;
        check_extension(&record.object_key, &config.allowed_extensions)?;

        let derived = StorageKey::from(record.object_key.as_str()).derive()?;
        let locations = OutputLocations::new(&config.destination_bucket, &derived);

        Ok(IngestPlan {
            asset_id: derived.basename,
            input_url: source_url(&record.bucket_name, &record.object_key),
            source_bucket: record.bucket_name,
            hls_destination: locations.hls_destination,
            thumbnail_destination: locations.thumbnail_destination,
            invalidation_path: locations.invalidation_path,
        })
    }
}

/// Receipt for a completed ingest run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReceipt {
    pub asset_id: String,
    pub job_id: String,
    pub invalidation_id: String,
    pub hls_destination: String,
    pub thumbnail_destination: String,
    pub completed_at: DateTime<Utc>,
}

/// Orchestrates one upload end to end. Stateless between runs; any failing
/// step aborts the run and the error surfaces to the caller.
pub struct IngestPipeline {
    transcode: Arc<dyn TranscodeBackend>,
    cdn: Arc<dyn CdnBackend>,
    template: JobTemplate,
    config: IngestConfig,
}

impl IngestPipeline {
    pub fn new(
        transcode: Arc<dyn TranscodeBackend>,
        cdn: Arc<dyn CdnBackend>,
        template: JobTemplate,
        config: IngestConfig,
    ) -> Self {
        Self {
            transcode,
            cdn,
            template,
            config,
        }
    }

    /// Run the full pipeline for an upload notification.
    pub async fn process_upload(
        &self,
        notification: &UploadNotification,
    ) -> Result<IngestReceipt, AppError> {
        let plan = IngestPlan::from_notification(&self.config, notification)?;

        tracing::info!(
            asset_id = %plan.asset_id,
            input = %plan.input_url,
            "Processing upload notification"
        );

        // Purge stale CDN entries for this asset before new outputs land.
        let caller_reference = Uuid::new_v4().to_string();
        let invalidation_id = self
            .cdn
            .invalidate(
                &self.config.cdn_distribution_id,
                std::slice::from_ref(&plan.invalidation_path),
                &caller_reference,
            )
            .await
            .map_err(|e| AppError::Cdn(format!("{e:#}")))?;

        tracing::info!(
            asset_id = %plan.asset_id,
            invalidation_id = %invalidation_id,
            path = %plan.invalidation_path,
            "CDN invalidation created"
        );

        let locations = OutputLocations {
            hls_destination: plan.hls_destination.clone(),
            thumbnail_destination: plan.thumbnail_destination.clone(),
            invalidation_path: plan.invalidation_path.clone(),
        };
        let settings = self.template.fill(&plan.input_url, &locations)?;

        let job_id = self
            .transcode
            .create_job(TranscodeJobRequest {
                role_arn: self.config.media_convert_role_arn.clone(),
                asset_id: plan.asset_id.clone(),
                settings,
            })
            .await
            .map_err(|e| AppError::Transcode(format!("{e:#}")))?;

        tracing::info!(
            asset_id = %plan.asset_id,
            job_id = %job_id,
            hls_destination = %plan.hls_destination,
            "Transcode job submitted"
        );

        Ok(IngestReceipt {
            asset_id: plan.asset_id,
            job_id,
            invalidation_id,
            hls_destination: plan.hls_destination,
            thumbnail_destination: plan.thumbnail_destination,
            completed_at: Utc::now(),
        })
    }
}

/// Reject source keys whose extension is not in the allowed list.
fn check_extension(object_key: &str, allowed: &[String]) -> Result<(), AppError> {
    let extension = object_key
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension {
        Some(ref ext) if allowed.iter().any(|a| a == ext) => Ok(()),
        _ => Err(AppError::UnsupportedMediaType(format!(
            "object key {} does not end in an allowed extension ({})",
            object_key,
            allowed.join(", ")
        ))),
    }
}
