//! vodpipe — ingest an uploaded video: invalidate the CDN and submit a
//! transcode job.
//!
//! Configuration comes from the environment (see `IngestConfig::from_env`):
//! AWS_DEFAULT_REGION, DESTINATION_BUCKET, MEDIACONVERT_ROLE_ARN,
//! CDN_DISTRIBUTION_ID, and optionally JOB_TEMPLATE_PATH and
//! ALLOWED_SOURCE_EXTENSIONS.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;

use vodpipe_cli::init_tracing;
use vodpipe_core::error::{AppError, ErrorMetadata, LogLevel};
use vodpipe_core::{IngestConfig, UploadNotification};
use vodpipe_services::{
    CloudFrontBackend, IngestPipeline, IngestPlan, JobTemplate, MediaConvertBackend,
};

#[derive(Parser)]
#[command(name = "vodpipe", about = "Video upload ingest pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process an upload notification: invalidate the CDN and submit a
    /// transcode job
    Ingest {
        /// Path to the upload notification JSON document
        #[arg(long)]
        event: PathBuf,
        /// Compute destinations and print the plan without calling the
        /// platform
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Ingest { event, dry_run } => match ingest(&event, dry_run).await {
            Ok(body) => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "statusCode": 200,
                        "body": body,
                    }))?
                );
                Ok(())
            }
            Err(err) => {
                log_error(&err);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "statusCode": err.status_code(),
                        "error": err.error_code(),
                        "message": err.client_message(),
                    }))?
                );
                std::process::exit(1);
            }
        },
    }
}

async fn ingest(event: &PathBuf, dry_run: bool) -> Result<serde_json::Value, AppError> {
    let config = IngestConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;

    let raw = std::fs::read_to_string(event)
        .map_err(|e| AppError::InvalidEvent(format!("failed to read {}: {}", event.display(), e)))?;
    let notification: UploadNotification = serde_json::from_str(&raw)?;

    if dry_run {
        let plan = IngestPlan::from_notification(&config, &notification)?;
        return serde_json::to_value(&plan).map_err(AppError::from);
    }

    let template = JobTemplate::from_path(&config.job_template_path)?;

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;
    let transcode = MediaConvertBackend::new(&sdk_config)
        .await
        .context("failed to initialize transcode client")?;
    let cdn = CloudFrontBackend::new(&sdk_config);

    let pipeline = IngestPipeline::new(Arc::new(transcode), Arc::new(cdn), template, config);
    let receipt = pipeline.process_upload(&notification).await?;
    serde_json::to_value(&receipt).map_err(AppError::from)
}

fn log_error(err: &AppError) {
    let details = err.detailed_message();
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(error = %details, "Ingest failed"),
        LogLevel::Warn => tracing::warn!(error = %details, "Ingest failed"),
        LogLevel::Error => tracing::error!(error = %details, "Ingest failed"),
    }
}
