//! Ingest pipeline tests with in-memory platform backends.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use vodpipe_core::error::AppError;
use vodpipe_core::{IngestConfig, UploadNotification};
use vodpipe_services::{
    CdnBackend, IngestPipeline, IngestPlan, JobTemplate, TranscodeBackend, TranscodeJobRequest,
};

#[derive(Default)]
struct RecordingTranscode {
    jobs: Mutex<Vec<TranscodeJobRequest>>,
}

#[async_trait]
impl TranscodeBackend for RecordingTranscode {
    async fn create_job(&self, request: TranscodeJobRequest) -> anyhow::Result<String> {
        self.jobs.lock().unwrap().push(request);
        Ok("job-1".to_string())
    }
}

#[derive(Default)]
struct RecordingCdn {
    invalidations: Mutex<Vec<(String, Vec<String>, String)>>,
}

#[async_trait]
impl CdnBackend for RecordingCdn {
    async fn invalidate(
        &self,
        distribution_id: &str,
        paths: &[String],
        caller_reference: &str,
    ) -> anyhow::Result<String> {
        self.invalidations.lock().unwrap().push((
            distribution_id.to_string(),
            paths.to_vec(),
            caller_reference.to_string(),
        ));
        Ok("inv-1".to_string())
    }
}

struct FailingCdn;

#[async_trait]
impl CdnBackend for FailingCdn {
    async fn invalidate(
        &self,
        _distribution_id: &str,
        _paths: &[String],
        _caller_reference: &str,
    ) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("distribution does not exist"))
    }
}

fn config() -> IngestConfig {
    IngestConfig {
        region: "eu-west-1".to_string(),
        destination_bucket: "jetvideo-dest".to_string(),
        media_convert_role_arn: "arn:aws:iam::123456789012:role/MediaConvertRole".to_string(),
        cdn_distribution_id: "E1166YMX8A3BF5".to_string(),
        job_template_path: "job.json".to_string(),
        allowed_extensions: vec!["mp4".to_string()],
    }
}

fn template() -> JobTemplate {
    JobTemplate::from_value(json!({
        "Inputs": [ { "FileInput": "" } ],
        "OutputGroups": [
            { "OutputGroupSettings": { "HlsGroupSettings": { "Destination": "" } } },
            { "OutputGroupSettings": { "FileGroupSettings": { "Destination": "" } } }
        ]
    }))
}

fn notification(key: &str) -> UploadNotification {
    serde_json::from_value(json!({
        "Records": [
            { "s3": { "bucket": { "name": "jetvideo-source" }, "object": { "key": key } } }
        ]
    }))
    .unwrap()
}

fn pipeline(
    transcode: Arc<RecordingTranscode>,
    cdn: Arc<dyn CdnBackend>,
) -> IngestPipeline {
    IngestPipeline::new(transcode, cdn, template(), config())
}

#[tokio::test]
async fn processes_upload_end_to_end() {
    let transcode = Arc::new(RecordingTranscode::default());
    let cdn = Arc::new(RecordingCdn::default());
    let pipeline = pipeline(transcode.clone(), cdn.clone());

    let receipt = pipeline
        .process_upload(&notification("pwe/failed_tests.mp4"))
        .await
        .unwrap();

    assert_eq!(receipt.asset_id, "failed_tests");
    assert_eq!(receipt.job_id, "job-1");
    assert_eq!(receipt.invalidation_id, "inv-1");
    assert_eq!(
        receipt.hls_destination,
        "s3://jetvideo-dest/assets/pwe/failed_tests/HLS/failed_tests"
    );
    assert_eq!(
        receipt.thumbnail_destination,
        "s3://jetvideo-dest/assets/pwe/failed_tests/Thumbnails/failed_tests"
    );

    let jobs = transcode.jobs.lock().unwrap();
    assert_eq!(jobs.len(), 1);
    let job = &jobs[0];
    assert_eq!(
        job.role_arn,
        "arn:aws:iam::123456789012:role/MediaConvertRole"
    );
    assert_eq!(job.asset_id, "failed_tests");
    assert_eq!(
        job.settings["Inputs"][0]["FileInput"],
        "s3://jetvideo-source/pwe/failed_tests.mp4"
    );
    assert_eq!(
        job.settings["OutputGroups"][0]["OutputGroupSettings"]["HlsGroupSettings"]["Destination"],
        "s3://jetvideo-dest/assets/pwe/failed_tests/HLS/failed_tests"
    );

    let invalidations = cdn.invalidations.lock().unwrap();
    assert_eq!(invalidations.len(), 1);
    let (distribution, paths, caller_reference) = &invalidations[0];
    assert_eq!(distribution, "E1166YMX8A3BF5");
    assert_eq!(paths, &["/assets/pwe/failed_tests/HLS/*".to_string()]);
    assert!(!caller_reference.is_empty());
}

#[tokio::test]
async fn caller_references_are_unique_per_run() {
    let transcode = Arc::new(RecordingTranscode::default());
    let cdn = Arc::new(RecordingCdn::default());
    let pipeline = pipeline(transcode, cdn.clone());

    pipeline
        .process_upload(&notification("a/first.mp4"))
        .await
        .unwrap();
    pipeline
        .process_upload(&notification("a/second.mp4"))
        .await
        .unwrap();

    let invalidations = cdn.invalidations.lock().unwrap();
    assert_eq!(invalidations.len(), 2);
    assert_ne!(invalidations[0].2, invalidations[1].2);
}

#[tokio::test]
async fn rejects_unsupported_extension_without_platform_calls() {
    let transcode = Arc::new(RecordingTranscode::default());
    let cdn = Arc::new(RecordingCdn::default());
    let pipeline = pipeline(transcode.clone(), cdn.clone());

    let err = pipeline
        .process_upload(&notification("docs/readme.txt"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UnsupportedMediaType(_)));
    assert!(transcode.jobs.lock().unwrap().is_empty());
    assert!(cdn.invalidations.lock().unwrap().is_empty());
}

#[tokio::test]
async fn rejects_notification_without_records() {
    let transcode = Arc::new(RecordingTranscode::default());
    let cdn = Arc::new(RecordingCdn::default());
    let pipeline = pipeline(transcode, cdn);

    let empty: UploadNotification = serde_json::from_value(json!({ "Records": [] })).unwrap();
    let err = pipeline.process_upload(&empty).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidEvent(_)));
}

#[tokio::test]
async fn cdn_failure_aborts_before_job_submission() {
    let transcode = Arc::new(RecordingTranscode::default());
    let pipeline = pipeline(transcode.clone(), Arc::new(FailingCdn));

    let err = pipeline
        .process_upload(&notification("pwe/failed_tests.mp4"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Cdn(_)));
    assert!(transcode.jobs.lock().unwrap().is_empty());
}

#[test]
fn plan_computes_destinations_without_backends() {
    let plan = IngestPlan::from_notification(&config(), &notification("a/b/c.mp4")).unwrap();
    assert_eq!(plan.asset_id, "c");
    assert_eq!(plan.source_bucket, "jetvideo-source");
    assert_eq!(plan.input_url, "s3://jetvideo-source/a/b/c.mp4");
    assert_eq!(plan.hls_destination, "s3://jetvideo-dest/assets/a/b/c/HLS/c");
    assert_eq!(
        plan.thumbnail_destination,
        "s3://jetvideo-dest/assets/a/b/c/Thumbnails/c"
    );
    assert_eq!(plan.invalidation_path, "/assets/a/b/c/HLS/*");
}
