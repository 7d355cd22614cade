//! MediaConvert transcode backend.
//!
//! MediaConvert requires endpoint discovery: `describe_endpoints` returns
//! the account-specific URL all job submissions must go to. The endpoint is
//! resolved once at construction.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_credential_types::provider::ProvideCredentials;
use aws_credential_types::Credentials;
use serde_json::Value;

use crate::traits::{TranscodeBackend, TranscodeJobRequest};

use super::sign::signed_post_json;

const SERVICE: &str = "mediaconvert";
const API_VERSION: &str = "2017-08-29";

pub struct MediaConvertBackend {
    http: reqwest::Client,
    credentials: Credentials,
    region: String,
    endpoint: String,
}

impl MediaConvertBackend {
    /// Resolve credentials and the account-specific endpoint.
    pub async fn new(sdk_config: &aws_config::SdkConfig) -> Result<Self> {
        let region = sdk_config
            .region()
            .context("no region configured")?
            .to_string();
        let provider = sdk_config
            .credentials_provider()
            .context("no credentials provider configured")?;
        let credentials = provider
            .provide_credentials()
            .await
            .context("failed to resolve AWS credentials")?;
        let http = reqwest::Client::new();

        let url = format!(
            "https://mediaconvert.{}.amazonaws.com/{}/endpoints",
            region, API_VERSION
        );
        let response = signed_post_json(
            &http,
            &credentials,
            &region,
            SERVICE,
            &url,
            &serde_json::json!({}),
        )
        .await
        .context("endpoint discovery failed")?;
        let endpoint = response["endpoints"][0]["url"]
            .as_str()
            .context("no endpoint returned by the transcode service")?
            .trim_end_matches('/')
            .to_string();
        tracing::debug!(endpoint = %endpoint, "Resolved MediaConvert endpoint");

        Ok(Self {
            http,
            credentials,
            region,
            endpoint,
        })
    }
}

#[async_trait]
impl TranscodeBackend for MediaConvertBackend {
    async fn create_job(&self, request: TranscodeJobRequest) -> Result<String> {
        let body = serde_json::json!({
            "role": request.role_arn,
            "userMetadata": { "assetID": request.asset_id },
            "settings": to_api_case(request.settings),
        });
        let url = format!("{}/{}/jobs", self.endpoint, API_VERSION);
        let response = signed_post_json(
            &self.http,
            &self.credentials,
            &self.region,
            SERVICE,
            &url,
            &body,
        )
        .await
        .context("job submission failed")?;
        let job_id = response["job"]["id"]
            .as_str()
            .context("job submission response missing job id")?
            .to_string();
        Ok(job_id)
    }
}

/// Convert template-dialect PascalCase member names (`FileInput`,
/// `OutputGroups`) to the wire format's camelCase. Keys that do not look
/// like member names (spaces, digits first, already lowercase) are
/// user-chosen map keys such as audio selector names and are left alone.
fn to_api_case(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (member_to_camel(&key), to_api_case(inner)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(to_api_case).collect()),
        other => other,
    }
}

fn member_to_camel(key: &str) -> String {
    let is_member_name = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase())
        && key.chars().all(|c| c.is_ascii_alphanumeric());
    if !is_member_name {
        return key.to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
