//! Configuration module
//!
//! All platform identifiers used by the ingest pipeline (region,
//! destination bucket, transcode role, CDN distribution) are read once into
//! an explicit `IngestConfig` and passed into the pipeline, rather than
//! looked up from the environment at the point of use.

use std::env;

/// Ingest pipeline configuration.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    /// Region the transcode service is called in.
    pub region: String,
    /// Bucket that receives transcode outputs (`s3://{bucket}/assets/...`).
    pub destination_bucket: String,
    /// Role ARN the transcode service assumes to read/write the buckets.
    pub media_convert_role_arn: String,
    /// CDN distribution whose cache is invalidated per ingested asset.
    pub cdn_distribution_id: String,
    /// Path to the transcode job settings template document.
    pub job_template_path: String,
    /// Source extensions accepted for ingest (lowercase, no dot).
    pub allowed_extensions: Vec<String>,
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let region = env::var("AWS_DEFAULT_REGION")
            .or_else(|_| env::var("AWS_REGION"))
            .map_err(|_| anyhow::anyhow!("AWS_DEFAULT_REGION or AWS_REGION must be set"))?;

        let allowed_extensions = env::var("ALLOWED_SOURCE_EXTENSIONS")
            .unwrap_or_else(|_| "mp4".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = IngestConfig {
            region,
            destination_bucket: env::var("DESTINATION_BUCKET")
                .map_err(|_| anyhow::anyhow!("DESTINATION_BUCKET must be set"))?,
            media_convert_role_arn: env::var("MEDIACONVERT_ROLE_ARN")
                .map_err(|_| anyhow::anyhow!("MEDIACONVERT_ROLE_ARN must be set"))?,
            cdn_distribution_id: env::var("CDN_DISTRIBUTION_ID")
                .map_err(|_| anyhow::anyhow!("CDN_DISTRIBUTION_ID must be set"))?,
            job_template_path: env::var("JOB_TEMPLATE_PATH")
                .unwrap_or_else(|_| "job.json".to_string()),
            allowed_extensions,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.region.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "AWS_DEFAULT_REGION or AWS_REGION must not be empty"
            ));
        }

        if self.destination_bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("DESTINATION_BUCKET must not be empty"));
        }

        if self.cdn_distribution_id.trim().is_empty() {
            return Err(anyhow::anyhow!("CDN_DISTRIBUTION_ID must not be empty"));
        }

        if !self.media_convert_role_arn.starts_with("arn:") {
            return Err(anyhow::anyhow!(
                "MEDIACONVERT_ROLE_ARN must be a valid role ARN"
            ));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_SOURCE_EXTENSIONS must list at least one extension"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> IngestConfig {
        IngestConfig {
            region: "eu-west-1".to_string(),
            destination_bucket: "jetvideo-dest".to_string(),
            media_convert_role_arn: "arn:aws:iam::123456789012:role/MediaConvertRole"
                .to_string(),
            cdn_distribution_id: "E1166YMX8A3BF5".to_string(),
            job_template_path: "job.json".to_string(),
            allowed_extensions: vec!["mp4".to_string()],
        }
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_role_arn() {
        let mut config = valid_config();
        config.media_convert_role_arn = "MediaConvertRole".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_extension_list() {
        let mut config = valid_config();
        config.allowed_extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_destination_bucket() {
        let mut config = valid_config();
        config.destination_bucket = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_region() {
        let mut config = valid_config();
        config.region = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_distribution_id() {
        let mut config = valid_config();
        config.cdn_distribution_id = " ".to_string();
        assert!(config.validate().is_err());
    }
}
