//! CloudFront CDN backend.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};

use crate::traits::CdnBackend;

pub struct CloudFrontBackend {
    client: aws_sdk_cloudfront::Client,
}

impl CloudFrontBackend {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_cloudfront::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl CdnBackend for CloudFrontBackend {
    async fn invalidate(
        &self,
        distribution_id: &str,
        paths: &[String],
        caller_reference: &str,
    ) -> Result<String> {
        let paths = Paths::builder()
            .quantity(paths.len() as i32)
            .set_items(Some(paths.to_vec()))
            .build()
            .context("invalid invalidation paths")?;
        let batch = InvalidationBatch::builder()
            .paths(paths)
            .caller_reference(caller_reference)
            .build()
            .context("invalid invalidation batch")?;

        let output = self
            .client
            .create_invalidation()
            .distribution_id(distribution_id)
            .invalidation_batch(batch)
            .send()
            .await
            .context("create_invalidation failed")?;

        let invalidation_id = output
            .invalidation()
            .map(|i| i.id().to_string())
            .context("create_invalidation response missing invalidation")?;
        Ok(invalidation_id)
    }
}
