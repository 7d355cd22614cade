//! AWS-backed platform clients.
//!
//! CloudFront uses the typed SDK client. MediaConvert jobs carry an
//! arbitrary settings document loaded from the job template, which the
//! typed SDK cannot represent, so that client signs the service's REST API
//! directly with SigV4.

mod cloudfront;
mod mediaconvert;
mod sign;

pub use cloudfront::CloudFrontBackend;
pub use mediaconvert::MediaConvertBackend;
