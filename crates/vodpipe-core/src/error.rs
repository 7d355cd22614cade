//! Error types module
//!
//! All errors are unified under the `AppError` enum, which covers key
//! derivation, event parsing, job-template handling, and the platform
//! client calls. Errors propagate to the caller; there is no local
//! recovery or retry anywhere in the pipeline.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed input
    Debug,
    /// Warning level - for rejected but well-formed requests
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error is presented in the
/// receipt the CLI prints after a failed run.
pub trait ErrorMetadata {
    /// Status code for the response document
    fn status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_KEY")
    fn error_code(&self) -> &'static str;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Invalid upload event: {0}")]
    InvalidEvent(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Job template error: {0}")]
    JobTemplate(String),

    #[error("Transcode service error: {0}")]
    Transcode(String),

    #[error("CDN error: {0}")]
    Cdn(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidEvent(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata for each variant: (status_code, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::InvalidKey(_) => (400, "INVALID_KEY", LogLevel::Debug),
        AppError::InvalidEvent(_) => (400, "INVALID_EVENT", LogLevel::Debug),
        AppError::UnsupportedMediaType(_) => (415, "UNSUPPORTED_MEDIA_TYPE", LogLevel::Warn),
        AppError::JobTemplate(_) => (500, "JOB_TEMPLATE_ERROR", LogLevel::Error),
        AppError::Transcode(_) => (502, "TRANSCODE_ERROR", LogLevel::Error),
        AppError::Cdn(_) => (502, "CDN_ERROR", LogLevel::Error),
        AppError::Config(_) => (500, "CONFIG_ERROR", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl AppError {
    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidKey(ref msg) => msg.clone(),
            AppError::InvalidEvent(ref msg) => msg.clone(),
            AppError::UnsupportedMediaType(ref msg) => msg.clone(),
            AppError::JobTemplate(_) => "Job settings template could not be applied".to_string(),
            AppError::Transcode(_) => "Failed to submit transcode job".to_string(),
            AppError::Cdn(_) => "Failed to invalidate CDN cache".to_string(),
            AppError::Config(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal error".to_string(),
            AppError::InternalWithSource { .. } => "Internal error".to_string(),
        }
    }
}
