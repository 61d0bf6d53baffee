use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions for a single composition job.
///
/// These never abort a batch: the runner records the failure for the
/// current video and proceeds to the next. Recoverable conditions
/// (missing frame mid-stream, early end of stream) are not errors and
/// never appear here.
#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("invalid metadata: frame rate must be positive, got {fps}")]
    InvalidMetadata { fps: f64 },

    #[error("invalid output dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("source not accessible at {path}: {reason}")]
    FileNotAccessible { path: PathBuf, reason: String },

    #[error("failed to write output to {path}: {reason}")]
    IoFailure { path: PathBuf, reason: String },
}
