//! Error handling for the alpha peak pipeline
//!
//! Every pipeline stage validates its own preconditions and returns one of
//! these errors unchanged to the caller. Nothing is retried.

use thiserror::Error;

/// Result type alias for alpha peak operations
pub type Result<T> = std::result::Result<T, AlphaError>;

/// Main error type for alpha peak operations
#[derive(Error, Debug)]
pub enum AlphaError {
    // Pipeline errors
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("No spectral bins inside the band ({min_freq} Hz, {max_freq} Hz)")]
    EmptyBand { min_freq: f64, max_freq: f64 },

    #[error("Insufficient data: {len} points for a moving-average window of {window}")]
    InsufficientData { len: usize, window: usize },

    #[error("Spline fit failed: {reason}")]
    FitFailure { reason: String },

    #[error("Cannot locate a peak on an empty curve")]
    EmptyCurve,

    // Loading errors
    #[error("Column 'channel-{channel}' not found in recording")]
    ChannelNotFound { channel: usize },

    #[error("Malformed sample on line {line}: '{value}'")]
    Parse { line: usize, value: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AlphaError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        AlphaError::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn fit_failure(reason: impl Into<String>) -> Self {
        AlphaError::FitFailure {
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            AlphaError::InvalidInput { .. } => "INVALID_INPUT",
            AlphaError::EmptyBand { .. } => "EMPTY_BAND",
            AlphaError::InsufficientData { .. } => "INSUFFICIENT_DATA",
            AlphaError::FitFailure { .. } => "FIT_FAILURE",
            AlphaError::EmptyCurve => "EMPTY_CURVE",
            AlphaError::ChannelNotFound { .. } => "CHANNEL_NOT_FOUND",
            AlphaError::Parse { .. } => "PARSE_ERROR",
            AlphaError::Config(_) => "CONFIG_ERROR",
            AlphaError::Io(_) => "IO_ERROR",
        }
    }

    /// True for errors raised by the numeric pipeline rather than by loading
    pub fn is_pipeline_error(&self) -> bool {
        matches!(
            self,
            AlphaError::InvalidInput { .. }
                | AlphaError::EmptyBand { .. }
                | AlphaError::InsufficientData { .. }
                | AlphaError::FitFailure { .. }
                | AlphaError::EmptyCurve
        )
    }
}
