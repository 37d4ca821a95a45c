// crates/aquasol-core/src/error.rs

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0}")]
    Usage(String),

    #[error("input file not found: {0}")]
    InputNotFound(String),

    #[error("error reading input CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    NoValidInput(String),

    #[error("model artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("failed to load model artifact {path}: {message}")]
    ArtifactLoad { path: String, message: String },

    #[error("error during prediction: {0}")]
    Prediction(String),

    #[error("dataframe operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Stable error-kind string reported in the terminal envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Usage(_) => "UsageError",
            PipelineError::InputNotFound(_) => "FileNotFoundError",
            PipelineError::Csv(_) => "ValidationError",
            PipelineError::Validation(_) => "ValidationError",
            PipelineError::NoValidInput(_) => "NoValidInputError",
            PipelineError::ArtifactNotFound(_) => "ArtifactNotFoundError",
            PipelineError::ArtifactLoad { .. } => "ArtifactLoadError",
            PipelineError::Prediction(_) => "PredictionError",
            PipelineError::Polars(_) => "InternalError",
            PipelineError::Io(_) => "IoError",
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Terminal failure representation: the one JSON object a failed run emits.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ErrorEnvelope {
    pub fn from_error(err: &PipelineError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind().to_string(),
        }
    }
}
