use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropYieldError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Client-side input problem, raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// Service unreachable, timed out, or answered with a non-2xx status.
    #[error("{0}")]
    Transport(String),

    /// Service answered 2xx but without a numeric yield.
    #[error("{0}")]
    MalformedResponse(String),
}

/// How a failed submission is classified for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Transport,
    MalformedResponse,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Validation => "Invalid input",
            FailureKind::Transport => "Prediction failed",
            FailureKind::MalformedResponse => "Unexpected response",
        }
    }
}

impl CropYieldError {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            CropYieldError::Validation(_) => FailureKind::Validation,
            CropYieldError::MalformedResponse(_) => FailureKind::MalformedResponse,
            _ => FailureKind::Transport,
        }
    }
}

pub type Result<T> = std::result::Result<T, CropYieldError>;
