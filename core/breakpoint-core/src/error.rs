use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreakpointError {
    #[error("Threshold set must contain at least one breakpoint")]
    EmptyThresholds,

    #[error("Duplicate breakpoint name: {0}")]
    DuplicateName(String),

    #[error("Invalid breakpoint name: {0:?}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BreakpointError>;
