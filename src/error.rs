use thiserror::Error;

/// Notice shown for any fetch-class failure. Transport errors, non-success
/// statuses, and malformed payloads are deliberately not distinguished
/// downstream — the user sees one retryable message.
pub const FETCH_NOTICE: &str = "API limit reached or network error.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// True for errors the user can retry (network, status, payload).
    /// Config and IO errors are programming/environment faults and should
    /// surface loudly instead of being folded into the fetch notice.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, AppError::Http(_) | AppError::Status(_) | AppError::Json(_))
    }
}
