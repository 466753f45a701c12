use crate::error::Result;

pub const API_URL: &str = "https://api.coingecko.com/api/v3";

/// How often to re-fetch the current page from the provider (seconds).
pub const REFRESH_INTERVAL_SECS: u64 = 120;

/// Records per page, provider-side ordering by descending market cap.
pub const PER_PAGE: usize = 100;

/// HTTP client timeout (seconds). The upstream behavior was an unbounded
/// fetch; a bounded timeout is the recommended hardening.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// At most this many records can be selected for comparison.
pub const MAX_SELECTED: usize = 4;

/// Comparison mode requires at least this many selected records.
pub const MIN_COMPARE: usize = 2;

/// Channel capacity for refresh events routed to the UI loop.
pub const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub log_level: String,
    /// The TUI owns the terminal, so tracing output goes to this file.
    pub log_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_url: std::env::var("API_URL").unwrap_or_else(|_| API_URL.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_path: std::env::var("LOG_PATH").unwrap_or_else(|_| "coinlens.log".to_string()),
        })
    }
}
