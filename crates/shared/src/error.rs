use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    NotFound,
    RateLimited,
    Upstream,
    Other,
}

impl ErrorCode {
    pub fn from_http_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::Upstream,
            _ => Self::Other,
        }
    }
}

/// Error body returned by the catalog API alongside non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{status_code}: {status_message}")]
pub struct TmdbStatus {
    pub status_code: i64,
    pub status_message: String,
    #[serde(default)]
    pub success: bool,
}

impl TmdbStatus {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}
