use shared::error::ErrorCode;
use thiserror::Error;

/// Failures surfaced by catalog loading. `Clone` so a failed store can keep handing it out.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("{endpoint} returned HTTP {status} ({code:?}): {message}")]
    Status {
        endpoint: String,
        code: ErrorCode,
        status: u16,
        message: String,
    },
    #[error("failed to decode {endpoint} response: {message}")]
    Decode { endpoint: String, message: String },
    #[error("invalid catalog API base url '{0}'")]
    InvalidBaseUrl(String),
    #[error("catalog has not been loaded")]
    NotLoaded,
}

impl CatalogError {
    pub fn transport(endpoint: &str, err: reqwest::Error) -> Self {
        Self::Transport {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    pub fn decode(endpoint: &str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
