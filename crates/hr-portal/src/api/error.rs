use serde::{Deserialize, Serialize};

/// Failures talking to the HR backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("could not reach the HR service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("your session has expired, please log in again")]
    Unauthorized,
    #[error("{}", .message.as_deref().unwrap_or("you do not have permission to perform this action"))]
    Forbidden { message: Option<String> },
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },
    #[error("unexpected response from {endpoint}: {detail}")]
    Decode { endpoint: String, detail: String },
}

/// Coarse class of a failure, used to pick how a notification is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Transport,
    Validation,
    Business,
    Authorization,
    Decode,
}

impl ApiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Transport(_) => ErrorCategory::Transport,
            ApiError::Unauthorized | ApiError::Forbidden { .. } => ErrorCategory::Authorization,
            ApiError::Rejected { .. } => ErrorCategory::Business,
            ApiError::Decode { .. } => ErrorCategory::Decode,
        }
    }

    pub(crate) fn decode(endpoint: &str, detail: impl ToString) -> Self {
        ApiError::Decode {
            endpoint: endpoint.to_string(),
            detail: detail.to_string(),
        }
    }
}
