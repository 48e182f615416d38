//! Advisor errors

use crm_core::error::CrmError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("advisor is not configured (missing API key)")]
    Disabled,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("response carried no content")]
    EmptyResponse,

    #[error("invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl AdvisorError {
    pub fn is_retryable(&self) -> bool {
        match self {
            AdvisorError::Timeout(_) => true,
            AdvisorError::Http(err) => err.is_timeout() || err.is_connect(),
            AdvisorError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<AdvisorError> for CrmError {
    fn from(err: AdvisorError) -> Self {
        CrmError::ExternalService {
            service: "advisor".to_string(),
            message: err.to_string(),
        }
    }
}
