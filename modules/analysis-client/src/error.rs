use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited (status {status}): {message}")]
    RateLimited { status: u16, message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl AnalysisError {
    /// True when the failure is a throttling signal worth backing off on:
    /// HTTP 429, or a textual rate-limit marker in the error body.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            AnalysisError::RateLimited { .. } => true,
            AnalysisError::Api { message, .. } | AnalysisError::Network(message) => {
                message.to_lowercase().contains("rate limit")
            }
            AnalysisError::Parse(_) => false,
        }
    }

    /// Classify a non-2xx response into the throttled or plain API variant.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        if status == 429 || message.to_lowercase().contains("rate limit") {
            AnalysisError::RateLimited { status, message }
        } else {
            AnalysisError::Api { status, message }
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Parse(err.to_string())
    }
}
