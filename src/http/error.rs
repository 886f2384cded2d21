use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Session token expired")]
    TokenExpired,

    #[error("Not logged in")]
    Unauthenticated,

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::TokenExpired | ApiError::Unauthenticated)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
