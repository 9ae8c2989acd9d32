use inv_model::ValidationErrorBody;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success status without a structured validation body
    #[error("HTTP error! status: {status}")]
    Status {
        status: u16,
        path: String,
        body: Option<String>,
    },
    /// `400 Bad Request` carrying field errors and/or a message
    #[error("validation failed: {}", .0.summary())]
    Validation(ValidationErrorBody),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl ClientError {
    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Validation(body) => Some(body.status.unwrap_or(400)),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::InvalidHeader(_) => None,
        }
    }
}
