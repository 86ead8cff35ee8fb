use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {message}")]
    ParseError { message: String, body: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Operation `{operation}` is not registered on section `{path}`")]
    UnsupportedOperation { path: String, operation: String },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Call was dropped before it completed")]
    Cancelled,
}

impl PaymentError {
    /// Build a parse error from a failed JSON decode, keeping the raw body
    pub fn parse(err: &serde_json::Error, body: impl Into<String>) -> Self {
        Self::ParseError {
            message: err.to_string(),
            body: body.into(),
        }
    }

    /// Whether the failure happened before or during the network round trip
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpError(_) | Self::TransportError(_))
    }
}
