use crate::core::errors::PaymentError;
use crate::core::kernel::codec::FORM_CONTENT_TYPE;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{instrument, trace};

/// Headers sent with every request, in order
pub const FIXED_HEADERS: [(&str, &str); 3] = [
    ("cache-control", "no-cache"),
    ("content-type", FORM_CONTENT_TYPE),
    ("accept", "application/json;charset=utf-8"),
];

/// Raw response handed back by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// HTTP transport owned by the host.
///
/// One call is one POST; implementations must not retry. Timeouts are the
/// transport's business.
#[async_trait]
pub trait HttpTransport: Debug + Send + Sync + 'static {
    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<TransportResponse, PaymentError>;
}

/// Configuration for the reqwest-backed transport
#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl TransportConfig {
    pub fn new(timeout_seconds: u64, user_agent: String) -> Self {
        Self {
            timeout_seconds,
            user_agent,
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn build(self) -> Result<ReqwestTransport, PaymentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout_seconds))
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| {
                PaymentError::TransportError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestTransport {
            client,
            config: self,
        })
    }
}

/// Implementation of `HttpTransport` using reqwest
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: TransportConfig,
}

impl Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, headers, body), fields(url = %url, body_len = body.len()))]
    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: String,
    ) -> Result<TransportResponse, PaymentError> {
        let mut request = self.client.post(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.body(body).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            PaymentError::TransportError(format!("Failed to read response body: {}", e))
        })?;

        trace!(status, "Response body: {}", body);
        Ok(TransportResponse { status, body })
    }
}
