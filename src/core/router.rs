use crate::core::errors::PaymentError;
use crate::core::traits::CommandHost;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Routes a completed call back into the host's command surface.
///
/// Success goes to `{prefix}onResponse <continuation>`, every failure to
/// `{prefix}onError`.
#[derive(Debug, Clone)]
pub struct CallbackRouter {
    host: Arc<dyn CommandHost>,
    prefix: String,
}

impl CallbackRouter {
    pub fn new(host: Arc<dyn CommandHost>, prefix: impl Into<String>) -> Self {
        Self {
            host,
            prefix: prefix.into(),
        }
    }

    pub fn response_command(&self, continuation: &str) -> String {
        format!("{}onResponse {}", self.prefix, continuation)
    }

    pub fn error_command(&self) -> String {
        format!("{}onError", self.prefix)
    }

    /// Parse `raw_body` and hand it to the continuation.
    ///
    /// A body that is not JSON is returned as `PaymentError::ParseError`
    /// without touching the host; the caller routes it to `on_error`.
    pub fn on_success(&self, continuation: &str, raw_body: &str) -> Result<Value, PaymentError> {
        let payload: Value =
            serde_json::from_str(raw_body).map_err(|e| PaymentError::parse(&e, raw_body))?;

        let command = self.response_command(continuation);
        debug!(command = %command, "delivering response");
        self.host.run_command(&command, &payload);
        Ok(payload)
    }

    /// Raise `error` through the host's error channel. Terminal.
    pub fn on_error(&self, error: &PaymentError) {
        let command = self.error_command();
        warn!(command = %command, error = %error, "request failed");
        self.host.raise(&command, error);
    }
}

/// Host that only logs; outcomes still reach the `PendingCall`
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl CommandHost for NoopHost {
    fn run_command(&self, command: &str, _payload: &Value) {
        debug!(command = %command, "no host attached, dropping response");
    }

    fn raise(&self, command: &str, error: &PaymentError) {
        debug!(command = %command, error = %error, "no host attached, dropping error");
    }
}

/// Outcome forwarded by `ChannelHost`
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Command { command: String, payload: Value },
    Raised { command: String, message: String },
}

/// Host that forwards every outcome over an unbounded channel, so a bot
/// loop or a test can consume them in completion order.
#[derive(Debug, Clone)]
pub struct ChannelHost {
    sender: mpsc::UnboundedSender<HostEvent>,
}

impl ChannelHost {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<HostEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl CommandHost for ChannelHost {
    fn run_command(&self, command: &str, payload: &Value) {
        let event = HostEvent::Command {
            command: command.to_string(),
            payload: payload.clone(),
        };
        if self.sender.send(event).is_err() {
            warn!(command = %command, "host receiver closed, response dropped");
        }
    }

    fn raise(&self, command: &str, error: &PaymentError) {
        let event = HostEvent::Raised {
            command: command.to_string(),
            message: error.to_string(),
        };
        if self.sender.send(event).is_err() {
            warn!(command = %command, "host receiver closed, error dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn router() -> (CallbackRouter, mpsc::UnboundedReceiver<HostEvent>) {
        let (host, events) = ChannelHost::new();
        (CallbackRouter::new(Arc::new(host), "VIPaymentLibs"), events)
    }

    #[test]
    fn test_command_names() {
        let (router, _events) = router();
        assert_eq!(router.response_command("svc"), "VIPaymentLibsonResponse svc");
        assert_eq!(router.error_command(), "VIPaymentLibsonError");
    }

    #[test]
    fn test_on_success_runs_continuation() {
        let (router, mut events) = router();
        let payload = router
            .on_success("svc", r#"{"result":true,"data":[]}"#)
            .unwrap();

        assert_eq!(payload, json!({"result": true, "data": []}));
        assert_eq!(
            events.try_recv().unwrap(),
            HostEvent::Command {
                command: "VIPaymentLibsonResponse svc".to_string(),
                payload: json!({"result": true, "data": []}),
            }
        );
    }

    #[test]
    fn test_on_success_malformed_body_is_parse_error() {
        let (router, mut events) = router();
        let err = router.on_success("svc", "<html>502</html>").unwrap_err();

        match err {
            PaymentError::ParseError { body, .. } => assert_eq!(body, "<html>502</html>"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_on_error_raises() {
        let (router, mut events) = router();
        router.on_error(&PaymentError::TransportError("connection reset".to_string()));

        match events.try_recv().unwrap() {
            HostEvent::Raised { command, message } => {
                assert_eq!(command, "VIPaymentLibsonError");
                assert!(message.contains("connection reset"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
