use crate::core::errors::PaymentError;
use serde_json::Value;
use std::fmt::Debug;

/// How a value should be persisted by the host store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Stored verbatim as text
    String,
    /// Left to the store to decide
    Inferred,
}

/// Process-wide key/value store owned by the host environment.
///
/// Every `set` must replace the previous value atomically: a concurrent
/// `get` observes either the old value or the new one, never a mix.
pub trait CredentialStore: Debug + Send + Sync + 'static {
    fn get(&self, name: &str) -> Option<String>;

    fn set(&self, name: &str, value: String, kind: ValueKind);
}

/// Host command-execution surface that receives call outcomes.
///
/// Implementations must not block: they are invoked from the task that
/// completed the request.
pub trait CommandHost: Debug + Send + Sync + 'static {
    /// Run `command` with the decoded response body
    fn run_command(&self, command: &str, payload: &Value);

    /// Raise a failure through the host's error channel
    fn raise(&self, command: &str, error: &PaymentError);
}
