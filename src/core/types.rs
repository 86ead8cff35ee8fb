use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Body field that selects server-side behaviour
pub const TYPE_FIELD: &str = "type";
/// Body field carrying the API key
pub const KEY_FIELD: &str = "key";
/// Body field carrying the request signature
pub const SIGN_FIELD: &str = "sign";

/// Ordered form fields. Re-inserting an existing key replaces its value
/// in place, so the first insertion decides the position on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBody {
    fields: Vec<(String, String)>,
}

impl FormBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field; non-string values are rendered with `ToString`
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Builder-style `insert`
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply every field of `other` on top of this body
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Build a body from a JSON object, keeping the object's key order.
    /// Strings are taken verbatim, every other value uses its JSON text
    /// (`null`, `42`, `true`, `{...}`).
    /// Returns `None` when `value` is not an object.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut body = Self::new();
        for (key, value) in object {
            match value {
                Value::String(s) => body.insert(key.as_str(), s),
                other => body.insert(key.as_str(), other),
            }
        }
        Some(body)
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for FormBody {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut body = Self::new();
        for (key, value) in iter {
            body.insert(key, value);
        }
        body
    }
}

/// Server-side discriminator stamped into the `type` body field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationType {
    Order,
    Status,
    Services,
    PayPasca,
    InqPasca,
    GetNickname,
}

impl OperationType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Status => "status",
            Self::Services => "services",
            Self::PayPasca => "pay-pasca",
            Self::InqPasca => "inq-pasca",
            Self::GetNickname => "get-nickname",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call request value. The section overwrites `path` and stamps the
/// operation type into `body` before dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub path: Option<String>,
    pub body: FormBody,
    pub continuation: String,
}

impl RequestOptions {
    /// `continuation` names the host command that receives the response
    pub fn new(continuation: impl Into<String>) -> Self {
        Self {
            path: None,
            body: FormBody::new(),
            continuation: continuation.into(),
        }
    }

    pub fn with_body(mut self, body: FormBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.body.insert(key, value);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Lifecycle of a single dispatched call. `Delivered` and `Failed` are
/// terminal; there is no retry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallState {
    Created,
    Signed,
    Sent,
    Delivered,
    Failed,
}

impl CallState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Failed)
    }
}

impl fmt::Display for CallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Signed => "signed",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
