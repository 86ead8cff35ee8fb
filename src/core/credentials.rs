use crate::core::config::ClientConfig;
use crate::core::traits::{CredentialStore, ValueKind};
use secrecy::{ExposeSecret, Secret};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// In-memory `CredentialStore`, the default when the host provides none
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, name: &str) -> Option<String> {
        // A poisoned lock still holds the last complete write
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(name).cloned()
    }

    fn set(&self, name: &str, value: String, _kind: ValueKind) {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(name.to_string(), value);
    }
}

/// Snapshot of both secrets, taken once per request
#[derive(Debug, Clone, Default)]
pub struct CredentialPair {
    pub api_id: Option<Secret<String>>,
    pub api_key: Option<Secret<String>>,
}

impl CredentialPair {
    pub fn api_id(&self) -> Option<&str> {
        self.api_id.as_ref().map(|s| s.expose_secret().as_str())
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|s| s.expose_secret().as_str())
    }
}

/// Reads and writes the two API secrets through the host store under
/// `{prefix}_ApiId` and `{prefix}_ApiKey`. Nothing is cached here.
#[derive(Debug, Clone)]
pub struct Credentials {
    store: Arc<dyn CredentialStore>,
    id_name: String,
    key_name: String,
}

impl Credentials {
    pub fn new(store: Arc<dyn CredentialStore>, prefix: &str) -> Self {
        Self {
            store,
            id_name: format!("{}_ApiId", prefix),
            key_name: format!("{}_ApiKey", prefix),
        }
    }

    /// Copy any credentials present in `config` into the store
    pub fn seed_from(&self, config: &ClientConfig) {
        if let Some(api_id) = config.api_id() {
            self.set_api_id(api_id);
        }
        if let Some(api_key) = config.api_key() {
            self.set_api_key(api_key);
        }
    }

    pub fn api_id(&self) -> Option<String> {
        self.store.get(&self.id_name)
    }

    pub fn api_key(&self) -> Option<String> {
        self.store.get(&self.key_name)
    }

    pub fn set_api_id(&self, api_id: &str) {
        debug!(name = %self.id_name, "storing API id");
        self.store
            .set(&self.id_name, api_id.to_string(), ValueKind::String);
    }

    pub fn set_api_key(&self, api_key: &str) {
        debug!(name = %self.key_name, "storing API key");
        self.store
            .set(&self.key_name, api_key.to_string(), ValueKind::Inferred);
    }

    pub fn snapshot(&self) -> CredentialPair {
        CredentialPair {
            api_id: self.api_id().map(Secret::new),
            api_key: self.api_key().map(Secret::new),
        }
    }
}
