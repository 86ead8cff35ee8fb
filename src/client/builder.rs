use crate::client::VipaymentClient;
use crate::core::config::{ClientConfig, ConfigError};
use crate::core::credentials::{Credentials, MemoryStore};
use crate::core::errors::PaymentError;
use crate::core::kernel::{Dispatcher, HttpTransport, Md5Signer, Signer, TransportConfig};
use crate::core::router::{CallbackRouter, NoopHost};
use crate::core::traits::{CommandHost, CredentialStore};
use secrecy::Secret;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::debug;

/// Builder for [`VipaymentClient`]
///
/// Every host collaborator is optional: credentials default to an in-memory
/// store, the transport to reqwest, the host to [`NoopHost`] and the runtime
/// to the one the builder is called from.
#[derive(Default)]
pub struct VipaymentBuilder {
    config: ClientConfig,
    store: Option<Arc<dyn CredentialStore>>,
    host: Option<Arc<dyn CommandHost>>,
    transport: Option<Arc<dyn HttpTransport>>,
    signer: Option<Arc<dyn Signer>>,
    runtime: Option<Handle>,
}

impl VipaymentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Credentials written to the store when the client is built
    pub fn with_credentials(mut self, api_id: String, api_key: String) -> Self {
        self.config.api_id = Some(Secret::new(api_id));
        self.config.api_key = Some(Secret::new(api_key));
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_command_prefix(mut self, prefix: String) -> Self {
        self.config.command_prefix = prefix;
        self
    }

    pub fn with_max_in_flight(mut self, limit: usize) -> Self {
        self.config.max_in_flight = Some(limit);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_host(mut self, host: Arc<dyn CommandHost>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> Result<VipaymentClient, PaymentError> {
        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|e| ConfigError::MissingRuntime(e.to_string()))?,
        };

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                TransportConfig::new(self.config.timeout_seconds, self.config.user_agent.clone())
                    .build()?,
            ),
        };

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn CredentialStore>);
        let credentials = Credentials::new(store, &self.config.command_prefix);
        credentials.seed_from(&self.config);

        let host = self
            .host
            .unwrap_or_else(|| Arc::new(NoopHost) as Arc<dyn CommandHost>);
        let router = CallbackRouter::new(host, self.config.command_prefix.clone());
        let signer = self
            .signer
            .unwrap_or_else(|| Arc::new(Md5Signer) as Arc<dyn Signer>);

        let base_url = self.config.resolved_base_url();
        debug!(base_url = %base_url, prefix = %self.config.command_prefix, "building client");

        let dispatcher = Dispatcher::new(
            base_url,
            credentials,
            signer,
            transport,
            router,
            runtime,
            self.config.max_in_flight,
        );
        Ok(VipaymentClient::new(Arc::new(dispatcher)))
    }
}
