//! Unified client entry point
//!
//! `SwapClient` owns the single session context, event bus, and request
//! gateway shared by every service surface. The session is an explicitly
//! owned object injected into the services, never ambient global state.

use std::path::PathBuf;
use std::sync::Arc;

#[cfg(feature = "in-process")]
use axum::Router;
use tokio::sync::broadcast;

use crate::api::{AdminService, AuthService, CatalogService, OrderService};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::event::{ClientEvent, EventBus};
#[cfg(feature = "in-process")]
use crate::http::OneshotTransport;
use crate::http::{ApiClient, HttpTransport, NetworkTransport};
use crate::session::SessionStore;

/// Marketplace client
///
/// # Example
///
/// ```no_run
/// use swap_client::SwapClient;
///
/// # async fn example() -> Result<(), swap_client::ClientError> {
/// let client = SwapClient::builder()
///     .base_url("http://localhost:8080")
///     .data_dir("./data")
///     .build()?;
///
/// client.auth().login("wei", "secret").await?;
/// let orders = client.orders().list(&Default::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SwapClient {
    api: ApiClient,
}

impl SwapClient {
    /// Create a builder
    pub fn builder() -> SwapClientBuilder {
        SwapClientBuilder::new()
    }

    /// Connect over the network with default configuration
    pub fn network(base_url: &str) -> ClientResult<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Authentication and account operations
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.api.clone())
    }

    /// Order lifecycle operations
    pub fn orders(&self) -> OrderService {
        OrderService::new(self.api.clone())
    }

    /// Product catalog operations
    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.api.clone())
    }

    /// Admin review console operations
    pub fn admin(&self) -> AdminService {
        AdminService::new(self.api.clone())
    }

    /// The session store backing this client
    pub fn session(&self) -> &SessionStore {
        self.api.session()
    }

    /// Subscribe to UI-facing events (notices, session-expired redirects)
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.api.events().subscribe()
    }
}

/// Builder for [`SwapClient`]
pub struct SwapClientBuilder {
    config: ClientConfig,
    #[cfg(feature = "in-process")]
    router: Option<Router>,
}

impl SwapClientBuilder {
    fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            #[cfg(feature = "in-process")]
            router: None,
        }
    }

    /// Server base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Request timeout in seconds
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.timeout = seconds;
        self
    }

    /// Directory for the persisted session entries.
    ///
    /// Without one the session lives in memory only.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = Some(dir.into());
        self
    }

    /// Use an in-process axum Router instead of the network.
    #[cfg(feature = "in-process")]
    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// Build the client, rehydrating any persisted session.
    pub fn build(self) -> ClientResult<SwapClient> {
        let session = match &self.config.data_dir {
            Some(dir) => SessionStore::load(dir)?,
            None => SessionStore::ephemeral(),
        };
        let events = EventBus::new();

        #[cfg(feature = "in-process")]
        if let Some(router) = self.router {
            let transport: Arc<dyn HttpTransport> = Arc::new(OneshotTransport::new(router));
            return Ok(SwapClient {
                api: ApiClient::new(transport, session, events),
            });
        }

        let transport: Arc<dyn HttpTransport> = Arc::new(NetworkTransport::new(&self.config)?);
        Ok(SwapClient {
            api: ApiClient::new(transport, session, events),
        })
    }
}
