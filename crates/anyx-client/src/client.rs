//! Client entry point

use std::fmt;
use std::sync::Arc;

use crate::config::AnyxConfig;
use crate::error::ClientResult;
use crate::query::builder::QueryBuilder;
use crate::session::{MemoryStorage, SessionService};
use crate::transport::{HttpTransport, QueryTransport};

/// Shared pieces every query builder needs to dispatch
pub(crate) struct ClientContext {
    pub(crate) config: AnyxConfig,
    pub(crate) transport: Arc<dyn QueryTransport>,
    pub(crate) session: Arc<SessionService>,
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Handle to the query proxy of one deployment.
///
/// The client is cheap to clone; clones share the same configuration,
/// transport and session service. Queries are started with [`from`] and each
/// call hands back a fresh [`QueryBuilder`], so concurrent callers never
/// share builder state.
///
/// [`from`]: AnyxClient::from
#[derive(Debug, Clone)]
pub struct AnyxClient {
    ctx: Arc<ClientContext>,
}

impl AnyxClient {
    /// Create a client with the default HTTP transport and in-memory session
    /// storage
    pub fn new(config: AnyxConfig) -> ClientResult<Self> {
        let transport = Arc::new(HttpTransport::new()?);
        let session = Arc::new(SessionService::new(Arc::new(MemoryStorage::new())));
        Ok(Self::with_parts(config, transport, session))
    }

    /// Create a client from explicit collaborators.
    ///
    /// Hosts use this to plug in their own session storage; tests use it to
    /// substitute a scripted transport.
    pub fn with_parts(
        config: AnyxConfig,
        transport: Arc<dyn QueryTransport>,
        session: Arc<SessionService>,
    ) -> Self {
        Self {
            ctx: Arc::new(ClientContext {
                config,
                transport,
                session,
            }),
        }
    }

    /// Start a query against `collection`
    pub fn from(&self, collection: impl Into<String>) -> QueryBuilder {
        QueryBuilder::new(Arc::clone(&self.ctx), collection)
    }

    /// Session service backing this client
    pub fn session(&self) -> Arc<SessionService> {
        Arc::clone(&self.ctx.session)
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &AnyxConfig {
        &self.ctx.config
    }
}

#[cfg(test)]
pub(crate) fn test_client() -> AnyxClient {
    use crate::transport::MockTransport;

    AnyxClient::with_parts(
        AnyxConfig::new("http://proxy.test", "deploy-1"),
        Arc::new(MockTransport::new()),
        Arc::new(SessionService::new(Arc::new(MemoryStorage::new()))),
    )
}
