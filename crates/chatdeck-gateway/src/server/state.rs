//! Gateway state
//!
//! Shared by every socket task and the HTTP handlers.

use std::sync::Arc;

use chatdeck_api::ApiState;
use chatdeck_common::AppConfig;
use chatdeck_service::ServiceContext;
use tokio::sync::{Mutex, MutexGuard};

use crate::broadcast::Broadcaster;
use crate::connection::SessionRegistry;

/// Gateway application state
///
/// Cheap to clone; every field is reference counted.
///
/// Inbound events run one at a time under `events`: an event's storage
/// calls, registry update and broadcast finish before the next event starts,
/// whichever socket it came from.
#[derive(Clone)]
pub struct GatewayState {
    service_context: Arc<ServiceContext>,
    registry: Arc<SessionRegistry>,
    broadcaster: Broadcaster,
    config: Arc<AppConfig>,
    events: Arc<Mutex<()>>,
}

impl GatewayState {
    /// Create the state with an empty session registry
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        let registry = Arc::new(SessionRegistry::new());
        Self {
            service_context: Arc::new(service_context),
            broadcaster: Broadcaster::new(registry.clone()),
            registry,
            config: Arc::new(config),
            events: Arc::new(Mutex::new(())),
        }
    }

    /// Wait for exclusive use of the registry and storage for one event
    pub async fn lock_events(&self) -> MutexGuard<'_, ()> {
        self.events.lock().await
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// HTTP state backed by the same storage and config
    pub fn api_state(&self) -> ApiState {
        ApiState::from_shared(self.service_context.clone(), self.config.clone())
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .field("config", &self.config.app.name)
            .finish()
    }
}
