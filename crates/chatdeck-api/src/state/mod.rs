//! Application state
//!
//! Holds the shared state for the HTTP handlers.

use std::sync::Arc;

use chatdeck_common::AppConfig;
use chatdeck_service::ServiceContext;

/// State shared across all HTTP handlers
#[derive(Clone)]
pub struct ApiState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl ApiState {
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }

    /// Share a context and config already owned elsewhere (the gateway)
    pub fn from_shared(service_context: Arc<ServiceContext>, config: Arc<AppConfig>) -> Self {
        Self {
            service_context,
            config,
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState")
            .field("service_context", &"ServiceContext")
            .field("config", &self.config.app.name)
            .finish()
    }
}
