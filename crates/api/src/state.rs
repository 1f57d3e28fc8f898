use std::sync::Arc;

use ecole_core::events::bus::EventBus;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::storage::LocalStorage;

/// Shared application state, passed to all handlers via Axum's `State`
/// extractor. Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    pool: PgPool,
    config: AppConfig,
    event_bus: EventBus,
    storage: LocalStorage,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig, event_bus: EventBus, storage: LocalStorage) -> Self {
        Self {
            inner: Arc::new(InnerState {
                pool,
                config,
                event_bus,
                storage,
            }),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.event_bus
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.inner.storage
    }
}
