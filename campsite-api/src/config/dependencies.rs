//! Dependency initialization and wiring for the content API.

use std::sync::Arc;

use campsite_repository::{DocumentStore, InMemoryStore, MongoStore};
use tracing::{error, info, warn};

use super::{ApiConfig, StoreBackend};
use crate::AppError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Store shared by the seeder and every request handler.
    pub store: Arc<dyn DocumentStore>,
}

impl Dependencies {
    /// Connect to the configured store and verify it is reachable.
    ///
    /// Fails immediately when the store cannot be reached; there is no retry.
    pub async fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let store: Arc<dyn DocumentStore> = match &config.store {
            StoreBackend::Mongo(store_config) => {
                info!(database = %store_config.database, "Connecting to MongoDB");
                Arc::new(MongoStore::connect(store_config).await?)
            }
            StoreBackend::Memory => {
                warn!("Using in-memory store, content will not survive a restart");
                Arc::new(InMemoryStore::new())
            }
        };

        if let Err(e) = store.ping().await {
            error!(error = %e, "Store is unreachable");
            return Err(e.into());
        }

        info!("Store connection established");
        Ok(Self { store })
    }

    /// Release the store connection.
    pub async fn shutdown(&self) {
        self.store.shutdown().await;
    }
}
