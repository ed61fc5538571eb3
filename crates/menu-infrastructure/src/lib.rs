//! # Menu Infrastructure
//! 
//! Storage implementations (adapters) for the menu repository ports.

pub mod database;
pub mod memory;

use std::sync::Arc;

use menu_core::error::DomainError;
use menu_core::repositories::{ItemRepository, MenuRepository};
use menu_shared::config::{DatabaseBackend, DatabaseSettings};
use tracing::info;

pub use database::{create_pool, run_migrations, PgItemRepository, PgMenuRepository};
pub use memory::InMemoryStore;

/// Repository handles for the configured backend
#[derive(Clone)]
pub struct Repositories {
    pub menus: Arc<dyn MenuRepository>,
    pub items: Arc<dyn ItemRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            menus: store.clone(),
            items: store,
        }
    }

    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, DomainError> {
        match settings.backend {
            DatabaseBackend::Memory => {
                info!("Using in-memory store");
                Ok(Self::in_memory())
            }
            DatabaseBackend::Postgres => {
                let pool = create_pool(settings)
                    .await
                    .map_err(|e| DomainError::DatabaseError(e.to_string()))?;

                if settings.run_migrations {
                    run_migrations(&pool)
                        .await
                        .map_err(|e| DomainError::DatabaseError(e.to_string()))?;
                    info!("Database migrations applied");
                }

                Ok(Self {
                    menus: Arc::new(PgMenuRepository::new(pool.clone())),
                    items: Arc::new(PgItemRepository::new(pool)),
                })
            }
        }
    }
}
