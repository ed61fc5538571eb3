//! Menu repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::Menu;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Menu>, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Menu>, DomainError>;
    async fn create(&self, menu: &Menu) -> Result<Menu, DomainError>;
    async fn update(&self, menu: &Menu) -> Result<Menu, DomainError>;
    /// Removes the menu together with all of its items.
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<(), DomainError>;
}
