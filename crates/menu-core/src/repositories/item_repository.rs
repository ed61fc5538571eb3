//! Item repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{Item, ItemFilter};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Item>, DomainError>;
    /// Items matching `filter`, ordered by depth then creation time.
    async fn find(&self, filter: &ItemFilter) -> Result<Vec<Item>, DomainError>;
    async fn find_roots(&self, menu_id: &Uuid) -> Result<Vec<Item>, DomainError>;
    async fn create(&self, item: &Item) -> Result<Item, DomainError>;
    async fn update(&self, item: &Item) -> Result<Item, DomainError>;
    /// Removes the item and its whole subtree.
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
}
