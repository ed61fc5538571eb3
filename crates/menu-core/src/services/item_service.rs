// ============================================================================
// Menu Core - Item Service
// File: crates/menu-core/src/services/item_service.rs
// ============================================================================
//! Item CRUD and hierarchy rules

use std::sync::Arc;
use uuid::Uuid;
use tracing::{debug, info, warn};

use menu_shared::constants::ROOT_DEPTH;

use crate::domain::{Item, ItemFilter, NewItem};
use crate::error::DomainError;
use crate::repositories::{ItemRepository, MenuRepository};

pub struct ItemService<M: MenuRepository + ?Sized, I: ItemRepository + ?Sized> {
    menu_repo: Arc<M>,
    item_repo: Arc<I>,
}

impl<M: MenuRepository + ?Sized, I: ItemRepository + ?Sized> ItemService<M, I> {
    pub fn new(menu_repo: Arc<M>, item_repo: Arc<I>) -> Self {
        Self { menu_repo, item_repo }
    }

    pub async fn list_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, DomainError> {
        let items = self.item_repo.find(filter).await?;
        debug!("Listed {} items for {:?}", items.len(), filter);
        Ok(items)
    }

    pub async fn get_item(&self, id: &Uuid) -> Result<Item, DomainError> {
        self.find_item(id).await
    }

    /// Create an item.
    ///
    /// The menu must exist. A child must name a parent of the same menu and sit
    /// exactly one level below it; an item without a parent must be at depth 0.
    pub async fn create_item(&self, new_item: NewItem) -> Result<Item, DomainError> {
        let item = Item::new(new_item).map_err(|e| {
            warn!("Rejected item create: {}", e);
            DomainError::from(e)
        })?;

        if self.menu_repo.find_by_id(&item.menu_id).await?.is_none() {
            return Err(DomainError::MenuNotFound(item.menu_id));
        }

        let expected_depth = match item.parent_id {
            Some(parent_id) => {
                let parent = self
                    .item_repo
                    .find_by_id(&parent_id)
                    .await?
                    .ok_or(DomainError::ParentNotFound(parent_id))?;

                if parent.menu_id != item.menu_id {
                    return Err(DomainError::ParentMenuMismatch {
                        parent_id,
                        menu_id: item.menu_id,
                    });
                }
                parent.depth + 1
            }
            None => ROOT_DEPTH,
        };

        if item.depth != expected_depth {
            warn!("Rejected item create: depth {} != {}", item.depth, expected_depth);
            return Err(DomainError::InvalidDepth {
                expected: expected_depth,
                actual: item.depth,
            });
        }

        let created = self.item_repo.create(&item).await?;
        info!("Item created: {} ({}) in menu {}", created.name, created.id, created.menu_id);
        Ok(created)
    }

    pub async fn update_item(&self, id: &Uuid, name: &str) -> Result<Item, DomainError> {
        let mut item = self.find_item(id).await?;
        item.rename(name)?;

        let updated = self.item_repo.update(&item).await?;
        info!("Item updated: {}", updated.id);
        Ok(updated)
    }

    /// Deletes the item and its subtree, returning the deleted item.
    pub async fn delete_item(&self, id: &Uuid) -> Result<Item, DomainError> {
        let item = self.find_item(id).await?;
        self.item_repo.delete(id).await?;
        info!("Item deleted: {}", id);
        Ok(item)
    }

    async fn find_item(&self, id: &Uuid) -> Result<Item, DomainError> {
        self.item_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::ItemNotFound(*id))
    }
}
