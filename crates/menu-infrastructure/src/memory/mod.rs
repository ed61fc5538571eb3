//! In-memory store for development and tests
//!
//! Implements both repository ports over insertion-ordered vectors guarded by
//! `parking_lot::RwLock`. Deletes cascade the same way the PostgreSQL schema
//! does.

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use menu_core::domain::{Item, ItemFilter, Menu};
use menu_core::error::DomainError;
use menu_core::repositories::{ItemRepository, MenuRepository};
use menu_core::tree::subtree_ids;

#[derive(Default)]
pub struct InMemoryStore {
    menus: RwLock<Vec<Menu>>,
    items: RwLock<Vec<Item>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Menu>, DomainError> {
        Ok(self.menus.read().clone())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Menu>, DomainError> {
        Ok(self.menus.read().iter().find(|m| &m.id == id).cloned())
    }

    async fn create(&self, menu: &Menu) -> Result<Menu, DomainError> {
        let mut menus = self.menus.write();
        if menus.iter().any(|m| m.id == menu.id) {
            return Err(DomainError::DatabaseError(format!("duplicate menu id {}", menu.id)));
        }
        menus.push(menu.clone());
        Ok(menu.clone())
    }

    async fn update(&self, menu: &Menu) -> Result<Menu, DomainError> {
        let mut menus = self.menus.write();
        let slot = menus
            .iter_mut()
            .find(|m| m.id == menu.id)
            .ok_or(DomainError::MenuNotFound(menu.id))?;
        *slot = menu.clone();
        Ok(menu.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let mut menus = self.menus.write();
        let before = menus.len();
        menus.retain(|m| &m.id != id);
        if menus.len() == before {
            return Err(DomainError::MenuNotFound(*id));
        }

        let mut items = self.items.write();
        items.retain(|i| &i.menu_id != id);
        debug!("Menu {} removed with its items, {} items left", id, items.len());
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for InMemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Item>, DomainError> {
        Ok(self.items.read().iter().find(|i| &i.id == id).cloned())
    }

    async fn find(&self, filter: &ItemFilter) -> Result<Vec<Item>, DomainError> {
        let mut found: Vec<Item> = self
            .items
            .read()
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();
        // stable: equal depths keep insertion order
        found.sort_by_key(|i| i.depth);
        Ok(found)
    }

    async fn find_roots(&self, menu_id: &Uuid) -> Result<Vec<Item>, DomainError> {
        Ok(self
            .items
            .read()
            .iter()
            .filter(|i| &i.menu_id == menu_id && i.parent_id.is_none())
            .cloned()
            .collect())
    }

    async fn create(&self, item: &Item) -> Result<Item, DomainError> {
        if !self.menus.read().iter().any(|m| m.id == item.menu_id) {
            return Err(DomainError::MenuNotFound(item.menu_id));
        }

        let mut items = self.items.write();
        if items.iter().any(|i| i.id == item.id) {
            return Err(DomainError::DatabaseError(format!("duplicate item id {}", item.id)));
        }
        if let Some(parent_id) = item.parent_id {
            if !items.iter().any(|i| i.id == parent_id) {
                return Err(DomainError::ParentNotFound(parent_id));
            }
        }
        items.push(item.clone());
        Ok(item.clone())
    }

    async fn update(&self, item: &Item) -> Result<Item, DomainError> {
        let mut items = self.items.write();
        let slot = items
            .iter_mut()
            .find(|i| i.id == item.id)
            .ok_or(DomainError::ItemNotFound(item.id))?;
        *slot = item.clone();
        Ok(item.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let mut items = self.items.write();
        if !items.iter().any(|i| &i.id == id) {
            return Err(DomainError::ItemNotFound(*id));
        }

        let doomed = subtree_ids(&items, *id);
        items.retain(|i| !doomed.contains(&i.id));
        debug!("Item {} removed with {} descendants", id, doomed.len() - 1);
        Ok(())
    }
}
