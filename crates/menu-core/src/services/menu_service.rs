// ============================================================================
// Menu Core - Menu Service
// File: crates/menu-core/src/services/menu_service.rs
// ============================================================================
//! Menu CRUD on top of the repository ports

use std::sync::Arc;
use uuid::Uuid;
use tracing::{info, warn};

use crate::domain::{Menu, MenuDetail};
use crate::error::DomainError;
use crate::repositories::{ItemRepository, MenuRepository};

pub struct MenuService<M: MenuRepository + ?Sized, I: ItemRepository + ?Sized> {
    menu_repo: Arc<M>,
    item_repo: Arc<I>,
}

impl<M: MenuRepository + ?Sized, I: ItemRepository + ?Sized> MenuService<M, I> {
    pub fn new(menu_repo: Arc<M>, item_repo: Arc<I>) -> Self {
        Self { menu_repo, item_repo }
    }

    pub async fn list_menus(&self) -> Result<Vec<Menu>, DomainError> {
        self.menu_repo.find_all().await
    }

    /// Menu with its root-level items
    pub async fn get_menu(&self, id: &Uuid) -> Result<MenuDetail, DomainError> {
        let menu = self.find_menu(id).await?;
        let items = self.item_repo.find_roots(id).await?;
        Ok(MenuDetail { menu, items })
    }

    pub async fn create_menu(&self, name: &str) -> Result<Menu, DomainError> {
        let menu = Menu::new(name.to_string()).map_err(|e| {
            warn!("Rejected menu create: {}", e);
            DomainError::from(e)
        })?;

        let created = self.menu_repo.create(&menu).await?;
        info!("Menu created: {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn update_menu(&self, id: &Uuid, name: &str) -> Result<Menu, DomainError> {
        let mut menu = self.find_menu(id).await?;
        menu.rename(name)?;

        let updated = self.menu_repo.update(&menu).await?;
        info!("Menu updated: {}", updated.id);
        Ok(updated)
    }

    /// Deletes the menu and its items, returning the deleted menu.
    pub async fn delete_menu(&self, id: &Uuid) -> Result<Menu, DomainError> {
        let menu = self.find_menu(id).await?;
        self.menu_repo.delete(id).await?;
        info!("Menu deleted: {}", id);
        Ok(menu)
    }

    pub async fn health_check(&self) -> Result<(), DomainError> {
        self.menu_repo.ping().await
    }

    async fn find_menu(&self, id: &Uuid) -> Result<Menu, DomainError> {
        self.menu_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::MenuNotFound(*id))
    }
}
