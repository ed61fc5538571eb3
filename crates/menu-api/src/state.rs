use std::sync::Arc;

use menu_core::repositories::{ItemRepository, MenuRepository};
use menu_core::services::{ItemService, MenuService};

pub type DynMenuService = MenuService<dyn MenuRepository, dyn ItemRepository>;
pub type DynItemService = ItemService<dyn MenuRepository, dyn ItemRepository>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub menu_service: Arc<DynMenuService>,
    pub item_service: Arc<DynItemService>,
}

impl AppState {
    pub fn new(menus: Arc<dyn MenuRepository>, items: Arc<dyn ItemRepository>) -> Self {
        Self {
            menu_service: Arc::new(MenuService::new(menus.clone(), items.clone())),
            item_service: Arc::new(ItemService::new(menus, items)),
        }
    }
}
