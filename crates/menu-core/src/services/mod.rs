//! Domain services (business logic)

pub mod menu_service;
pub mod item_service;

pub use menu_service::MenuService;
pub use item_service::ItemService;
