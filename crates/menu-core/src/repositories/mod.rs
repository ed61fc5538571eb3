//! Repository traits (ports)

pub mod menu_repository;
pub mod item_repository;

pub use menu_repository::MenuRepository;
pub use item_repository::ItemRepository;
