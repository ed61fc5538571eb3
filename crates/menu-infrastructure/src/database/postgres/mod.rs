//! PostgreSQL repository implementations

pub mod menu_repo_impl;
pub mod item_repo_impl;

pub use menu_repo_impl::PgMenuRepository;
pub use item_repo_impl::PgItemRepository;
