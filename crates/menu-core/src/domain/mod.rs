//! # Menu Core - Domain Module
//! 
//! Domain entities for the menu admin application.

pub mod menu;
pub mod item;

pub use menu::{Menu, MenuDetail};
pub use item::{Item, ItemFilter, NewItem};
