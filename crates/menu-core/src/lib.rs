//! # Menu Core
//! 
//! Domain entities, services, repository traits, and tree assembly for the menu admin application.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod tree;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
