//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Menu not found: {0}")]
    MenuNotFound(Uuid),

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Parent item not found: {0}")]
    ParentNotFound(Uuid),

    #[error("Parent item {parent_id} does not belong to menu {menu_id}")]
    ParentMenuMismatch { parent_id: Uuid, menu_id: Uuid },

    #[error("Invalid depth {actual}, expected {expected}")]
    InvalidDepth { expected: i32, actual: i32 },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::MenuNotFound(_) | DomainError::ItemNotFound(_) | DomainError::ParentNotFound(_)
        )
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
