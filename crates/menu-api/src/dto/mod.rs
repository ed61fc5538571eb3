//! Request DTOs

pub mod menu;
pub mod item;

pub use menu::{CreateMenuRequest, UpdateMenuRequest};
pub use item::{CreateItemRequest, ItemQuery, UpdateItemRequest};

use uuid::Uuid;

use crate::error::ApiError;

/// Parse an id taken from a path or body field.
pub fn parse_id(field: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ApiError::BadRequest(format!("{} must be a valid id, got '{}'", field, raw)))
}
