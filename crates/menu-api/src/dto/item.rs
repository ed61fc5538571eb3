// ============================================================================
// Menu API - Item DTOs
// File: crates/menu-api/src/dto/item.rs
// ============================================================================

use serde::Deserialize;
use validator::Validate;

use menu_core::domain::{ItemFilter, NewItem};
use menu_shared::utils::parse_id_list;

use super::parse_id;
use crate::error::ApiError;

/// Create item payload
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,

    #[validate(required(message = "depth must be a number"))]
    pub depth: Option<i32>,

    #[serde(default)]
    #[validate(length(min = 1, message = "menuId should not be empty"))]
    pub menu_id: String,

    pub parent_id: Option<String>,
}

impl TryFrom<CreateItemRequest> for NewItem {
    type Error = ApiError;

    fn try_from(req: CreateItemRequest) -> Result<Self, Self::Error> {
        let parent_id = match req.parent_id.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(parse_id("parentId", raw)?),
            _ => None,
        };

        Ok(NewItem {
            name: req.name,
            depth: req
                .depth
                .ok_or_else(|| ApiError::BadRequest("depth must be a number".to_string()))?,
            menu_id: parse_id("menuId", &req.menu_id)?,
            parent_id,
        })
    }
}

/// Edit item payload. Only the name is editable.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,
}

/// `GET /item` query. Lists are comma-separated; blank values are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuery {
    pub menu_id: Option<String>,
    pub parent_ids: Option<String>,
    pub depth: Option<String>,
    pub exclude_ids: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn id_list(field: &str, value: &Option<String>) -> Result<Vec<uuid::Uuid>, ApiError> {
    match non_blank(value) {
        Some(raw) => parse_id_list(raw)
            .map_err(|bad| ApiError::BadRequest(format!("{} contains an invalid id '{}'", field, bad))),
        None => Ok(Vec::new()),
    }
}

impl TryFrom<ItemQuery> for ItemFilter {
    type Error = ApiError;

    fn try_from(query: ItemQuery) -> Result<Self, Self::Error> {
        let menu_id = non_blank(&query.menu_id)
            .map(|raw| parse_id("menuId", raw))
            .transpose()?;

        let min_depth = non_blank(&query.depth)
            .map(|raw| {
                raw.parse::<i32>()
                    .map_err(|_| ApiError::BadRequest(format!("depth must be a number, got '{}'", raw)))
            })
            .transpose()?;

        Ok(ItemFilter {
            menu_id,
            parent_ids: id_list("parentIds", &query.parent_ids)?,
            min_depth,
            exclude_ids: id_list("excludeIds", &query.exclude_ids)?,
        })
    }
}
