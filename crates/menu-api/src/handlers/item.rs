// ============================================================================
// Menu API - Item Handlers
// File: crates/menu-api/src/handlers/item.rs
// ============================================================================
//! Item CRUD handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use menu_core::domain::{Item, ItemFilter, NewItem};

use crate::dto::{parse_id, CreateItemRequest, ItemQuery, UpdateItemRequest};
use crate::error::ApiError;
use crate::extract::{ApiQuery, ValidatedJson};
use crate::response::ApiResponse;
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// GET /item?menuId=&parentIds=&depth=&excludeIds=
pub async fn list_items(State(state): State<AppState>, ApiQuery(query): ApiQuery<ItemQuery>) -> ApiResult<Vec<Item>> {
    let filter = ItemFilter::try_from(query)?;
    let items = state.item_service.list_items(&filter).await?;
    Ok(Json(ApiResponse::success(items)))
}

/// GET /item/{id}
pub async fn get_item(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Item> {
    let id = parse_id("id", &id)?;
    let item = state.item_service.get_item(&id).await?;
    Ok(Json(ApiResponse::success(item)))
}

/// POST /item
pub async fn create_item(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Item>>), ApiError> {
    let new_item = NewItem::try_from(payload)?;
    let item = state.item_service.create_item(new_item).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

/// PUT /item/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateItemRequest>,
) -> ApiResult<Item> {
    let id = parse_id("id", &id)?;
    let item = match payload.name {
        Some(name) => state.item_service.update_item(&id, &name).await?,
        None => state.item_service.get_item(&id).await?,
    };
    Ok(Json(ApiResponse::success(item)))
}

/// DELETE /item/{id} - removes the item and its subtree, returns the deleted item
pub async fn delete_item(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Item> {
    let id = parse_id("id", &id)?;
    let item = state.item_service.delete_item(&id).await?;
    Ok(Json(ApiResponse::success(item)))
}
