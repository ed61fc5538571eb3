// ============================================================================
// Menu API - Menu Handlers
// File: crates/menu-api/src/handlers/menu.rs
// ============================================================================
//! Menu CRUD handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use menu_core::domain::{Menu, MenuDetail};

use crate::dto::{parse_id, CreateMenuRequest, UpdateMenuRequest};
use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::response::ApiResponse;
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// GET /menu
pub async fn list_menus(State(state): State<AppState>) -> ApiResult<Vec<Menu>> {
    let menus = state.menu_service.list_menus().await?;
    Ok(Json(ApiResponse::success(menus)))
}

/// GET /menu/{id} - the menu with its root-level items
pub async fn get_menu(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<MenuDetail> {
    let id = parse_id("id", &id)?;
    let detail = state.menu_service.get_menu(&id).await?;
    Ok(Json(ApiResponse::success(detail)))
}

/// POST /menu
pub async fn create_menu(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateMenuRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Menu>>), ApiError> {
    let menu = state.menu_service.create_menu(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(menu))))
}

/// PUT /menu/{id}
pub async fn update_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateMenuRequest>,
) -> ApiResult<Menu> {
    let id = parse_id("id", &id)?;
    let menu = match payload.name {
        Some(name) => state.menu_service.update_menu(&id, &name).await?,
        None => state.menu_service.get_menu(&id).await?.menu,
    };
    Ok(Json(ApiResponse::success(menu)))
}

/// DELETE /menu/{id}
pub async fn delete_menu(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Menu> {
    let id = parse_id("id", &id)?;
    let menu = state.menu_service.delete_menu(&id).await?;
    Ok(Json(ApiResponse::success(menu)))
}
