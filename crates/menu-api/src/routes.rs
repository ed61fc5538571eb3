//! Router assembly

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use menu_shared::config::CorsSettings;

use crate::handlers::{health, item, menu};
use crate::state::AppState;

pub fn build_router(state: AppState, cors: &CorsSettings) -> Router {
    let api_routes = Router::new()
        .route("/menu", get(menu::list_menus).post(menu::create_menu))
        .route(
            "/menu/{id}",
            get(menu::get_menu).put(menu::update_menu).delete(menu::delete_menu),
        )
        .route("/item", get(item::list_items).post(item::create_item))
        .route(
            "/item/{id}",
            get(item::get_item).put(item::update_item).delete(item::delete_item),
        );

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .merge(api_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors_layer(cors)),
        )
}

fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if settings.allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use menu_core::domain::{Item, Menu, MenuDetail};
    use menu_infrastructure::Repositories;
    use serde::de::DeserializeOwned;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::response::ApiResponse;

    fn app() -> Router {
        let repos = Repositories::in_memory();
        let cors = CorsSettings {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        };
        build_router(AppState::new(repos.menus, repos.items), &cors)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn data<T: DeserializeOwned>(body: Value) -> T {
        let envelope: ApiResponse<T> = serde_json::from_value(body).unwrap();
        assert!(envelope.success);
        envelope.data.unwrap()
    }

    async fn create_menu(app: &Router, name: &str) -> Menu {
        let (status, body) = send(app, Method::POST, "/menu", Some(json!({ "name": name }))).await;
        assert_eq!(status, StatusCode::CREATED);
        data(body)
    }

    async fn create_item(app: &Router, menu: &Menu, name: &str, parent: Option<&Item>) -> Item {
        let payload = json!({
            "name": name,
            "depth": parent.map(|p| p.depth + 1).unwrap_or(0),
            "menuId": menu.id,
            "parentId": parent.map(|p| p.id),
        });
        let (status, body) = send(app, Method::POST, "/item", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        data(body)
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "healthy");

        let (status, body) = send(&app, Method::GET, "/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ready");
    }

    #[tokio::test]
    async fn test_menu_crud() {
        let app = app();
        let menu = create_menu(&app, "Main").await;

        let (_, body) = send(&app, Method::GET, "/menu", None).await;
        let menus: Vec<Menu> = data(body);
        assert_eq!(menus, vec![menu.clone()]);

        let uri = format!("/menu/{}", menu.id);
        let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "name": "Footer" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(data::<Menu>(body).name, "Footer");

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(data::<Menu>(body).id, menu.id);

        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_get_menu_returns_root_items() {
        let app = app();
        let menu = create_menu(&app, "Main").await;
        let root = create_item(&app, &menu, "Home", None).await;
        create_item(&app, &menu, "About", Some(&root)).await;

        let (status, body) = send(&app, Method::GET, &format!("/menu/{}", menu.id), None).await;
        assert_eq!(status, StatusCode::OK);
        let detail: MenuDetail = data(body);
        assert_eq!(detail.menu.id, menu.id);
        assert_eq!(detail.items, vec![root]);
    }

    #[tokio::test]
    async fn test_create_item_with_empty_name_is_rejected() {
        let app = app();
        let menu = create_menu(&app, "Main").await;

        let payload = json!({ "name": "", "depth": 0, "menuId": menu.id });
        let (status, body) = send(&app, Method::POST, "/item", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, body) = send(&app, Method::GET, &format!("/item?menuId={}", menu.id), None).await;
        assert!(data::<Vec<Item>>(body).is_empty());
    }

    #[tokio::test]
    async fn test_create_item_shape_errors() {
        let app = app();
        let menu = create_menu(&app, "Main").await;

        let missing_menu = json!({ "name": "Home", "depth": 0, "menuId": "" });
        let (status, _) = send(&app, Method::POST, "/item", Some(missing_menu)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let string_depth = json!({ "name": "Home", "depth": "zero", "menuId": menu.id });
        let (status, body) = send(&app, Method::POST, "/item", Some(string_depth)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let unknown_menu = json!({ "name": "Home", "depth": 0, "menuId": uuid::Uuid::new_v4() });
        let (status, _) = send(&app, Method::POST, "/item", Some(unknown_menu)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_items_filters() {
        let app = app();
        let menu = create_menu(&app, "Main").await;
        let root = create_item(&app, &menu, "Home", None).await;
        let child = create_item(&app, &menu, "About", Some(&root)).await;
        let grandchild = create_item(&app, &menu, "Team", Some(&child)).await;

        let uri = format!(
            "/item?menuId={}&parentIds={},{}&depth=1&excludeIds={}",
            menu.id, root.id, child.id, child.id
        );
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(data::<Vec<Item>>(body), vec![grandchild]);

        let (status, _) = send(&app, Method::GET, "/item?parentIds=nope", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_item_query_uses_envelope() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/item?depth=1&depth=2", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = send(&app, Method::GET, "/item?depth=deep", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_update_and_delete_item() {
        let app = app();
        let menu = create_menu(&app, "Main").await;
        let root = create_item(&app, &menu, "Home", None).await;
        let child = create_item(&app, &menu, "About", Some(&root)).await;

        let uri = format!("/item/{}", root.id);
        let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "name": "Start" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(data::<Item>(body).name, "Start");

        let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "name": "" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(data::<Item>(body).id, root.id);

        let (status, _) = send(&app, Method::GET, &format!("/item/{}", child.id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_path_id() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/item/123", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
