//! HTTP client for the menu admin backend
//!
//! Thin wrapper over `reqwest`: one method per endpoint, responses unwrapped
//! from the `{ success, data, error, timestamp }` envelope.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use menu_core::domain::{Item, Menu, MenuDetail};

use crate::error::ClientError;
use crate::query::ItemQuery;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<EnvelopeError>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeError {
    code: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct NameBody<'a> {
    name: &'a str,
}

/// Body of `POST /item`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    pub name: String,
    pub depth: i32,
    pub menu_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct MenuApiClient {
    client: Client,
    base_url: String,
}

impl MenuApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ==================== Menus ====================

    pub async fn list_menus(&self) -> Result<Vec<Menu>, ClientError> {
        self.send(self.client.get(self.url("/menu"))).await
    }

    pub async fn get_menu(&self, id: &Uuid) -> Result<MenuDetail, ClientError> {
        self.send(self.client.get(self.url(&format!("/menu/{}", id)))).await
    }

    pub async fn create_menu(&self, name: &str) -> Result<Menu, ClientError> {
        self.send(self.client.post(self.url("/menu")).json(&NameBody { name }))
            .await
    }

    pub async fn update_menu(&self, id: &Uuid, name: &str) -> Result<Menu, ClientError> {
        self.send(
            self.client
                .put(self.url(&format!("/menu/{}", id)))
                .json(&NameBody { name }),
        )
        .await
    }

    pub async fn delete_menu(&self, id: &Uuid) -> Result<Menu, ClientError> {
        self.send(self.client.delete(self.url(&format!("/menu/{}", id))))
            .await
    }

    // ==================== Items ====================

    pub async fn list_items(&self, query: &ItemQuery) -> Result<Vec<Item>, ClientError> {
        let path = format!("/item{}", query.to_query_string());
        self.send(self.client.get(self.url(&path))).await
    }

    pub async fn get_item(&self, id: &Uuid) -> Result<Item, ClientError> {
        self.send(self.client.get(self.url(&format!("/item/{}", id)))).await
    }

    pub async fn create_item(&self, item: &CreateItem) -> Result<Item, ClientError> {
        self.send(self.client.post(self.url("/item")).json(item)).await
    }

    pub async fn update_item(&self, id: &Uuid, name: &str) -> Result<Item, ClientError> {
        self.send(
            self.client
                .put(self.url(&format!("/item/{}", id)))
                .json(&NameBody { name }),
        )
        .await
    }

    pub async fn delete_item(&self, id: &Uuid) -> Result<Item, ClientError> {
        self.send(self.client.delete(self.url(&format!("/item/{}", id))))
            .await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!("Backend answered {} ({} bytes)", status, body.len());

        let envelope: Envelope<T> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(ClientError::Decode(e.to_string()));
            }
            Err(_) => {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    code: "HTTP_ERROR".to_string(),
                    message: String::from_utf8_lossy(&body).into_owned(),
                });
            }
        };

        if !status.is_success() || !envelope.success {
            let (code, message) = envelope
                .error
                .map(|e| (e.code, e.message))
                .unwrap_or_else(|| ("UNKNOWN_ERROR".to_string(), status.to_string()));
            return Err(ClientError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        envelope
            .data
            .ok_or_else(|| ClientError::Decode("response carries no data".to_string()))
    }
}
