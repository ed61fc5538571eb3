// ============================================================================
// Menu Infrastructure - PostgreSQL Item Repository
// File: crates/menu-infrastructure/src/database/postgres/item_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{PgPool, FromRow};
use uuid::Uuid;
use tracing::{debug, info, error};
use chrono::{DateTime, Utc};

use menu_core::domain::{Item, ItemFilter};
use menu_core::error::DomainError;
use menu_core::repositories::ItemRepository;

pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ItemRow {
    pub id: Uuid,
    pub name: String,
    pub depth: i32,
    pub parent_id: Option<Uuid>,
    pub menu_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            depth: row.depth,
            parent_id: row.parent_id,
            menu_id: row.menu_id,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    let msg = e.to_string();
    if msg.contains("foreign key") {
        DomainError::ValidationError(format!("Referenced menu or parent does not exist: {}", msg))
    } else {
        DomainError::DatabaseError(msg)
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Item>, DomainError> {
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, depth, parent_id, menu_id, created_at, modified_at
            FROM items
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding item by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find(&self, filter: &ItemFilter) -> Result<Vec<Item>, DomainError> {
        debug!("Finding items: {:?}", filter);

        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, depth, parent_id, menu_id, created_at, modified_at
            FROM items
            WHERE ($1::uuid IS NULL OR menu_id = $1)
              AND (cardinality($2::uuid[]) = 0 OR parent_id = ANY($2))
              AND ($3::int IS NULL OR depth >= $3)
              AND NOT (id = ANY($4::uuid[]))
            ORDER BY depth ASC, created_at ASC
            "#
        )
        .bind(filter.menu_id)
        .bind(&filter.parent_ids)
        .bind(filter.min_depth)
        .bind(&filter.exclude_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing items", e))?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn find_roots(&self, menu_id: &Uuid) -> Result<Vec<Item>, DomainError> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, depth, parent_id, menu_id, created_at, modified_at
            FROM items
            WHERE menu_id = $1 AND parent_id IS NULL
            ORDER BY created_at ASC
            "#
        )
        .bind(menu_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing root items", e))?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn create(&self, item: &Item) -> Result<Item, DomainError> {
        info!("Creating item: {} in menu {}", item.name, item.menu_id);

        let row: ItemRow = sqlx::query_as(
            r#"
            INSERT INTO items (id, name, depth, parent_id, menu_id, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, depth, parent_id, menu_id, created_at, modified_at
            "#
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(item.depth)
        .bind(item.parent_id)
        .bind(item.menu_id)
        .bind(item.created_at)
        .bind(item.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating item", e))?;

        Ok(row.into())
    }

    async fn update(&self, item: &Item) -> Result<Item, DomainError> {
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            UPDATE items
            SET name = $2, modified_at = $3
            WHERE id = $1
            RETURNING id, name, depth, parent_id, menu_id, created_at, modified_at
            "#
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(item.modified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating item", e))?;

        row.map(Item::from).ok_or(DomainError::ItemNotFound(item.id))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        // parent_id cascades, so the whole subtree goes with it
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting item", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ItemNotFound(*id));
        }
        Ok(())
    }
}
