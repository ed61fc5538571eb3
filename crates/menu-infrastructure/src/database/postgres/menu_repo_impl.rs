// ============================================================================
// Menu Infrastructure - PostgreSQL Menu Repository
// File: crates/menu-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{PgPool, FromRow};
use uuid::Uuid;
use tracing::{info, error};
use chrono::{DateTime, Utc};

use menu_core::domain::Menu;
use menu_core::error::DomainError;
use menu_core::repositories::MenuRepository;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuRow {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<MenuRow> for Menu {
    fn from(row: MenuRow) -> Self {
        Menu {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn find_all(&self) -> Result<Vec<Menu>, DomainError> {
        let rows: Vec<MenuRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, modified_at
            FROM menus
            ORDER BY created_at ASC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing menus", e))?;

        Ok(rows.into_iter().map(Menu::from).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Menu>, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at, modified_at
            FROM menus
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding menu by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, menu: &Menu) -> Result<Menu, DomainError> {
        info!("Creating menu: {}", menu.name);

        let row: MenuRow = sqlx::query_as(
            r#"
            INSERT INTO menus (id, name, created_at, modified_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, created_at, modified_at
            "#
        )
        .bind(menu.id)
        .bind(&menu.name)
        .bind(menu.created_at)
        .bind(menu.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating menu", e))?;

        Ok(row.into())
    }

    async fn update(&self, menu: &Menu) -> Result<Menu, DomainError> {
        let row: Option<MenuRow> = sqlx::query_as(
            r#"
            UPDATE menus
            SET name = $2, modified_at = $3
            WHERE id = $1
            RETURNING id, name, created_at, modified_at
            "#
        )
        .bind(menu.id)
        .bind(&menu.name)
        .bind(menu.modified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating menu", e))?;

        row.map(Menu::from).ok_or(DomainError::MenuNotFound(menu.id))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting menu", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MenuNotFound(*id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("pinging database", e))?;
        Ok(())
    }
}
