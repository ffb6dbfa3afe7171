//! Category and condition repository.

use sqlx::PgPool;
use uuid::Uuid;

use tradepost_core::error::{AppError, ErrorKind};
use tradepost_core::result::AppResult;
use tradepost_entity::listing::{Category, Condition};

/// Repository for catalog reference data.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All categories ordered by name.
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))
    }

    /// All conditions ordered by name.
    pub async fn list_conditions(&self) -> AppResult<Vec<Condition>> {
        sqlx::query_as::<_, Condition>("SELECT id, name, description FROM conditions ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list conditions", e))
    }

    pub async fn find_category(&self, id: Uuid) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    pub async fn find_condition(&self, id: Uuid) -> AppResult<Option<Condition>> {
        sqlx::query_as::<_, Condition>("SELECT id, name, description FROM conditions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find condition", e))
    }

    /// Create a category; duplicate names are a conflict.
    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2) \
             RETURNING id, name, description",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("categories_name_key") =>
            {
                AppError::conflict(format!("Category '{name}' already exists"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create category", e),
        })
    }

    /// Create a condition; duplicate names are a conflict.
    pub async fn create_condition(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Condition> {
        sqlx::query_as::<_, Condition>(
            "INSERT INTO conditions (name, description) VALUES ($1, $2) \
             RETURNING id, name, description",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("conditions_name_key") =>
            {
                AppError::conflict(format!("Condition '{name}' already exists"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create condition", e),
        })
    }
}
