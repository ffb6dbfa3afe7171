//! Category and condition reference data.

use std::sync::Arc;

use tracing::info;

use tradepost_auth::rbac::{RbacEnforcer, SystemPermission};
use tradepost_core::error::AppError;
use tradepost_core::result::AppResult;
use tradepost_database::repositories::CatalogRepository;
use tradepost_entity::listing::{Category, Condition};

use crate::context::RequestContext;

/// Reads and maintains the catalog.
#[derive(Debug, Clone)]
pub struct CatalogService {
    catalog_repo: Arc<CatalogRepository>,
    rbac: Arc<RbacEnforcer>,
}

impl CatalogService {
    pub fn new(catalog_repo: Arc<CatalogRepository>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { catalog_repo, rbac }
    }

    pub async fn categories(&self) -> AppResult<Vec<Category>> {
        self.catalog_repo.list_categories().await
    }

    pub async fn conditions(&self) -> AppResult<Vec<Condition>> {
        self.catalog_repo.list_conditions().await
    }

    /// Add a category (admin only).
    pub async fn create_category(
        &self,
        ctx: &RequestContext,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Category> {
        self.rbac
            .require_permission(&ctx.roles, SystemPermission::CatalogManage)?;
        let name = catalog_name(name)?;
        let category = self
            .catalog_repo
            .create_category(name, description.map(str::trim).filter(|d| !d.is_empty()))
            .await?;
        info!(user_id = %ctx.user_id, category = %category.name, "Category created");
        Ok(category)
    }

    /// Add a condition (admin only).
    pub async fn create_condition(
        &self,
        ctx: &RequestContext,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Condition> {
        self.rbac
            .require_permission(&ctx.roles, SystemPermission::CatalogManage)?;
        let name = catalog_name(name)?;
        let condition = self
            .catalog_repo
            .create_condition(name, description.map(str::trim).filter(|d| !d.is_empty()))
            .await?;
        info!(user_id = %ctx.user_id, condition = %condition.name, "Condition created");
        Ok(condition)
    }
}

fn catalog_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    Ok(name)
}
