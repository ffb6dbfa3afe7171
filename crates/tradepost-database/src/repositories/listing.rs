//! Listing repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use tradepost_core::error::{AppError, ErrorKind};
use tradepost_core::result::AppResult;
use tradepost_entity::listing::{
    AdminListing, CreateListing, Listing, ListingDetail, ListingStatus, OwnedListing,
    UpdateListing,
};

/// Columns of [`ListingDetail`] beyond `l.*`.
const DETAIL_SELECT: &str = "SELECT l.*, \
     c.name AS category_name, \
     co.name AS condition_name, \
     p.first_name AS seller_first_name, \
     p.company_name AS seller_company_name, \
     p.is_verified AS seller_verified \
     FROM listings l \
     LEFT JOIN categories c ON c.id = l.category_id \
     LEFT JOIN conditions co ON co.id = l.condition_id \
     LEFT JOIN profiles p ON p.user_id = l.user_id";

/// Repository for listing CRUD, moderation flags and read models.
#[derive(Debug, Clone)]
pub struct ListingRepository {
    pool: PgPool,
}

impl ListingRepository {
    /// Create a new listing repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a listing by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Listing>> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find listing", e))
    }

    /// Find a listing joined with catalog names and its seller.
    pub async fn find_detail(&self, id: Uuid) -> AppResult<Option<ListingDetail>> {
        sqlx::query_as::<_, ListingDetail>(&format!("{DETAIL_SELECT} WHERE l.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load listing detail", e)
            })
    }

    /// Every listing a buyer may find in search, newest first.
    pub async fn find_searchable(&self) -> AppResult<Vec<ListingDetail>> {
        sqlx::query_as::<_, ListingDetail>(&format!(
            "{DETAIL_SELECT} WHERE l.status = 'published' \
             AND NOT l.disabled_by_admin AND NOT l.deleted_by_user \
             ORDER BY l.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load searchable listings", e)
        })
    }

    /// Insert a new draft listing with its photo URLs.
    pub async fn create(&self, data: &CreateListing) -> AppResult<Listing> {
        sqlx::query_as::<_, Listing>(
            "INSERT INTO listings \
             (id, user_id, title, description, price, category_id, condition_id, location, \
             images, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'draft') RETURNING *",
        )
        .bind(data.id)
        .bind(data.user_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.category_id)
        .bind(data.condition_id)
        .bind(&data.location)
        .bind(&data.images)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create listing", e))
    }

    /// Overwrite the editable fields of a listing.
    pub async fn update(&self, id: Uuid, data: &UpdateListing) -> AppResult<Listing> {
        sqlx::query_as::<_, Listing>(
            "UPDATE listings SET title = $2, description = $3, price = $4, category_id = $5, \
             condition_id = $6, location = $7, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.category_id)
        .bind(data.condition_id)
        .bind(&data.location)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update listing", e))?
        .ok_or_else(|| AppError::not_found(format!("Listing {id} not found")))
    }

    /// Replace the image URL list.
    pub async fn set_images(&self, id: Uuid, images: &[String]) -> AppResult<Listing> {
        sqlx::query_as::<_, Listing>(
            "UPDATE listings SET images = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(images)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to store listing images", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Listing {id} not found")))
    }

    /// Change the publication status.
    pub async fn set_status(&self, id: Uuid, status: ListingStatus) -> AppResult<Listing> {
        sqlx::query_as::<_, Listing>(
            "UPDATE listings SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update listing status", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Listing {id} not found")))
    }

    /// Mark a listing as deleted by its seller.
    pub async fn soft_delete(&self, id: Uuid, reason: &str) -> AppResult<Listing> {
        sqlx::query_as::<_, Listing>(
            "UPDATE listings SET deleted_by_user = TRUE, deleted_at = NOW(), \
             deletion_reason = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete listing", e))?
        .ok_or_else(|| AppError::not_found(format!("Listing {id} not found")))
    }

    /// Hide or restore a listing on behalf of a moderator.
    pub async fn set_disabled(
        &self,
        id: Uuid,
        disabled: bool,
        reason: Option<&str>,
    ) -> AppResult<Listing> {
        sqlx::query_as::<_, Listing>(
            "UPDATE listings SET disabled_by_admin = $2, disabled_reason = $3, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(disabled)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update moderation flag", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Listing {id} not found")))
    }

    /// Count one detail view.
    pub async fn increment_views(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE listings SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to record listing view", e)
            })?;
        Ok(())
    }

    /// A seller's listings, deleted ones included, newest first.
    pub async fn find_by_owner(&self, user_id: Uuid) -> AppResult<Vec<OwnedListing>> {
        sqlx::query_as::<_, OwnedListing>(
            "SELECT l.*, c.name AS category_name FROM listings l \
             LEFT JOIN categories c ON c.id = l.category_id \
             WHERE l.user_id = $1 ORDER BY l.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list own listings", e))
    }

    /// Every listing with its owner's names, newest first.
    pub async fn find_all_for_moderation(&self) -> AppResult<Vec<AdminListing>> {
        sqlx::query_as::<_, AdminListing>(
            "SELECT l.*, p.company_name AS owner_company_name, \
             p.first_name AS owner_first_name FROM listings l \
             LEFT JOIN profiles p ON p.user_id = l.user_id \
             ORDER BY l.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list listings", e))
    }
}
