//! Listing create/update/read, status changes and soft deletion.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use tradepost_auth::rbac::{RbacEnforcer, SystemPermission};
use tradepost_core::error::AppError;
use tradepost_core::result::AppResult;
use tradepost_database::repositories::{CatalogRepository, ListingRepository};
use tradepost_entity::listing::{CreateListing, Listing, ListingStatus, UpdateListing};
use tradepost_storage::ImageStore;

use super::view::{ListingView, can_view};
use super::wizard::{ListingDraft, ListingInput, WizardLimits};
use crate::context::RequestContext;

/// Orchestrates listing persistence and photo uploads.
#[derive(Debug, Clone)]
pub struct ListingService {
    listing_repo: Arc<ListingRepository>,
    catalog_repo: Arc<CatalogRepository>,
    images: Arc<ImageStore>,
    rbac: Arc<RbacEnforcer>,
    limits: WizardLimits,
}

impl ListingService {
    /// Creates a new listing service.
    pub fn new(
        listing_repo: Arc<ListingRepository>,
        catalog_repo: Arc<CatalogRepository>,
        images: Arc<ImageStore>,
        rbac: Arc<RbacEnforcer>,
        limits: WizardLimits,
    ) -> Self {
        Self {
            listing_repo,
            catalog_repo,
            images,
            rbac,
            limits,
        }
    }

    /// Field limits applied by the wizard.
    pub fn limits(&self) -> WizardLimits {
        self.limits
    }

    /// Create a draft listing and upload its photos.
    ///
    /// Photos beyond the configured maximum are dropped. Photos are written
    /// first and the row is inserted with their URLs, so a failed upload
    /// leaves no listing behind and a failed insert leaves no photos.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut draft: ListingDraft,
        mut photos: Vec<Bytes>,
    ) -> AppResult<Listing> {
        photos.truncate(self.limits.max_photos);
        draft.photo_count = photos.len();
        draft.editing = false;

        let input = self.validate_draft(&draft).await?;
        self.images.validate(&photos)?;

        let listing_id = Uuid::new_v4();
        let urls = self.upload(ctx.user_id, listing_id, &photos).await?;

        let created = self
            .listing_repo
            .create(&CreateListing {
                id: listing_id,
                user_id: ctx.user_id,
                title: input.title,
                description: input.description,
                price: input.price,
                category_id: input.category_id,
                condition_id: input.condition_id,
                location: input.location,
                images: urls.clone(),
            })
            .await;
        let listing = match created {
            Ok(listing) => listing,
            Err(e) => {
                self.discard_photos(listing_id, &urls).await;
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            listing_id = %listing.id,
            photos = urls.len(),
            "Listing created"
        );
        Ok(listing)
    }

    /// Update an owned listing. Photos are replaced only when new ones are sent.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        listing_id: Uuid,
        mut draft: ListingDraft,
        mut photos: Vec<Bytes>,
    ) -> AppResult<Listing> {
        let existing = self.find_live(listing_id).await?;
        if !existing.is_owned_by(ctx.user_id) {
            return Err(AppError::forbidden("You can only edit your own listings"));
        }

        photos.truncate(self.limits.max_photos);
        draft.photo_count = photos.len();
        draft.editing = true;

        let input = self.validate_draft(&draft).await?;
        self.images.validate(&photos)?;

        let mut listing = self
            .listing_repo
            .update(
                listing_id,
                &UpdateListing {
                    title: input.title,
                    description: input.description,
                    price: input.price,
                    category_id: input.category_id,
                    condition_id: input.condition_id,
                    location: input.location,
                },
            )
            .await?;

        if !photos.is_empty() {
            let urls = self.upload(ctx.user_id, listing_id, &photos).await?;
            listing = match self.listing_repo.set_images(listing_id, &urls).await {
                Ok(listing) => listing,
                Err(e) => {
                    self.discard_photos(listing_id, &urls).await;
                    return Err(e);
                }
            };
            self.discard_photos(listing_id, &existing.images).await;
        }

        info!(user_id = %ctx.user_id, listing_id = %listing_id, "Listing updated");
        Ok(listing)
    }

    /// Load a listing for display, counting the view for non-owners.
    pub async fn get(&self, ctx: &RequestContext, listing_id: Uuid) -> AppResult<ListingView> {
        let detail = self
            .listing_repo
            .find_detail(listing_id)
            .await?
            .filter(|d| can_view(&d.listing, ctx))
            .ok_or_else(|| AppError::not_found("Listing not found"))?;

        let mut view = ListingView::from_detail(detail, ctx);
        if !view.is_owner {
            self.listing_repo.increment_views(listing_id).await?;
            view.view_count += 1;
        }
        Ok(view)
    }

    /// Change the publication status. Setting the current status is a no-op.
    pub async fn change_status(
        &self,
        ctx: &RequestContext,
        listing_id: Uuid,
        status: ListingStatus,
    ) -> AppResult<Listing> {
        let listing = self.find_live(listing_id).await?;
        if !listing.is_owned_by(ctx.user_id) {
            self.rbac
                .require_permission(&ctx.roles, SystemPermission::ListingStatusChange)?;
        }

        if listing.status == status {
            return Ok(listing);
        }

        let updated = self.listing_repo.set_status(listing_id, status).await?;
        info!(
            user_id = %ctx.user_id,
            listing_id = %listing_id,
            from = %listing.status,
            to = %status,
            "Listing status changed"
        );
        Ok(updated)
    }

    /// Soft-delete an owned listing. A reason is required.
    pub async fn soft_delete(
        &self,
        ctx: &RequestContext,
        listing_id: Uuid,
        reason: &str,
    ) -> AppResult<Listing> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::validation("Please provide a reason for deletion"));
        }

        let listing = self.find_live(listing_id).await?;
        if !listing.is_owned_by(ctx.user_id) {
            return Err(AppError::forbidden("You can only delete your own listings"));
        }

        let deleted = self.listing_repo.soft_delete(listing_id, reason).await?;
        info!(user_id = %ctx.user_id, listing_id = %listing_id, "Listing deleted by owner");
        Ok(deleted)
    }

    async fn upload(
        &self,
        user_id: Uuid,
        listing_id: Uuid,
        photos: &[Bytes],
    ) -> AppResult<Vec<String>> {
        let stored = self
            .images
            .store_listing_images(user_id, listing_id, photos)
            .await?;
        Ok(stored.into_iter().map(|s| s.url).collect())
    }

    async fn discard_photos(&self, listing_id: Uuid, urls: &[String]) {
        if let Err(e) = self.images.delete_by_urls(urls).await {
            warn!(listing_id = %listing_id, error = %e, "Failed to remove listing photos");
        }
    }

    /// Run the wizard gates and check the catalog references exist.
    async fn validate_draft(&self, draft: &ListingDraft) -> AppResult<ListingInput> {
        draft.check_steps()?;
        let input = draft.finalize(&self.limits)?;

        if self.catalog_repo.find_category(input.category_id).await?.is_none() {
            return Err(AppError::validation("Unknown category"));
        }
        if self
            .catalog_repo
            .find_condition(input.condition_id)
            .await?
            .is_none()
        {
            return Err(AppError::validation("Unknown condition"));
        }
        Ok(input)
    }

    /// A listing that exists and has not been deleted by its owner.
    async fn find_live(&self, listing_id: Uuid) -> AppResult<Listing> {
        self.listing_repo
            .find_by_id(listing_id)
            .await?
            .filter(|l| !l.deleted_by_user)
            .ok_or_else(|| AppError::not_found("Listing not found"))
    }
}
