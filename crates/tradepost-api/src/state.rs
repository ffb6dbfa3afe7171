//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use tradepost_auth::jwt::{JwtDecoder, JwtEncoder};
use tradepost_auth::password::{PasswordHasher, PasswordValidator};
use tradepost_auth::rbac::RbacEnforcer;
use tradepost_core::config::AppConfig;
use tradepost_core::result::AppResult;
use tradepost_database::repositories::{
    CatalogRepository, ListingRepository, MessageRepository, ProfileRepository, RoleRepository,
    UserRepository,
};
use tradepost_entity::user::UserRole;
use tradepost_service::auth::RoleSource;
use tradepost_service::listing::WizardLimits;
use tradepost_service::{
    AdminService, AuthService, CatalogService, DashboardService, ListingService, MessageService,
    ProfileService, SearchService,
};
use tradepost_storage::{ImageStore, LocalStorageProvider};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// Listing photo bucket
    pub images: Arc<ImageStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder used by the `AuthUser` extractor
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Live role lookup; token claims are not trusted for authorization
    pub role_source: Arc<dyn RoleSource>,
    pub rbac_enforcer: Arc<RbacEnforcer>,

    // ── Services ─────────────────────────────────────────────
    pub auth_service: Arc<AuthService>,
    pub profile_service: Arc<ProfileService>,
    pub catalog_service: Arc<CatalogService>,
    pub listing_service: Arc<ListingService>,
    pub search_service: Arc<SearchService>,
    pub message_service: Arc<MessageService>,
    pub dashboard_service: Arc<DashboardService>,
    pub admin_service: Arc<AdminService>,
}

impl AppState {
    /// Wire repositories, auth primitives and services from configuration.
    ///
    /// Creates the storage root if it does not exist. The pool may be lazy;
    /// nothing here touches the database.
    pub async fn build(config: AppConfig, db_pool: PgPool) -> AppResult<Self> {
        let default_role: UserRole = config.auth.default_role.parse()?;

        // Repositories
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let profile_repo = Arc::new(ProfileRepository::new(db_pool.clone()));
        let role_repo = Arc::new(RoleRepository::new(db_pool.clone()));
        let catalog_repo = Arc::new(CatalogRepository::new(db_pool.clone()));
        let listing_repo = Arc::new(ListingRepository::new(db_pool.clone()));
        let message_repo = Arc::new(MessageRepository::new(db_pool.clone()));

        // Storage
        let provider = LocalStorageProvider::new(&config.storage.data_root).await?;
        let images = Arc::new(ImageStore::new(
            Arc::new(provider),
            config.storage.image_bucket.clone(),
            config.storage.public_base_url.clone(),
        ));

        // Auth
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let rbac_enforcer = Arc::new(RbacEnforcer::new());

        // Services
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repo),
            Arc::clone(&profile_repo),
            Arc::clone(&role_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&password_validator),
            jwt_encoder,
            Arc::clone(&jwt_decoder),
            default_role,
        ));
        let profile_service = Arc::new(ProfileService::new(
            Arc::clone(&user_repo),
            Arc::clone(&profile_repo),
            password_hasher,
            password_validator,
        ));
        let catalog_service = Arc::new(CatalogService::new(
            Arc::clone(&catalog_repo),
            Arc::clone(&rbac_enforcer),
        ));
        let listing_service = Arc::new(ListingService::new(
            Arc::clone(&listing_repo),
            Arc::clone(&catalog_repo),
            Arc::clone(&images),
            Arc::clone(&rbac_enforcer),
            WizardLimits::from(&config.marketplace),
        ));
        let search_service = Arc::new(SearchService::new(
            Arc::clone(&listing_repo),
            catalog_repo,
            config.marketplace.search_page_size,
        ));
        let message_service = Arc::new(MessageService::new(
            Arc::clone(&message_repo),
            Arc::clone(&listing_repo),
            config.marketplace.message_preview_length,
        ));
        let dashboard_service = Arc::new(DashboardService::new(
            Arc::clone(&listing_repo),
            message_repo,
        ));
        let role_source: Arc<dyn RoleSource> = role_repo.clone();
        let admin_service = Arc::new(AdminService::new(
            user_repo,
            profile_repo,
            role_repo,
            listing_repo,
            Arc::clone(&rbac_enforcer),
        ));

        Ok(Self {
            config: Arc::new(config),
            db_pool,
            images,
            jwt_decoder,
            role_source,
            rbac_enforcer,
            auth_service,
            profile_service,
            catalog_service,
            listing_service,
            search_service,
            message_service,
            dashboard_service,
            admin_service,
        })
    }
}
