//! Route definitions for the TradePost HTTP API.
//!
//! All API routes are organized by domain and mounted under `/api`; stored
//! photos are served from `/media`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes, the body limit and request logging.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_bytes as usize;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(profile_routes())
        .merge(catalog_routes())
        .merge(listing_routes())
        .merge(message_routes())
        .merge(dashboard_routes())
        .merge(admin_routes());

    Router::new()
        .nest("/api", api_routes)
        .route("/media/{bucket}/{*path}", get(handlers::media::serve_image))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Version and health endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/version", get(handlers::health::version))
        .route("/health", get(handlers::health::health))
}

/// Auth endpoints: register, login, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// Profile self-service
fn profile_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(handlers::profile::get_profile).put(handlers::profile::update_profile),
        )
        .route("/profile/password", put(handlers::profile::change_password))
}

/// Category and condition lookups
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/catalog/categories",
            get(handlers::catalog::list_categories),
        )
        .route(
            "/catalog/conditions",
            get(handlers::catalog::list_conditions),
        )
}

/// Listing CRUD, search and the wizard
fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/listings", post(handlers::listing::create_listing))
        .route("/listings/search", get(handlers::search::search_listings))
        .route(
            "/listings/wizard/validate",
            post(handlers::listing::validate_step),
        )
        .route(
            "/listings/{id}",
            get(handlers::listing::get_listing)
                .put(handlers::listing::update_listing)
                .delete(handlers::listing::delete_listing),
        )
        .route(
            "/listings/{id}/status",
            put(handlers::listing::change_status),
        )
}

/// Buyer/seller messages
fn message_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/messages",
            get(handlers::message::list_messages).post(handlers::message::send_message),
        )
        .route(
            "/messages/unread-count",
            get(handlers::message::unread_count),
        )
        .route("/messages/{id}/read", put(handlers::message::mark_read))
}

/// Seller dashboard
fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(handlers::dashboard::get_dashboard))
}

/// Admin and back office endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        // User management
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route(
            "/admin/users/{id}/roles/{role}",
            post(handlers::admin::users::toggle_role),
        )
        .route(
            "/admin/users/{id}/verification",
            put(handlers::admin::users::set_verification),
        )
        // Listing moderation
        .route(
            "/admin/listings",
            get(handlers::admin::listings::list_listings),
        )
        .route(
            "/admin/listings/{id}/disabled",
            put(handlers::admin::listings::set_disabled),
        )
        // Catalog
        .route(
            "/admin/categories",
            post(handlers::admin::catalog::create_category),
        )
        .route(
            "/admin/conditions",
            post(handlers::admin::catalog::create_condition),
        )
}
