pub mod admin;
pub mod health;
pub mod pages;
pub mod static_files;
pub mod submissions;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /admin/testimonials                       list (?status=&limit=&offset=)
/// /admin/testimonials/{id}/approve          approve (POST)
/// /admin/testimonials/{id}/reject           reject (POST)
/// /admin/testimonials/{id}/featured         set featured flag (PUT)
///
/// /admin/bookings                           list (?status=&limit=&offset=)
/// /admin/bookings/{id}/status               update status (PUT)
/// ```
///
/// Every route requires `Authorization: Bearer <ADMIN_API_TOKEN>`.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/admin", admin::router())
}

/// Public site routes: pages, form submissions and the Instagram webhook.
pub fn site_routes() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .merge(submissions::router())
        .nest("/webhooks", webhooks::router())
}
