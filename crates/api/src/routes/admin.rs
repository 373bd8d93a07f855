//! Moderation routes. Mounted at `/api/v1/admin` by `api_routes()`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{bookings, testimonials};
use crate::state::AppState;

/// ```text
/// GET    /testimonials                 -> list_testimonials
/// POST   /testimonials/{id}/approve    -> approve_testimonial
/// POST   /testimonials/{id}/reject     -> reject_testimonial
/// PUT    /testimonials/{id}/featured   -> set_featured
/// GET    /bookings                     -> list_bookings
/// PUT    /bookings/{id}/status         -> update_booking_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/testimonials", get(testimonials::list_testimonials))
        .route(
            "/testimonials/{id}/approve",
            post(testimonials::approve_testimonial),
        )
        .route(
            "/testimonials/{id}/reject",
            post(testimonials::reject_testimonial),
        )
        .route("/testimonials/{id}/featured", put(testimonials::set_featured))
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings/{id}/status", put(bookings::update_booking_status))
}
