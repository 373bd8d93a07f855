use axum::routing::post;
use axum::Router;

use crate::handlers::{bookings, testimonials};
use crate::state::AppState;

/// Public form endpoints (JSON or urlencoded bodies).
///
/// ```text
/// POST /testimonials/submit/   -> submit_testimonial
/// POST /booking/create/        -> create_booking
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/testimonials/submit/", post(testimonials::submit_testimonial))
        .route("/booking/create/", post(bookings::create_booking))
}
