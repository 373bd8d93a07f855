use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Content pages. Paths keep their trailing slash.
///
/// ```text
/// GET /                  -> home
/// GET /events/           -> list_events (?include_past=)
/// GET /events/{slug}/    -> get_event
/// GET /pricing/          -> pricing
/// GET /schedule/         -> schedule
/// GET /gallery/          -> gallery (?category=&source=&limit=&offset=)
/// GET /instructors/      -> instructors
/// GET /testimonials/     -> testimonials (?limit=&offset=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/events/", get(pages::list_events))
        .route("/events/{slug}/", get(pages::get_event))
        .route("/pricing/", get(pages::pricing))
        .route("/schedule/", get(pages::schedule))
        .route("/gallery/", get(pages::gallery))
        .route("/instructors/", get(pages::instructors))
        .route("/testimonials/", get(pages::testimonials))
}
