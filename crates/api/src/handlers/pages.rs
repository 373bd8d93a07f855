//! Handlers for the public content pages.
//!
//! Every page is a JSON document in the `{ "data": ... }` envelope carrying
//! a `page` name, the resolved front-end `assets` for the main entry, and
//! the page content. The front end renders the markup.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use pasos_core::assets::EntryAssets;
use pasos_core::error::CoreError;
use pasos_core::media::{validate_category, validate_source};
use pasos_core::pagination::{
    clamp_limit, clamp_offset, DEFAULT_GALLERY_LIMIT, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
use pasos_core::schedule::{group_by_weekday, ScheduleDay};
use pasos_db::models::class_session::ClassSession;
use pasos_db::models::event::{Event, EventListParams};
use pasos_db::models::instructor::Instructor;
use pasos_db::models::media_item::{GalleryParams, MediaItem};
use pasos_db::models::pricing_package::PricingPackage;
use pasos_db::models::stats::RatingSummary;
use pasos_db::models::testimonial::PublicTestimonial;
use pasos_db::repositories::{
    ClassSessionRepo, EventRepo, InstructorRepo, MediaItemRepo, PricingPackageRepo,
    TestimonialRepo,
};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Front-end entry point every page loads.
pub const MAIN_ENTRY: &str = "src/main.js";

const HOME_TESTIMONIALS: i64 = 3;
const HOME_EVENTS: i64 = 3;
const HOME_MEDIA: i64 = 6;
const MAX_EVENTS: i64 = 100;

/// A page document.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub page: &'static str,
    pub assets: EntryAssets,
    /// Inlined above-the-fold CSS; only the landing page carries it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_css: Option<String>,
    #[serde(flatten)]
    pub content: T,
}

fn page<T: Serialize>(state: &AppState, name: &'static str, content: T) -> Json<DataResponse<Page<T>>> {
    Json(DataResponse {
        data: Page {
            page: name,
            assets: state.assets.entry_assets(MAIN_ENTRY),
            critical_css: None,
            content,
        },
    })
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HomeContent {
    pub featured_testimonials: Vec<PublicTestimonial>,
    pub upcoming_events: Vec<Event>,
    pub featured_media: Vec<MediaItem>,
    pub testimonial_stats: RatingSummary,
}

pub async fn home(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let featured_testimonials = TestimonialRepo::list_featured(&state.pool, HOME_TESTIMONIALS).await?;
    let upcoming_events = EventRepo::list_published(&state.pool, Some(Utc::now()), HOME_EVENTS).await?;
    let featured_media = MediaItemRepo::list_featured(&state.pool, HOME_MEDIA).await?;
    let testimonial_stats = TestimonialRepo::rating_summary(&state.pool).await?;

    let mut doc = page(
        &state,
        "home",
        HomeContent {
            featured_testimonials,
            upcoming_events,
            featured_media,
            testimonial_stats,
        },
    );
    doc.0.data.critical_css = Some(state.assets.critical_css());
    Ok(doc)
}

// ---------------------------------------------------------------------------
// GET /events/ and /events/{slug}/
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct EventsContent {
    pub events: Vec<Event>,
}

/// Upcoming events, soonest first. `?include_past=true` lists past ones too.
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<impl IntoResponse> {
    let from = (!params.include_past).then(Utc::now);
    let events = EventRepo::list_published(&state.pool, from, MAX_EVENTS).await?;
    Ok(page(&state, "events", EventsContent { events }))
}

#[derive(Debug, Serialize)]
pub struct EventContent {
    pub event: Event,
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let event = EventRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundByKey {
            entity: "Event",
            key: slug,
        }))?;
    Ok(page(&state, "event_detail", EventContent { event }))
}

// ---------------------------------------------------------------------------
// GET /pricing/
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PricingContent {
    pub packages: Vec<PricingPackage>,
}

pub async fn pricing(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let packages = PricingPackageRepo::list_active(&state.pool).await?;
    Ok(page(&state, "pricing", PricingContent { packages }))
}

// ---------------------------------------------------------------------------
// GET /schedule/
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ScheduleContent {
    pub days: Vec<ScheduleDay<ClassSession>>,
}

pub async fn schedule(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let sessions = ClassSessionRepo::list_active(&state.pool).await?;
    let days = group_by_weekday(sessions, |s| s.day_of_week);
    Ok(page(&state, "schedule", ScheduleContent { days }))
}

// ---------------------------------------------------------------------------
// GET /gallery/
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct GalleryContent {
    pub items: Vec<MediaItem>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Published media with optional `category` / `source` filters.
pub async fn gallery(
    State(state): State<AppState>,
    Query(params): Query<GalleryParams>,
) -> AppResult<impl IntoResponse> {
    let category = params.category.filter(|c| !c.is_empty());
    let source = params.source.filter(|s| !s.is_empty());
    if let Some(ref c) = category {
        validate_category(c)?;
    }
    if let Some(ref s) = source {
        validate_source(s)?;
    }

    let limit = clamp_limit(params.limit, DEFAULT_GALLERY_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let items = MediaItemRepo::list_published(
        &state.pool,
        category.as_deref(),
        source.as_deref(),
        limit,
        offset,
    )
    .await?;

    Ok(page(
        &state,
        "gallery",
        GalleryContent {
            items,
            category,
            source,
            limit,
            offset,
        },
    ))
}

// ---------------------------------------------------------------------------
// GET /instructors/
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct InstructorsContent {
    pub instructors: Vec<Instructor>,
}

pub async fn instructors(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let instructors = InstructorRepo::list_active(&state.pool).await?;
    Ok(page(&state, "instructors", InstructorsContent { instructors }))
}

// ---------------------------------------------------------------------------
// GET /testimonials/
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TestimonialsContent {
    pub testimonials: Vec<PublicTestimonial>,
    pub stats: RatingSummary,
    pub limit: i64,
    pub offset: i64,
}

/// Approved testimonials, newest first.
pub async fn testimonials(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);
    let testimonials = TestimonialRepo::list_approved(&state.pool, limit, offset).await?;
    let stats = TestimonialRepo::rating_summary(&state.pool).await?;
    Ok(page(
        &state,
        "testimonials",
        TestimonialsContent {
            testimonials,
            stats,
            limit,
            offset,
        },
    ))
}
