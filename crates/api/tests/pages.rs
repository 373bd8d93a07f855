//! Integration tests for the public content pages.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, NaiveTime, Utc};
use common::{body_json, get};
use pasos_core::instagram::GalleryItem;
use pasos_db::models::class_session::CreateClassSession;
use pasos_db::models::event::CreateEvent;
use pasos_db::models::instructor::CreateInstructor;
use pasos_db::models::pricing_package::CreatePricingPackage;
use pasos_db::repositories::{
    ClassSessionRepo, EventRepo, InstructorRepo, MediaItemRepo, PricingPackageRepo,
    TestimonialRepo,
};
use sqlx::PgPool;

fn event(slug: &str, starts_in_days: i64, is_published: bool) -> CreateEvent {
    CreateEvent {
        title: format!("Event {slug}"),
        slug: slug.to_string(),
        description: "An evening of social dancing.".to_string(),
        location: Some("Main hall".to_string()),
        starts_at: Utc::now() + Duration::days(starts_in_days),
        ends_at: None,
        price_cents: Some(1500),
        is_published,
    }
}

fn instagram_item(id: &str, category: &'static str) -> GalleryItem {
    GalleryItem {
        instagram_id: id.to_string(),
        title: format!("Post {id}"),
        caption: None,
        media_type: "image",
        media_url: format!("https://cdn.example.com/{id}.jpg"),
        thumbnail_url: None,
        permalink: None,
        category,
        posted_at: Some(Utc::now()),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn home_page_carries_assets_and_critical_css(pool: PgPool) {
    let id = common::create_testimonial(&pool, "Lucia", 4).await;
    TestimonialRepo::set_status(&pool, id, "approved", None).await.unwrap();
    TestimonialRepo::set_featured(&pool, id, true).await.unwrap();
    EventRepo::create(&pool, &event("spring-social", 7, true)).await.unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["page"], "home");
    assert_eq!(data["assets"]["scripts"][0], "/static/src/main.js");
    assert!(data["critical_css"].as_str().is_some_and(|css| !css.is_empty()));
    assert_eq!(data["featured_testimonials"][0]["student_name"], "Lucia");
    assert!(data["featured_testimonials"][0].get("email").is_none());
    assert_eq!(data["upcoming_events"][0]["slug"], "spring-social");
    assert_eq!(data["testimonial_stats"]["count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inner_pages_do_not_inline_critical_css(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/pricing/").await).await;
    assert_eq!(json["data"]["page"], "pricing");
    assert!(json["data"].get("critical_css").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn events_list_hides_past_unless_asked(pool: PgPool) {
    EventRepo::create(&pool, &event("next-week", 7, true)).await.unwrap();
    EventRepo::create(&pool, &event("last-month", -30, true)).await.unwrap();
    EventRepo::create(&pool, &event("draft", 3, false)).await.unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/events/").await).await;
    let slugs: Vec<&str> = json["data"]["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["next-week"]);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/events/?include_past=true").await).await;
    assert_eq!(json["data"]["events"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn events_already_started_are_not_upcoming(pool: PgPool) {
    let now = Utc::now();
    let running = CreateEvent {
        starts_at: now - Duration::hours(2),
        ends_at: Some(now + Duration::hours(2)),
        ..event("workshop-in-progress", 0, true)
    };
    EventRepo::create(&pool, &running).await.unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/events/").await).await;
    assert!(json["data"]["events"].as_array().unwrap().is_empty());

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/").await).await;
    assert!(json["data"]["upcoming_events"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn event_detail_by_slug(pool: PgPool) {
    EventRepo::create(&pool, &event("bachata-night", 5, true)).await.unwrap();
    EventRepo::create(&pool, &event("hidden", 5, false)).await.unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/events/bachata-night/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["page"], "event_detail");
    assert_eq!(json["data"]["event"]["title"], "Event bachata-night");

    for slug in ["hidden", "no-such-event"] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, &format!("/events/{slug}/")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{slug}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pricing_lists_active_packages_in_display_order(pool: PgPool) {
    for (name, order, price) in [("Drop-in", 2, 1800), ("Ten pack", 1, 15000)] {
        PricingPackageRepo::create(
            &pool,
            &CreatePricingPackage {
                name: name.to_string(),
                description: String::new(),
                price_cents: price,
                class_count: None,
                validity_days: None,
                is_featured: false,
                display_order: order,
            },
        )
        .await
        .unwrap();
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/pricing/").await).await;
    let packages = json["data"]["packages"].as_array().unwrap();
    assert_eq!(packages[0]["name"], "Ten pack");
    assert_eq!(packages[1]["name"], "Drop-in");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn schedule_groups_sessions_by_day(pool: PgPool) {
    let instructor_id = InstructorRepo::create(
        &pool,
        &CreateInstructor {
            name: "Marta".to_string(),
            slug: "marta".to_string(),
            bio: "Salsa on2 specialist.".to_string(),
            specialties: vec!["salsa".to_string()],
            display_order: 0,
        },
    )
    .await
    .unwrap();

    for (title, day, hour) in [("Salsa 2", 2, 20), ("Bachata 1", 0, 19), ("Salsa 1", 2, 18)] {
        ClassSessionRepo::create(
            &pool,
            &CreateClassSession {
                title: title.to_string(),
                style: "salsa".to_string(),
                level: "beginner".to_string(),
                instructor_id: Some(instructor_id),
                day_of_week: day,
                start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
                duration_minutes: 60,
                room: None,
            },
        )
        .await
        .unwrap();
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/schedule/").await).await;
    let days = json["data"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["day_name"], "Monday");
    assert_eq!(days[1]["day_name"], "Wednesday");
    assert_eq!(days[1]["sessions"][0]["title"], "Salsa 1");
    assert_eq!(days[1]["sessions"][1]["title"], "Salsa 2");
    assert_eq!(days[1]["sessions"][0]["instructor_name"], "Marta");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gallery_filters_and_validates(pool: PgPool) {
    MediaItemRepo::upsert_instagram(&pool, &instagram_item("1", "social")).await.unwrap();
    MediaItemRepo::upsert_instagram(&pool, &instagram_item("2", "performances")).await.unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/gallery/").await).await;
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(json["data"]["limit"], 24);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/gallery/?category=performances&source=instagram").await).await;
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["instagram_id"], "2");
    assert_eq!(json["data"]["category"], "performances");

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/gallery/?category=memes").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/gallery/?limit=5000").await).await;
    assert_eq!(json["data"]["limit"], 100);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn instructors_page_lists_active_instructors(pool: PgPool) {
    InstructorRepo::create(
        &pool,
        &CreateInstructor {
            name: "Diego".to_string(),
            slug: "diego".to_string(),
            bio: "Kizomba and urban kiz.".to_string(),
            specialties: vec!["kizomba".to_string()],
            display_order: 1,
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/instructors/").await).await;
    assert_eq!(json["data"]["page"], "instructors");
    assert_eq!(json["data"]["instructors"][0]["name"], "Diego");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn testimonials_page_shows_only_approved(pool: PgPool) {
    let approved = common::create_testimonial(&pool, "Approved", 5).await;
    common::create_testimonial(&pool, "Pending", 3).await;
    TestimonialRepo::set_status(&pool, approved, "approved", None).await.unwrap();

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/testimonials/").await).await;
    let list = json["data"]["testimonials"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["student_name"], "Approved");
    assert_eq!(json["data"]["stats"]["count"], 1);
    assert_eq!(json["data"]["stats"]["average_rating"], 5.0);
}
