//! Integration tests for the public testimonial and booking forms.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{Duration, Utc};
use common::{body_json, post_form, post_json};
use pasos_db::repositories::{BookingRepo, TestimonialRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Testimonials
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn testimonial_json_submission_is_stored_pending(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = json!({
        "student_name": "  Rosa  ",
        "email": "Rosa@Example.com",
        "rating": 5,
        "class_type": "Bachata",
        "content": "Best bachata class in town, hands down.",
    });

    let response = post_json(app, "/testimonials/submit/", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["student_name"], "Rosa");
    assert_eq!(json["data"]["email"], "rosa@example.com");
    assert_eq!(json["data"]["class_type"], "bachata");
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["is_featured"], false);

    let counts = TestimonialRepo::counts(&pool).await.unwrap();
    assert_eq!(counts.pending, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn testimonial_form_submission_is_accepted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = "student_name=Tom&rating=4&content=Friendly+teachers+and+great+music";

    let response = post_form(app, "/testimonials/submit/", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["rating"], 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn testimonial_validation_failures(pool: PgPool) {
    let cases = [
        json!({ "student_name": "A", "content": "Long enough content here." }),
        json!({ "student_name": "A", "rating": 6, "content": "Long enough content here." }),
        json!({ "student_name": "A", "rating": 5, "content": "short" }),
        json!({ "student_name": " ", "rating": 5, "content": "Long enough content here." }),
        json!({ "student_name": "A", "rating": 5, "content": "Long enough content here.", "email": "nope" }),
        json!({ "student_name": "A", "rating": 5, "content": "Long enough content here.", "class_type": "ballet" }),
    ];

    for body in cases {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/testimonials/submit/", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR", "{body}");
    }

    assert_eq!(TestimonialRepo::counts(&pool).await.unwrap().pending, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn testimonial_honeypot_is_accepted_but_dropped(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let mut body = common::testimonial_json("Bot", 5);
    body["website"] = json!("http://spam.example.com");

    let response = post_json(app, "/testimonials/submit/", body).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(body_json(response).await["data"]["received"], true);

    assert_eq!(TestimonialRepo::counts(&pool).await.unwrap().pending, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_and_unsupported_bodies_are_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/testimonials/submit/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = common::send(app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/booking/create/")
        .header("content-type", "text/plain")
        .body(Body::from("hello"))
        .unwrap();
    let response = common::send(app, request).await;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_is_created_pending(pool: PgPool) {
    let preferred = (Utc::now() + Duration::days(3)).date_naive().format("%Y-%m-%d").to_string();
    let app = common::build_test_app(pool.clone());
    let body = json!({
        "name": "Carlos",
        "email": "CARLOS@example.com",
        "phone": "+34 600 123 456",
        "class_type": "salsa",
        "preferred_date": preferred,
        "message": "Complete beginner, is that ok?",
    });

    let response = post_json(app, "/booking/create/", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "carlos@example.com");
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["preferred_date"], preferred);

    let stored = BookingRepo::find_by_id(&pool, json["data"]["id"].as_i64().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.class_type, "salsa");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_form_post_works_without_optional_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_form(
        app,
        "/booking/create/",
        "name=Ines&email=ines%40example.com&class_type=kizomba",
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["preferred_date"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_validation_failures(pool: PgPool) {
    let yesterday = (Utc::now() - Duration::days(1)).date_naive().format("%Y-%m-%d").to_string();
    let cases = [
        json!({ "email": "a@example.com", "class_type": "salsa" }),
        json!({ "name": "A", "class_type": "salsa" }),
        json!({ "name": "A", "email": "a@example.com" }),
        json!({ "name": "A", "email": "a@example.com", "class_type": "tango" }),
        json!({ "name": "A", "email": "a@example.com", "class_type": "salsa", "preferred_date": yesterday }),
        json!({ "name": "A", "email": "a@example.com", "class_type": "salsa", "preferred_date": "next friday" }),
        json!({ "name": "A", "email": "a@example.com", "class_type": "salsa", "phone": "12" }),
    ];

    for body in cases {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/booking/create/", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
    }

    assert_eq!(BookingRepo::counts(&pool).await.unwrap().total, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_honeypot_is_accepted_but_dropped(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = json!({
        "name": "Bot",
        "email": "bot@example.com",
        "class_type": "salsa",
        "website": "buy-now.example",
    });

    let response = post_json(app, "/booking/create/", body).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(BookingRepo::counts(&pool).await.unwrap().total, 0);
}
