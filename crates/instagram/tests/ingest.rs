use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use sqlx::PgPool;
use pasos_core::instagram::{InstagramMedia, MediaRef};
use pasos_db::repositories::MediaItemRepo;
use pasos_instagram::client::InstagramClient;
use pasos_instagram::config::InstagramConfig;
use pasos_instagram::ingest::{ingest_refs, sync_recent};

/// Serve `feed` as the account's `/me/media` page on a local port.
async fn serve_media_feed(feed: serde_json::Value) -> String {
    let app = Router::new().route(
        "/me/media",
        get(move || {
            let feed = feed.clone();
            async move { Json(feed) }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_for(graph_url: String) -> InstagramClient {
    InstagramClient::from_config(&InstagramConfig {
        access_token: Some("test-token".to_string()),
        graph_url,
        ..Default::default()
    })
    .unwrap()
}

fn inline(id: &str, url: Option<&str>, caption: &str) -> MediaRef {
    MediaRef::Inline(InstagramMedia {
        id: id.to_string(),
        caption: Some(caption.to_string()),
        media_type: "IMAGE".to_string(),
        media_url: url.map(str::to_string),
        thumbnail_url: None,
        permalink: None,
        timestamp: Some("2026-03-01T18:30:00+0000".to_string()),
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inline_media_is_upserted(pool: PgPool) {
    let refs = vec![
        inline("10", Some("https://cdn.example.com/10.jpg"), "Showcase #performance"),
        inline("11", None, "Audio reel"),
        MediaRef::Id("12".to_string()),
    ];
    let report = ingest_refs(&pool, None, refs).await;
    assert_eq!(report.received, 3);
    assert_eq!(report.ingested, 1);
    assert_eq!(report.skipped, 2);

    let item = MediaItemRepo::find_by_instagram_id(&pool, "10")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.category, "performances");
    assert_eq!(item.title, "Showcase");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_repeat_delivery_updates_in_place(pool: PgPool) {
    let first = ingest_refs(&pool, None, vec![inline("20", Some("https://cdn/a.jpg"), "a")]).await;
    let second = ingest_refs(&pool, None, vec![inline("20", Some("https://cdn/b.jpg"), "a")]).await;
    assert_eq!((first.inserted, second.updated), (1, 1));

    let counts = MediaItemRepo::counts(&pool).await.unwrap();
    assert_eq!(counts.instagram, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sync_skips_unstorable_media_and_continues(pool: PgPool) {
    let graph_url = serve_media_feed(json!({
        "data": [
            {
                "id": "30",
                "caption": "Broken\u{0000}caption",
                "media_type": "IMAGE",
                "media_url": "https://cdn.example.com/30.jpg"
            },
            {
                "id": "31",
                "caption": "Friday social #social",
                "media_type": "IMAGE",
                "media_url": "https://cdn.example.com/31.jpg"
            }
        ]
    }))
    .await;

    let report = sync_recent(&pool, &client_for(graph_url), 10).await.unwrap();
    assert_eq!(report.received, 2);
    assert_eq!((report.inserted, report.skipped), (1, 1));

    assert!(MediaItemRepo::find_by_instagram_id(&pool, "30").await.unwrap().is_none());
    let stored = MediaItemRepo::find_by_instagram_id(&pool, "31")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.category, "social");
}
