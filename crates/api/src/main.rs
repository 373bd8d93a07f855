use std::net::SocketAddr;

use pasos_api::config::ServerConfig;
use pasos_api::router::build_app_router;
use pasos_api::state::AppState;
use pasos_api::telemetry::init_tracing;
use pasos_core::assets::{AssetConfig, AssetResolver};
use pasos_instagram::InstagramConfig;
use pasos_notify::{EmailConfig, EmailDelivery};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    init_tracing("pasos_api=debug,tower_http=debug");

    let config = ServerConfig::from_env();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = pasos_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    pasos_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    pasos_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let assets = AssetResolver::load(AssetConfig::from_env());

    let mailer = EmailConfig::from_env().map(EmailDelivery::new);
    if mailer.is_none() {
        tracing::warn!("SMTP_HOST not set, submission alerts are disabled");
    }

    let instagram = InstagramConfig::from_env();
    if instagram.app_secret.is_none() {
        tracing::warn!("INSTAGRAM_APP_SECRET not set, webhook deliveries will be rejected");
    }

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be a valid IP address"),
        config.port,
    );
    let state = AppState::new(pool, config.clone(), assets, mailer, instagram);
    let app = build_app_router(state, &config);

    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped");
}

/// Wait for SIGINT or SIGTERM (on Unix) to start a graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
