use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use pasos_core::assets::AssetResolver;
use pasos_instagram::{InstagramClient, InstagramConfig};
use pasos_notify::EmailDelivery;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pasos_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Vite manifest resolver, loaded once at startup.
    pub assets: Arc<AssetResolver>,
    /// SMTP mailer; `None` when `SMTP_HOST` is unset.
    pub mailer: Option<Arc<EmailDelivery>>,
    pub instagram: Arc<InstagramConfig>,
    /// Graph API client; `None` without an access token.
    pub instagram_client: Option<Arc<InstagramClient>>,
    pub metrics: Arc<RequestMetrics>,
}

impl AppState {
    /// Assemble state, building the Graph API client when a token is set.
    pub fn new(
        pool: pasos_db::DbPool,
        config: ServerConfig,
        assets: AssetResolver,
        mailer: Option<EmailDelivery>,
        instagram: InstagramConfig,
    ) -> Self {
        let instagram_client = InstagramClient::from_config(&instagram).ok().map(Arc::new);
        if instagram_client.is_none() {
            tracing::info!("Instagram access token not set, webhook media will not be fetched");
        }
        Self {
            pool,
            config: Arc::new(config),
            assets: Arc::new(assets),
            mailer: mailer.map(Arc::new),
            instagram: Arc::new(instagram),
            instagram_client,
            metrics: Arc::new(RequestMetrics::new()),
        }
    }
}

/// Process-lifetime counters reported by `/api/metrics/`.
#[derive(Debug)]
pub struct RequestMetrics {
    started_at: Instant,
    requests_served: AtomicU64,
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            requests_served: AtomicU64::new(0),
        }
    }

    pub fn record_request(&self) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl Default for RequestMetrics {
    fn default() -> Self {
        Self::new()
    }
}
