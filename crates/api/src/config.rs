use std::path::PathBuf;

use pasos_core::assets::parse_bool_env;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory holding `sw.js`, `offline.html` and the `/static` tree.
    pub static_dir: PathBuf,
    pub debug: bool,
    /// Bearer token for `/api/v1/admin`. Admin routes answer 403 when unset.
    pub admin_api_token: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `8000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `STATIC_DIR`           | `static`                |
    /// | `DEBUG`                | `false`                 |
    /// | `ADMIN_API_TOKEN`      | unset                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let static_dir = std::env::var("STATIC_DIR")
            .unwrap_or_else(|_| "static".into())
            .into();

        let admin_api_token = std::env::var("ADMIN_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            static_dir,
            debug: parse_bool_env("DEBUG"),
            admin_api_token,
        }
    }
}
