/// Default Graph API base URL.
const DEFAULT_GRAPH_URL: &str = "https://graph.instagram.com";

/// Instagram credentials and webhook secrets.
///
/// Every field is optional: without an access token the client cannot fetch
/// media, without an app secret webhook deliveries are rejected, and without
/// a verify token the subscription handshake always fails.
#[derive(Debug, Clone, Default)]
pub struct InstagramConfig {
    pub access_token: Option<String>,
    /// Instagram business account id used for `/{user_id}/media`.
    pub user_id: Option<String>,
    /// Meta app secret used to sign webhook payloads.
    pub app_secret: Option<String>,
    /// Token echoed during the webhook subscription handshake.
    pub verify_token: Option<String>,
    pub graph_url: String,
}

impl InstagramConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                  | Default                       |
    /// |---------------------------|-------------------------------|
    /// | `INSTAGRAM_ACCESS_TOKEN`  |                               |
    /// | `INSTAGRAM_USER_ID`       | `me`                          |
    /// | `INSTAGRAM_APP_SECRET`    |                               |
    /// | `INSTAGRAM_VERIFY_TOKEN`  |                               |
    /// | `INSTAGRAM_GRAPH_URL`     | `https://graph.instagram.com` |
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            access_token: var("INSTAGRAM_ACCESS_TOKEN"),
            user_id: var("INSTAGRAM_USER_ID"),
            app_secret: var("INSTAGRAM_APP_SECRET"),
            verify_token: var("INSTAGRAM_VERIFY_TOKEN"),
            graph_url: var("INSTAGRAM_GRAPH_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GRAPH_URL.to_string()),
        }
    }
}
