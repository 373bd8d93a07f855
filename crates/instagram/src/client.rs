//! REST client for the Instagram Graph API.
//!
//! Only the two read endpoints the gallery needs are wrapped: a single media
//! object and the account's media feed.

use serde::Deserialize;
use pasos_core::instagram::{InstagramMedia, MEDIA_FIELDS};

use crate::config::InstagramConfig;

/// Largest page the Graph API serves for `/{user_id}/media`.
const MAX_PAGE_SIZE: usize = 100;

/// HTTP client for the Graph API, bound to one access token.
pub struct InstagramClient {
    client: reqwest::Client,
    graph_url: String,
    access_token: String,
    user_id: String,
}

/// Errors from the Graph API layer.
#[derive(Debug, thiserror::Error)]
pub enum InstagramError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The Graph API returned a non-2xx status code.
    #[error("Instagram API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    #[error("Instagram access token is not configured")]
    NotConfigured,
}

/// One page of `/{user_id}/media`.
#[derive(Debug, Deserialize)]
struct MediaPage {
    #[serde(default)]
    data: Vec<InstagramMedia>,
    paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
struct Paging {
    next: Option<String>,
}

impl InstagramClient {
    /// Build a client from configuration. Fails when no access token is set.
    pub fn from_config(config: &InstagramConfig) -> Result<Self, InstagramError> {
        let access_token = config
            .access_token
            .clone()
            .ok_or(InstagramError::NotConfigured)?;
        Ok(Self {
            client: reqwest::Client::new(),
            graph_url: config.graph_url.clone(),
            access_token,
            user_id: config.user_id.clone().unwrap_or_else(|| "me".to_string()),
        })
    }

    /// Fetch a single media object by id.
    pub async fn fetch_media(&self, media_id: &str) -> Result<InstagramMedia, InstagramError> {
        let response = self
            .client
            .get(self.media_url(media_id))
            .query(&[("fields", MEDIA_FIELDS), ("access_token", self.access_token.as_str())])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch up to `limit` of the account's most recent media, following
    /// pagination as needed.
    pub async fn recent_media(&self, limit: usize) -> Result<Vec<InstagramMedia>, InstagramError> {
        let mut media = Vec::new();
        let page_size = limit.clamp(1, MAX_PAGE_SIZE).to_string();

        let first = self
            .client
            .get(self.feed_url())
            .query(&[
                ("fields", MEDIA_FIELDS),
                ("limit", page_size.as_str()),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await?;
        let mut page: MediaPage = Self::parse_response(first).await?;

        loop {
            media.extend(page.data);
            if media.len() >= limit {
                media.truncate(limit);
                break;
            }
            // `next` already carries the token and cursor.
            let Some(next) = page.paging.and_then(|p| p.next) else {
                break;
            };
            tracing::debug!(fetched = media.len(), "Following Instagram media cursor");
            let response = self.client.get(next).send().await?;
            page = Self::parse_response(response).await?;
        }

        Ok(media)
    }

    fn media_url(&self, media_id: &str) -> String {
        format!("{}/{}", self.graph_url, media_id)
    }

    fn feed_url(&self) -> String {
        format!("{}/{}/media", self.graph_url, self.user_id)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, or return an
    /// [`InstagramError::ApiError`] carrying the status and body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, InstagramError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(InstagramError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, InstagramError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
