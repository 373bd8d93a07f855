//! Instagram webhook payloads and media normalisation.
//!
//! The webhook delivers change notifications; each `media` change names a
//! media object, sometimes with its fields inline. [`InstagramMedia`] is the
//! Graph API media shape shared by the webhook and the API client, and
//! [`InstagramMedia::into_gallery_item`] turns it into a gallery record.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::media::{infer_category, media_type_from_instagram, title_from_caption};
use crate::signature::secrets_match;

/// Webhook `object` value for Instagram subscriptions.
pub const OBJECT_INSTAGRAM: &str = "instagram";

/// Change field that carries new or updated media.
pub const FIELD_MEDIA: &str = "media";

/// Maximum length of a gallery title derived from a caption.
pub const MAX_TITLE_LENGTH: usize = 80;

// ---------------------------------------------------------------------------
// Verification handshake
// ---------------------------------------------------------------------------

/// Query parameters sent by Meta when registering the webhook.
#[derive(Debug, Deserialize)]
pub struct VerificationQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

impl VerificationQuery {
    /// Return the challenge to echo back when the handshake is valid.
    pub fn accept(&self, expected_token: &str) -> Option<&str> {
        let subscribing = self.mode.as_deref() == Some("subscribe");
        let token_ok = self.verify_token.as_deref().is_some_and(|t| {
            !expected_token.is_empty() && secrets_match(t, expected_token)
        });
        if subscribing && token_ok {
            self.challenge.as_deref()
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Webhook payload
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    pub object: String,
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEntry {
    /// Instagram account id the change belongs to.
    pub id: Option<String>,
    pub time: Option<i64>,
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookChange {
    pub field: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// A media object named by a webhook change.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaRef {
    /// The change carried enough fields to ingest directly.
    Inline(InstagramMedia),
    /// Only an id; fields must be fetched from the Graph API.
    Id(String),
}

impl MediaRef {
    pub fn media_id(&self) -> &str {
        match self {
            MediaRef::Inline(media) => &media.id,
            MediaRef::Id(id) => id,
        }
    }
}

impl WebhookPayload {
    /// Collect the media references from all `media` changes.
    ///
    /// Non-Instagram objects and other change fields yield nothing. Changes
    /// without a usable id are dropped with a debug log.
    pub fn media_refs(&self) -> Vec<MediaRef> {
        if self.object != OBJECT_INSTAGRAM {
            return Vec::new();
        }
        self.entry
            .iter()
            .flat_map(|entry| entry.changes.iter())
            .filter(|change| change.field == FIELD_MEDIA)
            .filter_map(|change| {
                let media_ref = media_ref_from_value(&change.value);
                if media_ref.is_none() {
                    tracing::debug!(value = %change.value, "Media change without id, skipping");
                }
                media_ref
            })
            .collect()
    }
}

fn media_ref_from_value(value: &serde_json::Value) -> Option<MediaRef> {
    let id = value
        .get("media_id")
        .or_else(|| value.get("id"))
        .and_then(|v| match v {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|id| !id.is_empty())?;

    if value.get("media_url").and_then(|v| v.as_str()).is_none() {
        return Some(MediaRef::Id(id));
    }

    // Numeric ids would not deserialize into `String`; normalise first.
    let mut inline = value.clone();
    inline["id"] = serde_json::Value::String(id.clone());
    match serde_json::from_value::<InstagramMedia>(inline) {
        Ok(media) => Some(MediaRef::Inline(media)),
        Err(e) => {
            tracing::debug!(media_id = %id, error = %e, "Inline media unparseable, will fetch");
            Some(MediaRef::Id(id))
        }
    }
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// Graph API media fields requested by the client.
pub const MEDIA_FIELDS: &str = "id,caption,media_type,media_url,thumbnail_url,permalink,timestamp";

/// Instagram media as returned by the Graph API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstagramMedia {
    #[serde(default)]
    pub id: String,
    pub caption: Option<String>,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    pub media_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub permalink: Option<String>,
    /// ISO-8601; Instagram uses `+0000` offsets.
    pub timestamp: Option<String>,
}

fn default_media_type() -> String {
    "IMAGE".to_string()
}

/// Gallery record derived from an Instagram media object.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryItem {
    pub instagram_id: String,
    pub title: String,
    pub caption: Option<String>,
    pub media_type: &'static str,
    pub media_url: String,
    pub thumbnail_url: Option<String>,
    pub permalink: Option<String>,
    pub category: &'static str,
    pub posted_at: Option<DateTime<Utc>>,
}

impl InstagramMedia {
    /// Normalise into a gallery record. `None` when there is no media URL
    /// (e.g. copyrighted audio reels the API refuses to expose).
    pub fn into_gallery_item(self) -> Option<GalleryItem> {
        let media_url = self.media_url.filter(|u| !u.is_empty())?;
        let caption = self.caption.filter(|c| !c.trim().is_empty());
        Some(GalleryItem {
            title: title_from_caption(caption.as_deref(), MAX_TITLE_LENGTH),
            category: infer_category(caption.as_deref()),
            media_type: media_type_from_instagram(&self.media_type),
            posted_at: self.timestamp.as_deref().and_then(parse_timestamp),
            instagram_id: self.id,
            caption,
            media_url,
            thumbnail_url: self.thumbnail_url,
            permalink: self.permalink,
        })
    }
}

/// Parse Instagram timestamps (`2026-03-01T18:30:00+0000`) and RFC 3339.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    fn payload(json: &str) -> WebhookPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn handshake_requires_subscribe_and_matching_token() {
        let q = VerificationQuery {
            mode: Some("subscribe".into()),
            verify_token: Some("tok".into()),
            challenge: Some("12345".into()),
        };
        assert_eq!(q.accept("tok"), Some("12345"));
        assert_eq!(q.accept("other"), None);
        assert_eq!(q.accept(""), None);

        let wrong_mode = VerificationQuery { mode: Some("unsubscribe".into()), ..q };
        assert_eq!(wrong_mode.accept("tok"), None);
    }

    #[test]
    fn media_changes_are_collected() {
        let p = payload(
            r#"{"object":"instagram","entry":[
                {"id":"1784","time":1700000000,"changes":[
                    {"field":"media","value":{"media_id":"111"}},
                    {"field":"comments","value":{"id":"c1","text":"nice"}},
                    {"field":"media","value":{"id":222}}
                ]}
            ]}"#,
        );
        let refs = p.media_refs();
        assert_eq!(refs, vec![MediaRef::Id("111".into()), MediaRef::Id("222".into())]);
    }

    #[test]
    fn inline_media_is_used_directly() {
        let p = payload(
            r#"{"object":"instagram","entry":[{"changes":[
                {"field":"media","value":{"id":"9","media_type":"VIDEO",
                 "media_url":"https://cdn/v.mp4","caption":"Show #performance"}}
            ]}]}"#,
        );
        let refs = p.media_refs();
        assert_eq!(refs.len(), 1);
        assert_matches!(&refs[0], MediaRef::Inline(m) if m.id == "9" && m.media_type == "VIDEO");
    }

    #[test]
    fn other_objects_and_missing_ids_yield_nothing() {
        assert!(payload(r#"{"object":"page","entry":[{"changes":[{"field":"media","value":{"id":"1"}}]}]}"#)
            .media_refs()
            .is_empty());
        assert!(payload(r#"{"object":"instagram","entry":[{"changes":[{"field":"media","value":{}}]}]}"#)
            .media_refs()
            .is_empty());
        assert!(payload(r#"{"object":"instagram"}"#).media_refs().is_empty());
    }

    #[test]
    fn media_normalises_into_gallery_item() {
        let media = InstagramMedia {
            id: "42".into(),
            caption: Some("Salsa social tonight #social".into()),
            media_type: "IMAGE".into(),
            media_url: Some("https://cdn/p.jpg".into()),
            thumbnail_url: None,
            permalink: Some("https://instagram.com/p/abc".into()),
            timestamp: Some("2026-03-01T18:30:00+0000".into()),
        };
        let item = media.into_gallery_item().unwrap();
        assert_eq!(item.instagram_id, "42");
        assert_eq!(item.title, "Salsa social tonight");
        assert_eq!(item.category, "social");
        assert_eq!(item.media_type, "image");
        assert_eq!(
            item.posted_at,
            Some(Utc.with_ymd_and_hms(2026, 3, 1, 18, 30, 0).unwrap())
        );
    }

    #[test]
    fn media_without_url_is_skipped() {
        let media = InstagramMedia {
            id: "1".into(),
            caption: None,
            media_type: "VIDEO".into(),
            media_url: None,
            thumbnail_url: None,
            permalink: None,
            timestamp: None,
        };
        assert!(media.into_gallery_item().is_none());
    }

    #[test]
    fn timestamps() {
        assert!(parse_timestamp("2026-03-01T18:30:00Z").is_some());
        assert!(parse_timestamp("2026-03-01T18:30:00+0000").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
