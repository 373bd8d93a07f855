//! Gallery media classification: types, sources and categories.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Media types
// ---------------------------------------------------------------------------

pub const MEDIA_TYPE_IMAGE: &str = "image";
pub const MEDIA_TYPE_VIDEO: &str = "video";

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Uploaded by studio staff.
pub const SOURCE_UPLOAD: &str = "upload";
/// Ingested from the studio's Instagram account.
pub const SOURCE_INSTAGRAM: &str = "instagram";

pub const VALID_SOURCES: &[&str] = &[SOURCE_UPLOAD, SOURCE_INSTAGRAM];

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub const CATEGORY_CLASSES: &str = "classes";
pub const CATEGORY_PERFORMANCES: &str = "performances";
pub const CATEGORY_EVENTS: &str = "events";
pub const CATEGORY_STUDIO: &str = "studio";
pub const CATEGORY_SOCIAL: &str = "social";

pub const VALID_CATEGORIES: &[&str] = &[
    CATEGORY_CLASSES,
    CATEGORY_PERFORMANCES,
    CATEGORY_EVENTS,
    CATEGORY_STUDIO,
    CATEGORY_SOCIAL,
];

/// Hashtags checked in order; first match wins.
const HASHTAG_CATEGORIES: &[(&str, &str)] = &[
    ("#performance", CATEGORY_PERFORMANCES),
    ("#showcase", CATEGORY_PERFORMANCES),
    ("#event", CATEGORY_EVENTS),
    ("#festival", CATEGORY_EVENTS),
    ("#social", CATEGORY_SOCIAL),
    ("#class", CATEGORY_CLASSES),
    ("#workshop", CATEGORY_CLASSES),
    ("#studio", CATEGORY_STUDIO),
];

/// Validate a `?category=` filter value.
pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if VALID_CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid category '{category}'. Must be one of: {VALID_CATEGORIES:?}"
        )))
    }
}

/// Validate a `?source=` filter value.
pub fn validate_source(source: &str) -> Result<(), CoreError> {
    if VALID_SOURCES.contains(&source) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid source '{source}'. Must be one of: {VALID_SOURCES:?}"
        )))
    }
}

/// Pick a gallery category from the hashtags in an Instagram caption.
///
/// Matching is case-insensitive and on hashtag prefixes, so `#performances`
/// and `#PerformanceNight` both count. Defaults to `social`.
pub fn infer_category(caption: Option<&str>) -> &'static str {
    let Some(caption) = caption else {
        return CATEGORY_SOCIAL;
    };
    let lowered = caption.to_lowercase();
    let tags: Vec<&str> = lowered
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| w.starts_with('#'))
        .collect();

    HASHTAG_CATEGORIES
        .iter()
        .find(|(tag, _)| tags.iter().any(|t| t.starts_with(tag)))
        .map(|(_, category)| *category)
        .unwrap_or(CATEGORY_SOCIAL)
}

/// Map an Instagram Graph API `media_type` to a gallery media type.
pub fn media_type_from_instagram(media_type: &str) -> &'static str {
    match media_type.to_ascii_uppercase().as_str() {
        "VIDEO" | "REELS" => MEDIA_TYPE_VIDEO,
        _ => MEDIA_TYPE_IMAGE,
    }
}

/// Derive a short gallery title from a caption: the first line, without
/// hashtags, truncated to `max_chars`.
pub fn title_from_caption(caption: Option<&str>, max_chars: usize) -> String {
    let first_line = caption.and_then(|c| c.lines().find(|l| !l.trim().is_empty()));
    let words: Vec<&str> = first_line
        .unwrap_or_default()
        .split_whitespace()
        .filter(|w| !w.starts_with('#'))
        .collect();
    let title = words.join(" ");

    if title.is_empty() {
        return "Instagram post".to_string();
    }
    if title.chars().count() <= max_chars {
        return title;
    }
    let truncated: String = title.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", truncated.trim_end())
}
