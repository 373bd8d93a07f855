//! Digest email composition.
//!
//! The management command gathers an [`ActivitySnapshot`] from the database,
//! wraps it in the [`DigestContent`] for the requested kind, and [`compose`]
//! turns that into a plain-text [`DigestEmail`]. Composition is pure so it
//! can be tested without SMTP or PostgreSQL.

use std::fmt::Write as _;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::CoreError;
use crate::types::Date;

/// Subject prefix for every studio email.
pub const SUBJECT_PREFIX: &str = "[Pasos]";

/// Default activity window in days.
pub const DEFAULT_DAYS: i64 = 1;

/// Window length for weekly summaries.
pub const WEEKLY_DAYS: i64 = 7;

/// Accepted range for `--days`.
pub const MAX_DAYS: i64 = 90;

/// Maximum list entries per section before "and N more".
const MAX_SECTION_ITEMS: usize = 20;

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestKind {
    /// Recent activity over `--days`.
    #[default]
    Activity,
    /// Fixed seven-day summary with totals.
    Weekly,
    /// Connectivity check; no data.
    Test,
}

impl DigestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestKind::Activity => "activity",
            DigestKind::Weekly => "weekly",
            DigestKind::Test => "test",
        }
    }

    /// Window length for this kind given the requested days.
    pub fn window_days(&self, requested: i64) -> i64 {
        match self {
            DigestKind::Weekly => WEEKLY_DAYS,
            _ => requested,
        }
    }
}

impl FromStr for DigestKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "activity" => Ok(DigestKind::Activity),
            "weekly" => Ok(DigestKind::Weekly),
            "test" => Ok(DigestKind::Test),
            other => Err(CoreError::Validation(format!(
                "Unknown digest type '{other}'. Must be one of: activity, weekly, test"
            ))),
        }
    }
}

/// Validate the `--days` argument.
pub fn validate_days(days: i64) -> Result<(), CoreError> {
    if (1..=MAX_DAYS).contains(&days) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "days must be between 1 and {MAX_DAYS} (got {days})"
        )))
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BookingLine {
    pub name: String,
    pub email: String,
    pub class_type: String,
    pub preferred_date: Option<Date>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestimonialLine {
    pub student_name: String,
    pub rating: i16,
    pub status: String,
    pub excerpt: String,
}

/// Everything a digest reports on, for `[since, until)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivitySnapshot {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
    pub bookings: Vec<BookingLine>,
    pub testimonials: Vec<TestimonialLine>,
    pub new_media_instagram: i64,
    pub new_media_upload: i64,
    pub pending_testimonials: i64,
    pub pending_bookings: i64,
    /// All-time totals, filled for weekly summaries.
    pub totals: Option<Totals>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub bookings: i64,
    pub approved_testimonials: i64,
    pub media_items: i64,
    pub average_rating: Option<f64>,
}

impl ActivitySnapshot {
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
            && self.testimonials.is_empty()
            && self.new_media_instagram == 0
            && self.new_media_upload == 0
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// A ready-to-send plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEmail {
    pub subject: String,
    pub body: String,
}

/// What a digest email reports: a snapshot for data digests, nothing for
/// the connectivity check.
#[derive(Debug, Clone, PartialEq)]
pub enum DigestContent {
    Activity(ActivitySnapshot),
    Weekly(ActivitySnapshot),
    Test { sent_at: DateTime<Utc> },
}

impl DigestContent {
    pub fn kind(&self) -> DigestKind {
        match self {
            DigestContent::Activity(_) => DigestKind::Activity,
            DigestContent::Weekly(_) => DigestKind::Weekly,
            DigestContent::Test { .. } => DigestKind::Test,
        }
    }
}

pub fn compose(content: &DigestContent) -> DigestEmail {
    match content {
        DigestContent::Activity(s) => compose_activity(s),
        DigestContent::Weekly(s) => compose_weekly(s),
        DigestContent::Test { sent_at } => compose_test(*sent_at),
    }
}

fn compose_test(now: DateTime<Utc>) -> DigestEmail {
    DigestEmail {
        subject: format!("{SUBJECT_PREFIX} Test email"),
        body: format!(
            "This is a test email from the Pasos studio site.\n\
             If you received it, digest delivery is configured correctly.\n\n\
             Sent at {}\n",
            now.format("%Y-%m-%d %H:%M UTC")
        ),
    }
}

fn compose_activity(s: &ActivitySnapshot) -> DigestEmail {
    let subject = format!(
        "{SUBJECT_PREFIX} Activity digest: {} new {}, {} new {}",
        s.bookings.len(),
        plural(s.bookings.len(), "booking", "bookings"),
        s.testimonials.len(),
        plural(s.testimonials.len(), "testimonial", "testimonials"),
    );

    let mut body = format!(
        "Studio activity from {} to {}\n\n",
        s.since.format("%Y-%m-%d %H:%M"),
        s.until.format("%Y-%m-%d %H:%M UTC"),
    );
    write_sections(&mut body, s);
    DigestEmail { subject, body }
}

fn compose_weekly(s: &ActivitySnapshot) -> DigestEmail {
    let subject = format!(
        "{SUBJECT_PREFIX} Weekly summary ({} to {})",
        s.since.format("%Y-%m-%d"),
        s.until.format("%Y-%m-%d"),
    );

    let mut body = String::from("Weekly studio summary\n\n");
    write_sections(&mut body, s);

    if let Some(t) = s.totals {
        body.push_str("\nAll-time totals\n---------------\n");
        let _ = writeln!(body, "Bookings: {}", t.bookings);
        let _ = writeln!(body, "Approved testimonials: {}", t.approved_testimonials);
        let _ = writeln!(body, "Gallery items: {}", t.media_items);
        match t.average_rating {
            Some(avg) => {
                let _ = writeln!(body, "Average rating: {avg:.1} / 5");
            }
            None => body.push_str("Average rating: n/a\n"),
        }
    }
    DigestEmail { subject, body }
}

fn write_sections(body: &mut String, s: &ActivitySnapshot) {
    let _ = writeln!(body, "New bookings ({})", s.bookings.len());
    body.push_str("------------\n");
    if s.bookings.is_empty() {
        body.push_str("None.\n");
    }
    for b in s.bookings.iter().take(MAX_SECTION_ITEMS) {
        let date = b
            .preferred_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "no date".to_string());
        let _ = writeln!(body, "- {} <{}>: {} ({date})", b.name, b.email, b.class_type);
    }
    more_line(body, s.bookings.len());

    let _ = writeln!(body, "\nNew testimonials ({})", s.testimonials.len());
    body.push_str("----------------\n");
    if s.testimonials.is_empty() {
        body.push_str("None.\n");
    }
    for t in s.testimonials.iter().take(MAX_SECTION_ITEMS) {
        let _ = writeln!(
            body,
            "- {} ({}/5, {}): \"{}\"",
            t.student_name, t.rating, t.status, t.excerpt
        );
    }
    more_line(body, s.testimonials.len());

    body.push_str("\nGallery\n-------\n");
    let _ = writeln!(body, "New from Instagram: {}", s.new_media_instagram);
    let _ = writeln!(body, "New uploads: {}", s.new_media_upload);

    body.push_str("\nAwaiting action\n---------------\n");
    let _ = writeln!(body, "Pending testimonials: {}", s.pending_testimonials);
    let _ = writeln!(body, "Pending bookings: {}", s.pending_bookings);
}

fn more_line(body: &mut String, len: usize) {
    if len > MAX_SECTION_ITEMS {
        let _ = writeln!(body, "... and {} more", len - MAX_SECTION_ITEMS);
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// Shorten testimonial text to `max_chars`, cutting at a word boundary.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let cut = match cut.rfind(' ') {
        Some(idx) if idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };
    format!("{}...", cut.trim_end())
}
