//! `pasos-manage digest`: compose and email a studio activity digest.

use anyhow::{bail, Context};
use chrono::{DateTime, Duration, Utc};
use pasos_core::digest::{
    compose, excerpt, validate_days, ActivitySnapshot, BookingLine, DigestContent, DigestEmail,
    DigestKind, TestimonialLine, Totals,
};
use pasos_db::repositories::{BookingRepo, MediaItemRepo, TestimonialRepo};
use pasos_db::DbPool;
use pasos_notify::{parse_recipients, EmailConfig, EmailDelivery};

use crate::cli::DigestArgs;

const EXCERPT_CHARS: usize = 120;

pub async fn run(args: DigestArgs) -> anyhow::Result<()> {
    validate_days(args.days)?;

    let now = Utc::now();
    let content = match args.kind {
        DigestKind::Test => DigestContent::Test { sent_at: now },
        kind => {
            let pool = super::connect(args.database_url.as_deref()).await?;
            let since = now - Duration::days(kind.window_days(args.days));
            let weekly = kind == DigestKind::Weekly;
            let snapshot = build_snapshot(&pool, since, now, weekly)
                .await
                .context("Failed to gather digest data")?;
            if weekly {
                DigestContent::Weekly(snapshot)
            } else {
                DigestContent::Activity(snapshot)
            }
        }
    };

    if !should_send(&content, args.force) {
        tracing::info!(days = args.days, "No studio activity in window, digest skipped");
        return Ok(());
    }

    let email = compose(&content);
    let email_config = EmailConfig::from_env();
    let recipients = resolve_recipients(&args.to, email_config.as_ref());

    if args.test {
        print_dry_run(&recipients, &email);
        return Ok(());
    }

    let Some(email_config) = email_config else {
        bail!("SMTP is not configured: set SMTP_HOST (or use --test for a dry run)");
    };
    if recipients.is_empty() {
        bail!("No recipients: pass --to or set DIGEST_RECIPIENTS");
    }

    EmailDelivery::new(email_config)
        .send(&recipients, &email)
        .await
        .context("Failed to send digest")?;

    tracing::info!(
        kind = content.kind().as_str(),
        recipients = recipients.len(),
        subject = %email.subject,
        "Digest sent",
    );
    Ok(())
}

/// Activity digests with nothing to report are skipped unless forced.
pub fn should_send(content: &DigestContent, force: bool) -> bool {
    match content {
        DigestContent::Activity(s) => force || !s.is_empty(),
        _ => true,
    }
}

/// `--to` wins over `DIGEST_RECIPIENTS`. Each `--to` may itself be a list.
pub fn resolve_recipients(to: &[String], config: Option<&EmailConfig>) -> Vec<String> {
    if to.is_empty() {
        return config.map(|c| c.digest_recipients.clone()).unwrap_or_default();
    }
    to.iter().flat_map(|v| parse_recipients(v)).collect()
}

fn print_dry_run(recipients: &[String], email: &DigestEmail) {
    println!("To: {}", recipients.join(", "));
    println!("Subject: {}", email.subject);
    println!();
    println!("{}", email.body);
}

/// Gather everything a digest reports on for `[since, until)`.
pub async fn build_snapshot(
    pool: &DbPool,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
    with_totals: bool,
) -> Result<ActivitySnapshot, sqlx::Error> {
    let bookings = BookingRepo::list_created_between(pool, since, until)
        .await?
        .into_iter()
        .map(|b| BookingLine {
            name: b.name,
            email: b.email,
            class_type: b.class_type,
            preferred_date: b.preferred_date,
            created_at: b.created_at,
        })
        .collect();

    let testimonials = TestimonialRepo::list_created_between(pool, since, until)
        .await?
        .into_iter()
        .map(|t| TestimonialLine {
            excerpt: excerpt(&t.content, EXCERPT_CHARS),
            student_name: t.student_name,
            rating: t.rating,
            status: t.status,
        })
        .collect();

    let (new_media_instagram, new_media_upload) =
        MediaItemRepo::count_created_between(pool, since, until).await?;
    let booking_counts = BookingRepo::counts(pool).await?;
    let testimonial_counts = TestimonialRepo::counts(pool).await?;

    let totals = if with_totals {
        let media = MediaItemRepo::counts(pool).await?;
        let rating = TestimonialRepo::rating_summary(pool).await?;
        Some(Totals {
            bookings: booking_counts.total,
            approved_testimonials: testimonial_counts.approved,
            media_items: media.total,
            average_rating: rating.average_rating,
        })
    } else {
        None
    };

    Ok(ActivitySnapshot {
        since,
        until,
        bookings,
        testimonials,
        new_media_instagram,
        new_media_upload,
        pending_testimonials: testimonial_counts.pending,
        pending_bookings: booking_counts.pending,
        totals,
    })
}
