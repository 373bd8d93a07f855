//! Staff alerts for new submissions.

use std::fmt::Write as _;

use pasos_core::booking::NewBooking;
use pasos_core::digest::{excerpt, DigestEmail, SUBJECT_PREFIX};
use pasos_core::testimonial::NewTestimonial;
use pasos_core::types::DbId;

/// Longest testimonial excerpt quoted in an alert.
const ALERT_EXCERPT_CHARS: usize = 280;

pub fn booking_alert(id: DbId, booking: &NewBooking) -> DigestEmail {
    let mut body = format!("A new booking request (#{id}) was submitted.\n\n");
    let _ = writeln!(body, "Name: {}", booking.name);
    let _ = writeln!(body, "Email: {}", booking.email);
    if let Some(phone) = &booking.phone {
        let _ = writeln!(body, "Phone: {phone}");
    }
    let _ = writeln!(body, "Class: {}", booking.class_type);
    if let Some(date) = booking.preferred_date {
        let _ = writeln!(body, "Preferred date: {}", date.format("%Y-%m-%d"));
    }
    if let Some(message) = &booking.message {
        let _ = write!(body, "\nMessage:\n{message}\n");
    }

    DigestEmail {
        subject: format!(
            "{SUBJECT_PREFIX} New booking: {} ({})",
            booking.name, booking.class_type
        ),
        body,
    }
}

pub fn testimonial_alert(id: DbId, testimonial: &NewTestimonial) -> DigestEmail {
    let mut body = format!("A new testimonial (#{id}) is awaiting moderation.\n\n");
    let _ = writeln!(body, "From: {}", testimonial.student_name);
    let _ = writeln!(body, "Rating: {}/5", testimonial.rating);
    if let Some(class_type) = &testimonial.class_type {
        let _ = writeln!(body, "Class: {class_type}");
    }
    let _ = write!(
        body,
        "\n\"{}\"\n",
        excerpt(&testimonial.content, ALERT_EXCERPT_CHARS)
    );

    DigestEmail {
        subject: format!(
            "{SUBJECT_PREFIX} New testimonial from {} ({}/5)",
            testimonial.student_name, testimonial.rating
        ),
        body,
    }
}
