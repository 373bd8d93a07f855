//! Outbound email for the Pasos backend.
//!
//! - [`EmailDelivery`] sends plain-text mail over SMTP (STARTTLS relay).
//! - [`alerts`] composes the staff alerts fired when a booking or a
//!   testimonial is submitted.
//!
//! Digest composition lives in `pasos_core::digest`; this crate only
//! delivers the result.

pub mod alerts;
pub mod email;

pub use email::{parse_recipients, EmailConfig, EmailDelivery, EmailError};
