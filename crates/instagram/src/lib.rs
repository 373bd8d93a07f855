//! Instagram integration: Graph API client and gallery ingestion.
//!
//! The webhook handler and the `sync-instagram` command both funnel media
//! through [`ingest::ingest_refs`], which fetches missing fields, normalises
//! the media and upserts it into the gallery.

pub mod client;
pub mod config;
pub mod ingest;

pub use client::{InstagramClient, InstagramError};
pub use config::InstagramConfig;
pub use ingest::{IngestError, IngestReport};
