//! Domain building blocks for the Pasos studio backend.
//!
//! Everything here is free of database and network I/O so the API server,
//! the management CLI and the tests can share it. File reads (Vite manifest,
//! critical CSS) are the only side effects.

pub mod assets;
pub mod booking;
pub mod digest;
pub mod error;
pub mod instagram;
pub mod media;
pub mod pagination;
pub mod schedule;
pub mod signature;
pub mod testimonial;
pub mod types;
pub mod validation;
