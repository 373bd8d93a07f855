//! Row models (`FromRow`) and input DTOs, one module per table.

pub mod booking;
pub mod class_session;
pub mod event;
pub mod instructor;
pub mod media_item;
pub mod pricing_package;
pub mod stats;
pub mod testimonial;
