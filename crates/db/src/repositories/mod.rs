//! Repositories: one zero-sized struct per table exposing async query
//! functions that take a `&PgPool`.

pub mod booking_repo;
pub mod class_session_repo;
pub mod event_repo;
pub mod instructor_repo;
pub mod media_item_repo;
pub mod pricing_package_repo;
pub mod testimonial_repo;

pub use booking_repo::BookingRepo;
pub use class_session_repo::ClassSessionRepo;
pub use event_repo::EventRepo;
pub use instructor_repo::InstructorRepo;
pub use media_item_repo::MediaItemRepo;
pub use pricing_package_repo::PricingPackageRepo;
pub use testimonial_repo::TestimonialRepo;
