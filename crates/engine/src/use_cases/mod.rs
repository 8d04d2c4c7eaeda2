//! Use cases - Content resolution services.
//!
//! Each service is constructed explicitly and shared by reference; the two
//! never call each other and are composed by the caller.

pub mod localization;
pub mod races;

pub use localization::ContentOverlay;
pub use races::RaceResolver;
