//! Taleforge Engine library.
//!
//! Content-override resolution for the character generator.
//!
//! ## Structure
//!
//! - `use_cases/` - `ContentOverlay` (localized text) and `RaceResolver`
//!   (race catalog)
//! - `infrastructure/` - Document port, adapters, catalog importer, settings

pub mod infrastructure;
pub mod use_cases;

/// Canned documents for unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use infrastructure::settings::EngineConfig;
pub use use_cases::localization::ContentOverlay;
pub use use_cases::races::RaceResolver;
