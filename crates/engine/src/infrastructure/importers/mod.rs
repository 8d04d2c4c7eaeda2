//! Content importers.
//!
//! Loads the race catalog document and converts it to domain types.

mod catalog_types;
mod race_catalog;

pub use race_catalog::{
    unique_features, ImportError, RaceCatalogImporter, MISSING_DESCRIPTION, UNKNOWN_FEATURE_NAME,
};
