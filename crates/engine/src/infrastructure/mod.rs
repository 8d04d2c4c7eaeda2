//! Infrastructure implementations.
//!
//! Contains the document port, its adapters, and the catalog importer.

pub mod content_dirs;
pub mod documents;
pub mod importers;
pub mod placeholders;
pub mod ports;
pub mod settings;
