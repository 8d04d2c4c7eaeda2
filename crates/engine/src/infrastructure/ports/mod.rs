//! Port traits for infrastructure boundaries.
//!
//! The engine reads every catalog and localization file through
//! [`DocumentStore`], so use cases can be exercised against in-memory
//! documents or mocks instead of the filesystem.

mod error;

use serde_json::Value;
use std::path::Path;

pub use error::DocumentError;

// =============================================================================
// Document Port
// =============================================================================

/// Source of structured documents (YAML or JSON), addressed by path.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentStore: Send + Sync {
    /// Read and parse a document.
    ///
    /// A missing document is `Ok(None)`. An empty document is
    /// `Ok(Some(Value::Null))`.
    fn read_document(&self, path: &Path) -> Result<Option<Value>, DocumentError>;
}
