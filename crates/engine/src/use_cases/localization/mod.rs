//! Localization use cases.
//!
//! Resolves display text through the prioritized content overlay.

mod content_overlay;

pub use content_overlay::{ContentOverlay, Params};
