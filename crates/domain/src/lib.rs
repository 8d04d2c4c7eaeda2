//! Core domain types for the taleforge content engine.
//!
//! Holds the prioritized localization sources consumed by the content overlay
//! and the race catalog model consumed by the race resolver. Nothing in this
//! crate touches the filesystem.

pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{
    AttributeBonuses, ChoiceSpec, ContentSource, FeatureDefinition, FeatureKind, FeatureTemplate,
    FeatureType, LanguageGrant, LocaleNode, LocalePayload, RaceCatalog, RaceDefinition,
    SourceChain, SourceInfo, SourceType, SubraceDefinition, TraitEntry, PRIORITY_ADVENTURE,
    PRIORITY_BASE, PRIORITY_MOD, WEAPON_PROFICIENCY_MARKERS,
};
pub use error::DomainError;
pub use value_objects::Attribute;
