//! Domain entities - Core content objects

mod content_types;
mod feature;
mod locale;
mod race;

// Content overlay types
pub use content_types::{
    ContentSource, SourceChain, SourceInfo, SourceType, PRIORITY_ADVENTURE, PRIORITY_BASE,
    PRIORITY_MOD,
};
pub use locale::{LocaleNode, LocalePayload};

// Race catalog types
pub use feature::{
    ChoiceSpec, FeatureDefinition, FeatureKind, FeatureTemplate, FeatureType, LanguageGrant,
    TraitEntry, WEAPON_PROFICIENCY_MARKERS,
};
pub use race::{AttributeBonuses, RaceCatalog, RaceDefinition, SubraceDefinition};
