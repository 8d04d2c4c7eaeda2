//! Racial features and feature templates.
//!
//! A feature is one discrete thing a race or subrace grants: a passive trait,
//! a set of proficiencies, innate spells, languages, or a choice the player
//! makes at creation time. The payload is determined by [`FeatureKind`], so
//! fields that make no sense for a type simply do not exist on it.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Display-name markers identifying weapon proficiencies in catalog data.
///
/// Matched case-insensitively as substrings of the feature name.
pub const WEAPON_PROFICIENCY_MARKERS: [&str; 2] = ["weapon proficiency", "владение оружием"];

/// Closed set of feature types understood by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Trait,
    /// Composite trait bundling several named entries
    Traits,
    Proficiency,
    Spell,
    Language,
    AbilityChoice,
    SkillChoice,
    FeatChoice,
}

impl FeatureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::Trait => "trait",
            FeatureType::Traits => "traits",
            FeatureType::Proficiency => "proficiency",
            FeatureType::Spell => "spell",
            FeatureType::Language => "language",
            FeatureType::AbilityChoice => "ability_choice",
            FeatureType::SkillChoice => "skill_choice",
            FeatureType::FeatChoice => "feat_choice",
        }
    }

    /// Whether the type asks the player to pick something.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FeatureType::AbilityChoice | FeatureType::SkillChoice | FeatureType::FeatChoice
        )
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeatureType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trait" => Ok(FeatureType::Trait),
            "traits" => Ok(FeatureType::Traits),
            "proficiency" => Ok(FeatureType::Proficiency),
            "spell" => Ok(FeatureType::Spell),
            "language" => Ok(FeatureType::Language),
            "ability_choice" => Ok(FeatureType::AbilityChoice),
            "skill_choice" => Ok(FeatureType::SkillChoice),
            "feat_choice" => Ok(FeatureType::FeatChoice),
            _ => Err(DomainError::parse(format!("Unknown feature type: {}", s))),
        }
    }
}

/// One named entry of a composite `traits` feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraitEntry {
    pub name: String,
    pub description: String,
}

/// Fixed languages plus a number of free picks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageGrant {
    pub base: Vec<String>,
    pub choice: u32,
}

impl LanguageGrant {
    /// Whether the grant includes an open-ended pick.
    pub fn has_choice(&self) -> bool {
        self.choice > 0
    }
}

/// Parameters of a creation-time choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChoiceSpec {
    pub max_choices: u32,
    pub bonus_value: i32,
    /// Allowed picks. Empty means unrestricted.
    pub options: Vec<String>,
}

/// Type-specific payload of a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatureKind {
    Trait,
    Traits {
        traits: Vec<TraitEntry>,
    },
    Proficiency {
        weapons: Vec<String>,
        skills: Vec<String>,
    },
    Spell {
        spells: Vec<String>,
    },
    Language {
        languages: LanguageGrant,
    },
    AbilityChoice(ChoiceSpec),
    SkillChoice(ChoiceSpec),
    FeatChoice(ChoiceSpec),
}

impl FeatureKind {
    pub fn feature_type(&self) -> FeatureType {
        match self {
            FeatureKind::Trait => FeatureType::Trait,
            FeatureKind::Traits { .. } => FeatureType::Traits,
            FeatureKind::Proficiency { .. } => FeatureType::Proficiency,
            FeatureKind::Spell { .. } => FeatureType::Spell,
            FeatureKind::Language { .. } => FeatureType::Language,
            FeatureKind::AbilityChoice(_) => FeatureType::AbilityChoice,
            FeatureKind::SkillChoice(_) => FeatureType::SkillChoice,
            FeatureKind::FeatChoice(_) => FeatureType::FeatChoice,
        }
    }
}

/// A fully parsed (and template-expanded) feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureDefinition {
    /// Display name, or a localization key
    pub name: String,
    /// Display text, or a localization key
    pub description: String,
    #[serde(flatten)]
    pub kind: FeatureKind,
    /// Fields the catalog declares beyond the typed payload (e.g. `range`).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl FeatureDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: FeatureKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            extra: BTreeMap::new(),
        }
    }

    /// A passive trait.
    pub fn trait_feature(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, FeatureKind::Trait)
    }

    pub fn feature_type(&self) -> FeatureType {
        self.kind.feature_type()
    }

    /// Weapons granted, empty for anything but proficiencies.
    pub fn weapons(&self) -> &[String] {
        match &self.kind {
            FeatureKind::Proficiency { weapons, .. } => weapons,
            _ => &[],
        }
    }

    /// Languages granted, `None` for anything but language features.
    pub fn language_grant(&self) -> Option<&LanguageGrant> {
        match &self.kind {
            FeatureKind::Language { languages } => Some(languages),
            _ => None,
        }
    }

    /// Whether this is a weapon proficiency.
    ///
    /// Catalog data marks these in the display name ("Weapon Proficiency"),
    /// so the name marker is honored. A proficiency that lists weapons and no
    /// skills counts as well, even when its name carries no marker; this
    /// widens the name-only rule, so such features are diffed by weapon
    /// rather than kept or dropped by `(type, name)`.
    pub fn is_weapon_proficiency(&self) -> bool {
        let FeatureKind::Proficiency { weapons, skills } = &self.kind else {
            return false;
        };
        let name = self.name.to_lowercase();
        WEAPON_PROFICIENCY_MARKERS
            .iter()
            .any(|marker| name.contains(marker))
            || (!weapons.is_empty() && skills.is_empty())
    }

    /// Same `(type, name)` identity used for duplicate detection.
    pub fn same_identity(&self, other: &FeatureDefinition) -> bool {
        self.feature_type() == other.feature_type() && self.name == other.name
    }
}

/// Named, reusable feature skeleton.
///
/// Holds the raw catalog fields, including `{field}` placeholders that are
/// resolved when a feature references the template. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTemplate {
    name: String,
    fields: Map<String, Value>,
}

impl FeatureTemplate {
    pub fn new(name: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The skeleton fields, before overrides and placeholder substitution.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Declared `type`, if it names a known feature type.
    pub fn feature_type(&self) -> Option<FeatureType> {
        self.fields
            .get("type")
            .and_then(Value::as_str)
            .and_then(|t| t.parse().ok())
    }
}
