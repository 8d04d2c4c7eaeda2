//! Race and subrace definitions.
//!
//! Races are parsed once from the catalog document and never mutated. Subrace
//! combination (`effective_bonuses`, `effective_features`) produces new values
//! and leaves the parsed definitions untouched.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::entities::feature::{FeatureDefinition, FeatureTemplate};
use crate::value_objects::Attribute;

/// Attribute bonuses keyed by canonical attribute.
pub type AttributeBonuses = BTreeMap<Attribute, i32>;

/// A race from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceDefinition {
    /// Catalog key (e.g., "elf")
    pub key: String,
    pub name: String,
    pub description: String,
    pub bonuses: AttributeBonuses,
    pub features: Vec<FeatureDefinition>,
    /// Subraces in declared order
    pub subraces: IndexMap<String, SubraceDefinition>,
}

impl RaceDefinition {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: String::new(),
            bonuses: AttributeBonuses::new(),
            features: Vec::new(),
            subraces: IndexMap::new(),
        }
    }

    pub fn subrace(&self, key: &str) -> Option<&SubraceDefinition> {
        self.subraces.get(key)
    }

    /// First two sentences of the description, for list views.
    pub fn short_description(&self) -> String {
        short_description(&self.description)
    }

    /// Race bonuses combined with the subrace's.
    ///
    /// With an inheriting subrace the two tables are summed per attribute.
    /// A subrace that opts out of inheritance contributes its table alone.
    pub fn effective_bonuses(&self, subrace: Option<&SubraceDefinition>) -> AttributeBonuses {
        let Some(subrace) = subrace else {
            return self.bonuses.clone();
        };
        if !subrace.inherit_bonuses {
            return subrace.bonuses.clone();
        }
        let mut total = self.bonuses.clone();
        for (attribute, value) in &subrace.bonuses {
            *total.entry(*attribute).or_insert(0) += value;
        }
        total
    }

    /// Race features followed by the subrace's.
    ///
    /// Subrace features already had parent duplicates removed at parse time,
    /// so no further filtering happens here.
    pub fn effective_features(&self, subrace: Option<&SubraceDefinition>) -> Vec<FeatureDefinition> {
        match subrace {
            None => self.features.clone(),
            Some(sub) if !sub.inherit_features => sub.features.clone(),
            Some(sub) => self
                .features
                .iter()
                .chain(sub.features.iter())
                .cloned()
                .collect(),
        }
    }
}

/// A subrace of a [`RaceDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubraceDefinition {
    pub key: String,
    pub name: String,
    pub description: String,
    pub bonuses: AttributeBonuses,
    /// Features unique to this subrace
    pub features: Vec<FeatureDefinition>,
    pub inherit_bonuses: bool,
    pub inherit_features: bool,
}

impl SubraceDefinition {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: String::new(),
            bonuses: AttributeBonuses::new(),
            features: Vec::new(),
            inherit_bonuses: true,
            inherit_features: true,
        }
    }

    pub fn short_description(&self) -> String {
        short_description(&self.description)
    }
}

/// Parsed race catalog: shared templates plus races in declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaceCatalog {
    templates: IndexMap<String, FeatureTemplate>,
    races: IndexMap<String, RaceDefinition>,
}

impl RaceCatalog {
    pub fn new(
        templates: IndexMap<String, FeatureTemplate>,
        races: IndexMap<String, RaceDefinition>,
    ) -> Self {
        Self { templates, races }
    }

    /// A catalog with no templates and no races.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn race(&self, key: &str) -> Option<&RaceDefinition> {
        self.races.get(key)
    }

    pub fn subrace(&self, race_key: &str, subrace_key: &str) -> Option<&SubraceDefinition> {
        self.race(race_key)?.subrace(subrace_key)
    }

    /// Races in declared order.
    pub fn races(&self) -> impl Iterator<Item = &RaceDefinition> {
        self.races.values()
    }

    pub fn race_keys(&self) -> impl Iterator<Item = &str> {
        self.races.keys().map(String::as_str)
    }

    pub fn template(&self, name: &str) -> Option<&FeatureTemplate> {
        self.templates.get(name)
    }

    pub fn race_count(&self) -> usize {
        self.races.len()
    }

    pub fn subrace_count(&self) -> usize {
        self.races.values().map(|r| r.subraces.len()).sum()
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }
}

fn short_description(description: &str) -> String {
    let sentences: Vec<&str> = description
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(2)
        .collect();
    if sentences.is_empty() {
        return String::new();
    }
    format!("{}.", sentences.join(". "))
}
