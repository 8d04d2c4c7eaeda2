//! Race catalog importer.
//!
//! Converts a parsed race catalog document into a [`RaceCatalog`]: templates
//! first, then each race with its features expanded, then each subrace
//! reduced to the features it adds on top of its parent race.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, error, warn};

use taleforge_domain::{
    Attribute, AttributeBonuses, ChoiceSpec, FeatureDefinition, FeatureKind, FeatureTemplate,
    FeatureType, LanguageGrant, RaceCatalog, RaceDefinition, SubraceDefinition, TraitEntry,
};

use super::catalog_types::{RawFeature, RawLanguageGrant, RawRace, RawSubrace, RawTraitEntry};
use crate::infrastructure::placeholders::{has_placeholders, interpolate};

/// Name given to features that declare none.
pub const UNKNOWN_FEATURE_NAME: &str = "Unknown feature";
/// Description given to features that declare none.
pub const MISSING_DESCRIPTION: &str = "No description";
const UNNAMED_RACE: &str = "Unnamed race";
const UNNAMED_SUBRACE: &str = "Unnamed subrace";

/// List-form `languages` entry that stands for one free pick.
const LANGUAGE_CHOICE_MARKER: &str = "choice";

/// Errors that make the whole catalog unusable.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Catalog root must be a mapping, found {0}")]
    InvalidRoot(&'static str),
    #[error("Catalog section `{section}` must be a mapping")]
    InvalidSection { section: &'static str },
}

/// Importer for race catalog documents.
///
/// Holds the template table while races are converted; one importer per
/// document.
pub struct RaceCatalogImporter {
    templates: IndexMap<String, FeatureTemplate>,
}

impl RaceCatalogImporter {
    /// Parse a whole catalog document.
    ///
    /// An empty document yields an empty catalog. Malformed race or subrace
    /// entries are skipped with a logged error; only a document whose root or
    /// top-level sections have the wrong shape fails as a whole.
    pub fn import(document: &Value) -> Result<RaceCatalog, ImportError> {
        let root = match document {
            Value::Null => return Ok(RaceCatalog::empty()),
            Value::Object(root) => root,
            other => return Err(ImportError::InvalidRoot(value_kind(other))),
        };

        let mut importer = Self {
            templates: IndexMap::new(),
        };
        importer.load_templates(section(root, "templates")?);

        let mut races = IndexMap::new();
        if let Some(entries) = section(root, "races")? {
            for (key, entry) in entries {
                if let Some(race) = importer.convert_race(key, entry) {
                    races.insert(key.clone(), race);
                }
            }
        }

        let catalog = RaceCatalog::new(importer.templates, races);
        debug!(
            races = catalog.race_count(),
            subraces = catalog.subrace_count(),
            templates = catalog.template_count(),
            "Parsed race catalog"
        );
        Ok(catalog)
    }

    fn load_templates(&mut self, templates: Option<&Map<String, Value>>) {
        let Some(templates) = templates else {
            return;
        };
        for (name, skeleton) in templates {
            match skeleton {
                Value::Object(fields) => {
                    self.templates
                        .insert(name.clone(), FeatureTemplate::new(name.clone(), fields.clone()));
                }
                other => warn!(
                    template = %name,
                    found = value_kind(other),
                    "Feature template is not a mapping, skipping"
                ),
            }
        }
    }

    // === Race Conversion ===

    fn convert_race(&self, key: &str, entry: &Value) -> Option<RaceDefinition> {
        let raw: RawRace = match serde_json::from_value(entry.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                error!(race = %key, error = %e, "Malformed race entry, skipping");
                return None;
            }
        };

        let mut race = RaceDefinition::new(key, raw.name.unwrap_or_else(|| UNNAMED_RACE.into()));
        race.description = raw.description.unwrap_or_default();
        race.bonuses = parse_bonuses(raw.bonuses.as_ref());
        race.features = self.convert_features(raw.features.as_deref().unwrap_or_default());

        // Subraces diff against the fully expanded parent features
        for (sub_key, sub_entry) in raw.subraces.iter().flatten() {
            if let Some(subrace) = self.convert_subrace(&race, sub_key, sub_entry) {
                race.subraces.insert(sub_key.clone(), subrace);
            }
        }

        Some(race)
    }

    fn convert_subrace(
        &self,
        parent: &RaceDefinition,
        key: &str,
        entry: &Value,
    ) -> Option<SubraceDefinition> {
        let raw: RawSubrace = match serde_json::from_value(entry.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                error!(
                    race = %parent.key,
                    subrace = %key,
                    error = %e,
                    "Malformed subrace entry, skipping"
                );
                return None;
            }
        };

        let mut subrace =
            SubraceDefinition::new(key, raw.name.unwrap_or_else(|| UNNAMED_SUBRACE.into()));
        subrace.description = raw.description.unwrap_or_default();
        subrace.bonuses = parse_bonuses(raw.bonuses.as_ref());
        subrace.inherit_bonuses = raw.inherit_bonuses.unwrap_or(true);
        subrace.inherit_features = raw.inherit_features.unwrap_or(true);

        let features = self.convert_features(raw.features.as_deref().unwrap_or_default());
        subrace.features = unique_features(features, &parent.features);

        Some(subrace)
    }

    // === Feature Conversion ===

    fn convert_features(&self, entries: &[Value]) -> Vec<FeatureDefinition> {
        entries
            .iter()
            .filter_map(|entry| {
                let Value::Object(fields) = entry else {
                    warn!(found = value_kind(entry), "Feature entry is not a mapping, skipping");
                    return None;
                };
                let fields = if fields.contains_key("template") {
                    self.expand_template(fields)?
                } else {
                    fields.clone()
                };
                convert_feature(fields)
            })
            .collect()
    }

    /// Copy the template, lay the feature's own fields over it, then resolve
    /// `{field}` placeholders in top-level strings against the merged fields.
    fn expand_template(&self, overrides: &Map<String, Value>) -> Option<Map<String, Value>> {
        let Some(name) = overrides.get("template").and_then(Value::as_str) else {
            warn!("Feature template reference is not a string, dropping feature");
            return None;
        };
        let Some(template) = self.templates.get(name) else {
            warn!(template = %name, "Unknown feature template, dropping feature");
            return None;
        };

        let mut merged = template.fields().clone();
        for (key, value) in overrides {
            if key != "template" {
                merged.insert(key.clone(), value.clone());
            }
        }

        // Single pass: substitute against a snapshot so expanded fields are
        // never fed back into other fields.
        let snapshot = merged.clone();
        for (field, value) in merged.iter_mut() {
            let Value::String(text) = value else {
                continue;
            };
            if !has_placeholders(text) {
                continue;
            }
            match interpolate(text, |placeholder| template_value(snapshot.get(placeholder)?)) {
                Ok(expanded) => *text = expanded,
                Err(e) => warn!(
                    template = %name,
                    field = %field,
                    error = %e,
                    "Unresolved template placeholder, keeping raw text"
                ),
            }
        }

        Some(merged)
    }
}

/// Typed conversion of one (already expanded) feature mapping.
fn convert_feature(fields: Map<String, Value>) -> Option<FeatureDefinition> {
    let raw: RawFeature = match serde_json::from_value(Value::Object(fields)) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "Malformed feature, skipping");
            return None;
        }
    };

    let feature_type = match raw.feature_type.as_deref() {
        None => FeatureType::Trait,
        Some(name) => name.parse().unwrap_or_else(|_| {
            debug!(feature_type = %name, "Unknown feature type, treating as trait");
            FeatureType::Trait
        }),
    };

    let kind = match feature_type {
        FeatureType::Trait => FeatureKind::Trait,
        FeatureType::Traits => FeatureKind::Traits {
            traits: raw
                .traits
                .unwrap_or_default()
                .into_iter()
                .filter_map(convert_trait_entry)
                .collect(),
        },
        FeatureType::Proficiency => FeatureKind::Proficiency {
            weapons: string_list(raw.weapons.as_ref()),
            skills: string_list(raw.skills.as_ref()),
        },
        FeatureType::Spell => FeatureKind::Spell {
            spells: string_list(raw.spells.as_ref()),
        },
        FeatureType::Language => FeatureKind::Language {
            languages: language_grant(raw.languages),
        },
        FeatureType::AbilityChoice => FeatureKind::AbilityChoice(ChoiceSpec {
            max_choices: raw.max_choices.unwrap_or(1),
            bonus_value: raw.bonus_value.unwrap_or(1),
            options: string_list(raw.allowed_attributes.as_ref())
                .into_iter()
                .filter(|name| name.parse::<Attribute>().is_ok())
                .collect(),
        }),
        FeatureType::SkillChoice => FeatureKind::SkillChoice(choice_spec(&raw)),
        FeatureType::FeatChoice => FeatureKind::FeatChoice(choice_spec(&raw)),
    };

    Some(FeatureDefinition {
        name: non_empty(raw.name).unwrap_or_else(|| UNKNOWN_FEATURE_NAME.into()),
        description: non_empty(raw.description).unwrap_or_else(|| MISSING_DESCRIPTION.into()),
        kind,
        extra: raw.extra,
    })
}

fn choice_spec(raw: &RawFeature) -> ChoiceSpec {
    ChoiceSpec {
        max_choices: raw.max_choices.unwrap_or(1),
        bonus_value: raw.bonus_value.unwrap_or(0),
        options: string_list(raw.choices.as_ref()),
    }
}

fn convert_trait_entry(entry: Value) -> Option<TraitEntry> {
    let raw: RawTraitEntry = serde_json::from_value(entry).ok()?;
    Some(TraitEntry {
        name: non_empty(raw.name).unwrap_or_else(|| UNKNOWN_FEATURE_NAME.into()),
        description: raw.description.unwrap_or_default(),
    })
}

/// `{base: [...], choice: n}` or a plain list, where a `choice` item in the
/// list counts as one free pick.
fn language_grant(raw: Option<Value>) -> LanguageGrant {
    match raw {
        Some(Value::Object(map)) => match serde_json::from_value::<RawLanguageGrant>(Value::Object(map)) {
            Ok(grant) => LanguageGrant {
                base: string_list(grant.base.as_ref()),
                choice: grant.choice.unwrap_or(0),
            },
            Err(e) => {
                warn!(error = %e, "Malformed language grant, treating as empty");
                LanguageGrant::default()
            }
        },
        other => {
            let mut grant = LanguageGrant::default();
            for language in string_list(other.as_ref()) {
                if language.eq_ignore_ascii_case(LANGUAGE_CHOICE_MARKER) {
                    grant.choice += 1;
                } else {
                    grant.base.push(language);
                }
            }
            grant
        }
    }
}

/// A single string or a sequence of strings. Anything else is empty.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Keep canonical attributes with integer (or integer-string) values.
fn parse_bonuses(raw: Option<&Map<String, Value>>) -> AttributeBonuses {
    raw.into_iter()
        .flatten()
        .filter_map(|(key, value)| {
            let attribute = key.parse::<Attribute>().ok()?;
            Some((attribute, bonus_value(value)?))
        })
        .collect()
}

fn bonus_value(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Text a field contributes to template placeholders.
fn template_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Reduce subrace features to what they add on top of the parent race.
///
/// - Weapon proficiencies keep only weapons the parent does not grant and are
///   dropped when nothing remains.
/// - Language features are kept when they add a base language or carry an
///   open-ended choice. A choice keeps the feature even when its base list
///   repeats the parent's, so the displayed languages may duplicate.
/// - Anything else is dropped when the parent has a feature with the same type
///   and name.
pub fn unique_features(
    features: Vec<FeatureDefinition>,
    parent: &[FeatureDefinition],
) -> Vec<FeatureDefinition> {
    let parent_weapons: HashSet<&str> = parent
        .iter()
        .filter(|f| f.is_weapon_proficiency())
        .flat_map(|f| f.weapons().iter().map(String::as_str))
        .collect();
    let parent_languages: HashSet<&str> = parent
        .iter()
        .filter_map(FeatureDefinition::language_grant)
        .flat_map(|grant| grant.base.iter().map(String::as_str))
        .collect();

    let mut unique = Vec::with_capacity(features.len());
    for mut feature in features {
        if feature.is_weapon_proficiency() {
            let additional = weapon_difference(feature.weapons(), &parent_weapons);
            if additional.is_empty() {
                debug!(feature = %feature.name, "Subrace weapon proficiency adds nothing, dropping");
                continue;
            }
            if let FeatureKind::Proficiency { weapons, .. } = &mut feature.kind {
                *weapons = additional;
            }
            unique.push(feature);
        } else if let Some(grant) = feature.language_grant() {
            let adds_language = grant
                .base
                .iter()
                .any(|language| !parent_languages.contains(language.as_str()));
            if adds_language || grant.has_choice() {
                unique.push(feature);
            }
        } else if !parent.iter().any(|p| p.same_identity(&feature)) {
            unique.push(feature);
        }
    }
    unique
}

/// Weapons not in `parent`, first occurrence order, exact match.
fn weapon_difference(weapons: &[String], parent: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    weapons
        .iter()
        .filter(|w| !parent.contains(w.as_str()) && seen.insert(w.as_str()))
        .cloned()
        .collect()
}

fn section<'a>(
    root: &'a Map<String, Value>,
    name: &'static str,
) -> Result<Option<&'a Map<String, Value>>, ImportError> {
    match root.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(ImportError::InvalidSection { section: name }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
