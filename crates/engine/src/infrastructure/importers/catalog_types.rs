//! Type definitions for the race catalog document format.
//!
//! These types mirror the catalog YAML schema. Entries are deserialized one at
//! a time so a single malformed race or subrace cannot sink the whole catalog,
//! then converted to domain types by the importer.
//!
//! Loosely typed fields (lists that may be written as a single string,
//! `languages` in either of its two shapes) stay as raw values here and are
//! normalized during conversion.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A race entry under `races`.
#[derive(Debug, Deserialize)]
pub struct RawRace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bonuses: Option<Map<String, Value>>,
    #[serde(default)]
    pub features: Option<Vec<Value>>,
    #[serde(default)]
    pub subraces: Option<IndexMap<String, Value>>,
}

/// A subrace entry under a race's `subraces`.
#[derive(Debug, Deserialize)]
pub struct RawSubrace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bonuses: Option<Map<String, Value>>,
    #[serde(default)]
    pub features: Option<Vec<Value>>,
    #[serde(default)]
    pub inherit_bonuses: Option<bool>,
    #[serde(default)]
    pub inherit_features: Option<bool>,
}

/// A feature after template expansion.
#[derive(Debug, Default, Deserialize)]
pub struct RawFeature {
    #[serde(rename = "type", default)]
    pub feature_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub weapons: Option<Value>,
    #[serde(default)]
    pub skills: Option<Value>,
    #[serde(default)]
    pub spells: Option<Value>,
    #[serde(default)]
    pub languages: Option<Value>,
    #[serde(default)]
    pub traits: Option<Vec<Value>>,
    #[serde(default)]
    pub max_choices: Option<u32>,
    #[serde(default)]
    pub bonus_value: Option<i32>,
    #[serde(default)]
    pub allowed_attributes: Option<Value>,
    #[serde(default)]
    pub choices: Option<Value>,
    /// Everything else (e.g. `range`), kept for display.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One entry of a composite `traits` feature.
#[derive(Debug, Deserialize)]
pub struct RawTraitEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// `languages: {base: [...], choice: n}`
#[derive(Debug, Deserialize)]
pub struct RawLanguageGrant {
    #[serde(default)]
    pub base: Option<Value>,
    #[serde(default)]
    pub choice: Option<u32>,
}
