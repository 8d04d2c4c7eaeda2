//! Content source types for the overlay system.
//!
//! A [`ContentSource`] is one prioritized document (the base game, an
//! installed mod, a loaded adventure). A [`SourceChain`] keeps the active
//! sources ordered so lookups can walk them highest priority first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::entities::locale::LocalePayload;
use crate::error::DomainError;

/// Priority tier of the base game content.
pub const PRIORITY_BASE: i32 = 0;
/// Priority tier of installed modifications.
pub const PRIORITY_MOD: i32 = 100;
/// Priority tier of loaded adventures.
pub const PRIORITY_ADVENTURE: i32 = 200;

/// Type of content source. Determines the default priority tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Base game content
    #[default]
    Base,
    /// Installed modification
    Mod,
    /// Loaded adventure (may override mods)
    Adventure,
}

impl SourceType {
    /// Get the priority tier for this source type (higher wins).
    pub fn priority(&self) -> i32 {
        match self {
            SourceType::Base => PRIORITY_BASE,
            SourceType::Mod => PRIORITY_MOD,
            SourceType::Adventure => PRIORITY_ADVENTURE,
        }
    }

    /// Registry name for a source of this type: `base`, `mod_<name>`,
    /// `adventure_<name>`.
    pub fn source_name(&self, name: &str) -> String {
        match self {
            SourceType::Base => "base".to_string(),
            SourceType::Mod => format!("mod_{}", name),
            SourceType::Adventure => format!("adventure_{}", name),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Base => "base",
            SourceType::Mod => "mod",
            SourceType::Adventure => "adventure",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(SourceType::Base),
            "mod" => Ok(SourceType::Mod),
            "adventure" => Ok(SourceType::Adventure),
            _ => Err(DomainError::parse(format!("Unknown source type: {}", s))),
        }
    }
}

/// One prioritized localization document.
///
/// Sources that were read from disk remember their `origin` so the overlay
/// can re-read them when the language changes or a hot reload is requested.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSource {
    name: String,
    priority: i32,
    source_type: SourceType,
    payload: LocalePayload,
    origin: Option<PathBuf>,
}

impl ContentSource {
    /// Create a new source with the default priority for its type.
    pub fn new(name: impl Into<String>, source_type: SourceType, payload: LocalePayload) -> Self {
        Self {
            name: name.into(),
            priority: source_type.priority(),
            source_type,
            payload,
            origin: None,
        }
    }

    /// The base game source (`base`, priority 0).
    pub fn base(payload: LocalePayload) -> Self {
        Self::new("base", SourceType::Base, payload)
    }

    /// A mod source named `mod_<mod_name>` (priority 100).
    pub fn for_mod(mod_name: &str, payload: LocalePayload) -> Self {
        Self::new(SourceType::Mod.source_name(mod_name), SourceType::Mod, payload)
    }

    /// An adventure source named `adventure_<adventure_name>` (priority 200).
    pub fn for_adventure(adventure_name: &str, payload: LocalePayload) -> Self {
        Self::new(
            SourceType::Adventure.source_name(adventure_name),
            SourceType::Adventure,
            payload,
        )
    }

    // Read accessors
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    pub fn payload(&self) -> &LocalePayload {
        &self.payload
    }

    /// Path the payload was read from, if any.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    // Builder methods
    /// Override the tier priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Remember the file this source was read from.
    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

/// Diagnostic view of a registered source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub name: String,
    pub source_type: SourceType,
    pub priority: i32,
    pub has_active_language: bool,
}

/// Sources ordered by priority, highest first.
///
/// The order is computed on mutation, never on lookup. Sources sharing a
/// priority keep their registration order; re-registering a name moves the
/// replacement to the end of its tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceChain {
    sources: Vec<ContentSource>,
}

impl SourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a source, replacing any source with the same name.
    ///
    /// Returns the replaced source.
    pub fn insert(&mut self, source: ContentSource) -> Option<ContentSource> {
        let previous = self.remove(source.name());
        self.sources.push(source);
        // stable: equal priorities stay in registration order
        self.sources.sort_by_key(|s| std::cmp::Reverse(s.priority()));
        previous
    }

    /// Remove a source by name. No-op if absent.
    pub fn remove(&mut self, name: &str) -> Option<ContentSource> {
        let index = self.sources.iter().position(|s| s.name() == name)?;
        Some(self.sources.remove(index))
    }

    /// Swap the payload of a registered source in place, provided it is
    /// still backed by `origin`.
    ///
    /// Priority is untouched, so the order is too. Returns `false` if no
    /// source has that name or the name was re-registered from another file.
    pub fn update_payload(&mut self, name: &str, origin: &Path, payload: LocalePayload) -> bool {
        match self
            .sources
            .iter_mut()
            .find(|s| s.name() == name && s.origin() == Some(origin))
        {
            Some(source) => {
                source.payload = payload;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ContentSource> {
        self.sources.iter().find(|s| s.name() == name)
    }

    /// Iterate from highest to lowest priority.
    pub fn iter(&self) -> impl Iterator<Item = &ContentSource> {
        self.sources.iter()
    }

    /// Ask each source in priority order; the first `Some` wins.
    pub fn first_match<'a, T, F>(&'a self, mut probe: F) -> Option<T>
    where
        F: FnMut(&'a ContentSource) -> Option<T>,
    {
        self.sources.iter().find_map(|s| probe(s))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl FromIterator<ContentSource> for SourceChain {
    fn from_iter<I: IntoIterator<Item = ContentSource>>(iter: I) -> Self {
        let mut chain = SourceChain::new();
        for source in iter {
            chain.insert(source);
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::locale::LocaleNode;

    fn names(chain: &SourceChain) -> Vec<&str> {
        chain.iter().map(|s| s.name()).collect()
    }

    #[test]
    fn source_type_tiers() {
        assert_eq!(SourceType::Base.priority(), 0);
        assert_eq!(SourceType::Mod.priority(), 100);
        assert_eq!(SourceType::Adventure.priority(), 200);
        assert_eq!(SourceType::Mod.source_name("elves"), "mod_elves");
        assert_eq!(SourceType::Adventure.source_name("crypt"), "adventure_crypt");
        assert_eq!(SourceType::Base.source_name("ignored"), "base");
    }

    #[test]
    fn source_type_from_str() {
        assert_eq!("Mod".parse::<SourceType>(), Ok(SourceType::Mod));
        assert!("dlc".parse::<SourceType>().is_err());
    }

    #[test]
    fn chain_orders_by_priority_regardless_of_registration() {
        let mut chain = SourceChain::new();
        chain.insert(ContentSource::for_adventure("crypt", LocalePayload::empty()));
        chain.insert(ContentSource::base(LocalePayload::empty()));
        chain.insert(ContentSource::for_mod("elves", LocalePayload::empty()));

        assert_eq!(names(&chain), vec!["adventure_crypt", "mod_elves", "base"]);
    }

    #[test]
    fn chain_ties_keep_registration_order() {
        let mut chain = SourceChain::new();
        chain.insert(ContentSource::for_mod("a", LocalePayload::empty()));
        chain.insert(ContentSource::for_mod("b", LocalePayload::empty()));
        chain.insert(ContentSource::for_mod("c", LocalePayload::empty()));

        assert_eq!(names(&chain), vec!["mod_a", "mod_b", "mod_c"]);
    }

    #[test]
    fn chain_replaces_by_name() {
        let mut chain = SourceChain::new();
        chain.insert(ContentSource::for_mod("a", LocalePayload::empty()));
        chain.insert(ContentSource::for_mod("b", LocalePayload::empty()));
        let replaced = chain.insert(ContentSource::for_mod("a", LocalePayload::empty()));

        assert!(replaced.is_some());
        assert_eq!(chain.len(), 2);
        assert_eq!(names(&chain), vec!["mod_b", "mod_a"]);
    }

    #[test]
    fn chain_remove_missing_is_noop() {
        let mut chain: SourceChain = [ContentSource::base(LocalePayload::empty())]
            .into_iter()
            .collect();
        assert!(chain.remove("mod_ghost").is_none());
        assert_eq!(chain.len(), 1);
        assert!(chain.remove("base").is_some());
        assert!(chain.is_empty());
    }

    #[test]
    fn update_payload_keeps_position() {
        let mut chain = SourceChain::new();
        chain.insert(ContentSource::for_mod("a", LocalePayload::empty()).with_origin("mods/a"));
        chain.insert(ContentSource::for_mod("b", LocalePayload::empty()).with_origin("mods/b"));

        let payload = LocalePayload::empty().with_language("en", LocaleNode::Text("x".into()));
        assert!(chain.update_payload("mod_a", Path::new("mods/a"), payload.clone()));
        assert!(!chain.update_payload("mod_ghost", Path::new("mods/a"), LocalePayload::empty()));
        assert_eq!(names(&chain), vec!["mod_a", "mod_b"]);
        assert_eq!(chain.get("mod_a").map(|s| s.payload()), Some(&payload));
    }

    #[test]
    fn update_payload_skips_source_registered_from_another_file() {
        let mut chain = SourceChain::new();
        let current = LocalePayload::empty().with_language("en", LocaleNode::Text("b".into()));
        chain.insert(ContentSource::for_mod("orcs", current.clone()).with_origin("mods/b"));

        let stale = LocalePayload::empty().with_language("en", LocaleNode::Text("a".into()));
        assert!(!chain.update_payload("mod_orcs", Path::new("mods/a"), stale));
        assert_eq!(chain.get("mod_orcs").map(|s| s.payload()), Some(&current));

        let base = ContentSource::base(LocalePayload::empty());
        chain.insert(base);
        // A source without an origin is never refreshed from a file
        assert!(!chain.update_payload("base", Path::new("mods/a"), current));
    }

    #[test]
    fn first_match_walks_highest_priority_first() {
        let chain: SourceChain = [
            ContentSource::base(LocalePayload::empty()),
            ContentSource::for_mod("m", LocalePayload::empty()).with_priority(150),
        ]
        .into_iter()
        .collect();

        let hit = chain.first_match(|s| (s.priority() > 0).then(|| s.name().to_string()));
        assert_eq!(hit.as_deref(), Some("mod_m"));
    }
}
