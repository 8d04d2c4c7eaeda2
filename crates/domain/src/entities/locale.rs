//! Localization payload trees.
//!
//! A localization document maps language codes to nested string-keyed trees.
//! Leaves are translation strings or ordered lists of strings:
//!
//! ```yaml
//! en:
//!   menu:
//!     continue: "Continue"
//!     greeting: "Hello, {name}!"
//!   hints:
//!     - "Rest to recover hit points"
//!     - "Elves do not sleep"
//! ```

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::DomainError;

/// A node in a localization tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleNode {
    Text(String),
    List(Vec<String>),
    Branch(BTreeMap<String, LocaleNode>),
}

impl LocaleNode {
    /// Convert a document value into a tree.
    ///
    /// Only string leaves are kept. Numbers, booleans and nulls are not
    /// translations and are dropped, as are non-string list items.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(LocaleNode::Text(s.clone())),
            Value::Array(items) => Some(LocaleNode::List(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            )),
            Value::Object(map) => Some(LocaleNode::Branch(
                map.iter()
                    .filter_map(|(k, v)| LocaleNode::from_value(v).map(|node| (k.clone(), node)))
                    .collect(),
            )),
            Value::Null | Value::Bool(_) | Value::Number(_) => None,
        }
    }

    /// Walk `path` segment by segment. Every segment must land on a branch.
    pub fn lookup<'a, I>(&self, path: I) -> Option<&LocaleNode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = self;
        for segment in path {
            match current {
                LocaleNode::Branch(children) => current = children.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            LocaleNode::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            LocaleNode::List(items) => Some(items),
            _ => None,
        }
    }

    /// Collect the dotted paths of every text leaf under this node.
    fn collect_text_keys(&self, prefix: &str, out: &mut BTreeSet<String>) {
        if let LocaleNode::Branch(children) = self {
            for (key, child) in children {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                match child {
                    LocaleNode::Text(_) => {
                        out.insert(full_key);
                    }
                    LocaleNode::Branch(_) => child.collect_text_keys(&full_key, out),
                    LocaleNode::List(_) => {}
                }
            }
        }
    }
}

/// Language code → localization tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalePayload {
    languages: BTreeMap<String, LocaleNode>,
}

impl LocalePayload {
    /// A payload with no languages. Used for missing or unreadable documents.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a payload from a parsed localization document.
    ///
    /// The document root must be a mapping of language codes. An empty
    /// document (`null`) yields an empty payload.
    pub fn from_document(document: &Value) -> Result<Self, DomainError> {
        match document {
            Value::Null => Ok(Self::empty()),
            Value::Object(map) => Ok(Self {
                languages: map
                    .iter()
                    .filter_map(|(lang, tree)| {
                        LocaleNode::from_value(tree).map(|node| (lang.clone(), node))
                    })
                    .collect(),
            }),
            other => Err(DomainError::validation(format!(
                "localization document root must be a mapping of languages, found {}",
                value_kind(other)
            ))),
        }
    }

    /// Add or replace one language tree.
    pub fn with_language(mut self, language: impl Into<String>, tree: LocaleNode) -> Self {
        self.languages.insert(language.into(), tree);
        self
    }

    pub fn language(&self, code: &str) -> Option<&LocaleNode> {
        self.languages.get(code)
    }

    pub fn has_language(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Language codes present in this payload, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Resolve a dotted key to a text leaf under `language`.
    pub fn resolve_text(&self, language: &str, key: &str) -> Option<&str> {
        self.language(language)?
            .lookup(key.split('.'))?
            .as_text()
    }

    /// Resolve a dotted key to a list leaf under `language`.
    pub fn resolve_list(&self, language: &str, key: &str) -> Option<&[String]> {
        self.language(language)?
            .lookup(key.split('.'))?
            .as_list()
    }

    /// Every dotted key with a text leaf under `language`.
    pub fn text_keys(&self, language: &str) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        if let Some(root) = self.language(language) {
            root.collect_text_keys("", &mut keys);
        }
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> LocalePayload {
        LocalePayload::from_document(&json!({
            "en": {
                "menu": {
                    "continue": "Continue",
                    "volume": 7,
                    "submenu": { "back": "Back" }
                },
                "hints": ["Rest often", 3, "Elves do not sleep"]
            },
            "ru": {
                "menu": { "continue": "Продолжить" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn resolves_nested_text() {
        let payload = sample();
        assert_eq!(payload.resolve_text("en", "menu.continue"), Some("Continue"));
        assert_eq!(payload.resolve_text("en", "menu.submenu.back"), Some("Back"));
        assert_eq!(payload.resolve_text("ru", "menu.continue"), Some("Продолжить"));
    }

    #[test]
    fn branches_and_lists_are_not_text() {
        let payload = sample();
        assert_eq!(payload.resolve_text("en", "menu"), None);
        assert_eq!(payload.resolve_text("en", "hints"), None);
        assert_eq!(payload.resolve_text("en", "menu.continue.deeper"), None);
    }

    #[test]
    fn non_string_leaves_are_dropped() {
        let payload = sample();
        assert_eq!(payload.resolve_text("en", "menu.volume"), None);
        assert_eq!(
            payload.resolve_list("en", "hints"),
            Some(&["Rest often".to_string(), "Elves do not sleep".to_string()][..])
        );
    }

    #[test]
    fn missing_language_resolves_nothing() {
        assert_eq!(sample().resolve_text("de", "menu.continue"), None);
    }

    #[test]
    fn text_keys_lists_only_text_leaves() {
        let keys: Vec<String> = sample().text_keys("en").into_iter().collect();
        assert_eq!(keys, vec!["menu.continue", "menu.submenu.back"]);
    }

    #[test]
    fn document_root_must_be_mapping() {
        assert!(LocalePayload::from_document(&json!(["en"])).is_err());
        assert!(LocalePayload::from_document(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn languages_are_sorted() {
        let payload = sample();
        let langs: Vec<&str> = payload.languages().collect();
        assert_eq!(langs, vec!["en", "ru"]);
    }
}
