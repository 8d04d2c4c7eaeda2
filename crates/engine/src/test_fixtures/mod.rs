//! Canned documents shared by unit tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{documents, races_yaml};
//!
//! #[test]
//! fn test_elf_is_listed() {
//!     let store = documents::store_with_races();
//!     // ... test logic
//! }
//! ```

use serde_json::{json, Value};

/// Base localization: `en` and `ru`.
pub fn base_localization() -> Value {
    json!({
        "en": {
            "menu": {
                "continue": "Continue",
                "new_game": "New game",
                "quit": "Quit"
            },
            "greeting": "Hello, {name}!",
            "combat": {
                "hit": "You deal {damage} damage to {target}"
            },
            "hints": ["Rest to recover", "Elves do not sleep"]
        },
        "ru": {
            "menu": {
                "continue": "Продолжить",
                "new_game": "Новая игра",
                "quit": "Выход"
            },
            "greeting": "Привет, {name}!"
        }
    })
}

/// A mod overriding one menu entry and adding its own keys.
pub fn mod_localization() -> Value {
    json!({
        "en": {
            "menu": { "continue": "Resume" },
            "races": { "orc": "Orc" }
        }
    })
}

/// An adventure overriding the same entry as the mod.
pub fn adventure_localization() -> Value {
    json!({
        "en": {
            "menu": { "continue": "Onward, adventurer" }
        }
    })
}

/// Race catalog source text, YAML as it ships in the data directory.
pub fn races_yaml() -> &'static str {
    r#"
templates:
  darkvision:
    type: trait
    name: Darkvision
    description: "See in the dark up to {range} feet"
  elf_weapons:
    type: proficiency
    name: Weapon Proficiency
    weapons: [longsword, shortsword, shortbow, longbow]

races:
  elf:
    name: Elf
    description: "Elves are a magical people. They live long lives. They love nature."
    bonuses:
      dexterity: 2
    features:
      - template: darkvision
        range: 60
      - template: elf_weapons
      - type: trait
        name: Trance
        description: Elves meditate instead of sleeping
      - type: language
        name: Languages
        description: You speak Common and Elvish
        languages:
          base: [common, elvish]
          choice: 0
    subraces:
      high_elf:
        name: High Elf
        bonuses:
          intelligence: 1
        features:
          - template: elf_weapons
          - type: language
            name: Extra Language
            description: One extra language
            languages:
              base: [common, elvish]
              choice: 1
          - type: spell
            name: Cantrip
            description: One wizard cantrip
            spells: light
      wood_elf:
        name: Wood Elf
        bonuses:
          wisdom: "1"
        features:
          - template: elf_weapons
            name: Elf Weapon Training
            weapons: [longsword, shortsword, shortbow, longbow, spear]
          - type: trait
            name: Trance
            description: Same as the parent
  dwarf:
    name: Dwarf
    description: Bold and hardy.
    bonuses:
      constitution: 2
      luck: 5
    features:
      - template: darkvision
        range: 60
      - template: tremorsense
"#
}

/// Parsed form of [`races_yaml`].
pub fn race_catalog() -> Value {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(races_yaml()).expect("fixture catalog is valid YAML");
    serde_json::to_value(yaml).expect("fixture catalog converts to JSON")
}

pub mod documents {
    //! Pre-populated in-memory stores.

    use super::*;
    use crate::infrastructure::documents::InMemoryDocumentStore;
    use crate::infrastructure::settings::EngineConfig;

    /// Config rooted at `data` with the given language.
    pub fn config(language: &str) -> EngineConfig {
        EngineConfig::new("data", language)
    }

    /// Store holding the base localization at the configured path.
    pub fn store_with_base() -> InMemoryDocumentStore {
        InMemoryDocumentStore::new()
            .with_document(config("en").base_localization_path(), base_localization())
    }

    /// Store holding the race catalog at the configured path.
    pub fn store_with_races() -> InMemoryDocumentStore {
        InMemoryDocumentStore::new()
            .with_document(config("en").race_catalog_path(), race_catalog())
    }
}
