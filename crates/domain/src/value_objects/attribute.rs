//! Attribute value object - the six canonical ability scores.
//!
//! Racial bonus tables are keyed by these names. Catalog documents use the
//! lowercase full names (`strength`, `dexterity`, ...); anything else is not an
//! attribute and gets filtered out during parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// One of the six canonical ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    /// Strength - physical power
    Strength,
    /// Dexterity - agility and reflexes
    Dexterity,
    /// Constitution - endurance and health
    Constitution,
    /// Intelligence - reasoning and memory
    Intelligence,
    /// Wisdom - perception and insight
    Wisdom,
    /// Charisma - force of personality
    Charisma,
}

impl Attribute {
    /// Returns the catalog key (e.g., "strength").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
            Self::Intelligence => "intelligence",
            Self::Wisdom => "wisdom",
            Self::Charisma => "charisma",
        }
    }

    /// Returns the short uppercase abbreviation (e.g., "STR").
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    /// Localization key for the attribute's display name.
    pub fn localization_key(&self) -> String {
        format!("attributes.{}", self.as_str())
    }

    /// Returns all six attributes in sheet order.
    pub fn all() -> [Attribute; 6] {
        [
            Self::Strength,
            Self::Dexterity,
            Self::Constitution,
            Self::Intelligence,
            Self::Wisdom,
            Self::Charisma,
        ]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Exact catalog keys only. Bonus tables in data files are case-sensitive.
impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strength" => Ok(Self::Strength),
            "dexterity" => Ok(Self::Dexterity),
            "constitution" => Ok(Self::Constitution),
            "intelligence" => Ok(Self::Intelligence),
            "wisdom" => Ok(Self::Wisdom),
            "charisma" => Ok(Self::Charisma),
            _ => Err(DomainError::parse(format!("Unknown attribute: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_from_str() {
        assert_eq!(Attribute::from_str("strength"), Ok(Attribute::Strength));
        assert_eq!(Attribute::from_str("charisma"), Ok(Attribute::Charisma));
        assert!(Attribute::from_str("Strength").is_err());
        assert!(Attribute::from_str("luck").is_err());
        assert!(Attribute::from_str("STR").is_err());
    }

    #[test]
    fn test_attribute_round_trips_through_display() {
        for attr in Attribute::all() {
            assert_eq!(Attribute::from_str(&attr.to_string()), Ok(attr));
        }
    }

    #[test]
    fn test_attribute_serde_uses_catalog_keys() {
        let json = serde_json::to_string(&Attribute::Dexterity).unwrap();
        assert_eq!(json, "\"dexterity\"");
        let parsed: Attribute = serde_json::from_str("\"wisdom\"").unwrap();
        assert_eq!(parsed, Attribute::Wisdom);
    }

    #[test]
    fn test_abbreviation_and_localization_key() {
        assert_eq!(Attribute::Constitution.abbreviation(), "CON");
        assert_eq!(
            Attribute::Intelligence.localization_key(),
            "attributes.intelligence"
        );
    }
}
