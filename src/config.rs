//! Classifier configuration.
//!
//! `ClassifierConfig` carries every keyword table and threshold the text
//! classifier uses. The defaults are the tuned production tables; a JSON
//! document can override any subset of fields.
//!
//! Keyword lists are matched by plain substring containment and each list
//! entry counts once when it matches, so an entry listed twice counts twice.

use crate::error::CostError;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Keyword tables and thresholds for rule text classification.
///
/// # Examples
///
/// ```rust
/// use rostercost::ClassifierConfig;
///
/// let config = ClassifierConfig::from_json_str(r#"{"overpoweredNumber": 30}"#).unwrap();
/// assert_eq!(config.overpowered_number, 30);
/// // Everything not named keeps its default.
/// assert_eq!(config.strong_number, 10);
/// assert!(!config.passive_keywords.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifierConfig {
    pub overpowered_keywords: Vec<String>,
    pub strong_keywords: Vec<String>,
    pub moderate_keywords: Vec<String>,
    pub minimal_keywords: Vec<String>,

    pub passive_keywords: Vec<String>,
    pub limited_keywords: Vec<String>,
    pub frequent_keywords: Vec<String>,

    /// Largest number in the text at or above this forces `overpowered`.
    pub overpowered_number: i64,
    /// Largest number in the text at or above this forces `strong`.
    pub strong_number: i64,
    /// Largest number in the text at or above this forces `moderate`.
    pub moderate_number: i64,

    pub min_multiplier: f64,
    pub max_multiplier: f64,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            overpowered_keywords: words(&[
                "immune to all", "ignore all", "unlimited", "automatic", "always pass",
                "cannot be", "immune to", "invulnerable to", "eternal", "immortal",
                "unbreakable", "unstoppable", "overpowered", "broken", "overpowered",
                "win the game", "instant win", "guaranteed", "certain", "absolute",
                "eternal warrior", "immortal", "unbreakable", "unstoppable",
            ]),
            strong_keywords: words(&[
                "invulnerable save", "feel no pain", "eternal warrior", "fearless",
                "preferred enemy", "hate", "rage", "furious charge", "counter-attack",
                "stubborn", "unbreakable", "stealth", "concealed", "hidden",
                "regeneration", "tough", "hardy", "resilient", "durable", "sturdy",
                "ward save", "shield", "protection", "armour", "cover", "concealment",
                "preferred enemy", "hate", "rage", "furious charge", "counter-attack",
                "psychic", "magic", "warp", "soul", "spirit", "ethereal",
                "phase", "teleport", "deep strike", "outflank", "infiltrate",
            ]),
            moderate_keywords: words(&[
                "all friendly", "all units", "within", "range", "distance", "inches",
                "leadership", "morale", "fear", "terror", "awe", "inspiring",
                "command", "officer", "sergeant", "leader", "commander", "captain",
                "lieutenant", "major", "colonel", "general", "marshal", "lord",
                "reroll", "rerolls", "bonus", "penalty", "modifier", "adjustment",
                "difficult", "dangerous", "hazardous", "perilous", "challenging",
                "fearless", "stubborn", "unbreakable", "stealth", "concealed",
            ]),
            minimal_keywords: words(&[
                "+1", "+2", "+3", "-1", "-2", "-3", "bonus", "penalty", "modifier",
                "reroll", "rerolls", "dice", "roll", "rolls", "d6", "d3", "2d6", "3d6",
                "hit", "wound", "save", "armour", "cover", "concealment", "stealth",
                "move", "movement", "advance", "charge", "assault", "close combat",
                "melee", "shooting", "ranged", "fire", "shoot", "gun", "weapon",
                "if", "when", "unless", "but", "however", "except", "provided",
            ]),
            passive_keywords: words(&[
                "always", "permanent", "constant", "immune", "invulnerable",
                "fearless", "stubborn", "unbreakable", "eternal", "stealth",
                "concealed", "hidden", "camouflage", "feel no pain", "regeneration",
                "tough", "hardy", "resilient", "durable", "sturdy", "save",
                "ward", "shield", "protection", "armour", "cover", "concealment",
            ]),
            limited_keywords: words(&[
                "once per game", "once per turn", "once per battle",
                "limited", "restricted", "conditional", "when", "if",
                "unless", "but", "however", "except", "requires",
            ]),
            frequent_keywords: words(&[
                "every turn", "each turn", "per turn", "frequently",
                "often", "regular", "common", "standard", "basic",
            ]),
            overpowered_number: 20,
            strong_number: 10,
            moderate_number: 6,
            min_multiplier: 0.1,
            max_multiplier: 2.0,
        }
    }
}

impl ClassifierConfig {
    /// Parse a JSON override document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CostError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CostError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config.normalized())
    }

    /// Parse a JSON override document from any reader (e.g. an open file).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CostError> {
        let config: Self =
            serde_json::from_reader(reader).map_err(|e| CostError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config.normalized())
    }

    /// Lower-case every keyword so it can match the lower-cased rule text.
    pub fn normalized(mut self) -> Self {
        for list in [
            &mut self.overpowered_keywords,
            &mut self.strong_keywords,
            &mut self.moderate_keywords,
            &mut self.minimal_keywords,
            &mut self.passive_keywords,
            &mut self.limited_keywords,
            &mut self.frequent_keywords,
        ] {
            for keyword in list.iter_mut() {
                *keyword = keyword.to_lowercase();
            }
        }
        self
    }

    /// Check that the multiplier bounds form a usable range.
    pub fn validate(&self) -> Result<(), CostError> {
        if !self.min_multiplier.is_finite() || !self.max_multiplier.is_finite() {
            return Err(CostError::InvalidConfig(
                "multiplier bounds must be finite".into(),
            ));
        }
        if self.min_multiplier > self.max_multiplier {
            return Err(CostError::InvalidConfig(format!(
                "minMultiplier {} exceeds maxMultiplier {}",
                self.min_multiplier, self.max_multiplier
            )));
        }
        Ok(())
    }
}
