//! Roster data model.
//!
//! These are the stored entities the costing engine reads. They are created
//! and edited by the persistence layer; the engine only ever computes derived
//! numbers from them and never mutates what it was handed.

use crate::entity_id::EntityId;
use serde::{Deserialize, Serialize};

/// The three preset costs of a rule, tier 1 through tier 3.
pub type TierCosts = [i32; 3];

/// Lowest selectable rule tier.
pub const MIN_TIER: i32 = 1;

/// Highest selectable rule tier.
pub const MAX_TIER: i32 = 3;

/// Map a tier to an index into [`TierCosts`].
///
/// Tiers outside `1..=3` fall back to tier 1 rather than being rejected.
///
/// # Examples
///
/// ```rust
/// use rostercost::model::tier_index;
///
/// assert_eq!(tier_index(1), 0);
/// assert_eq!(tier_index(3), 2);
/// assert_eq!(tier_index(0), 0);
/// assert_eq!(tier_index(7), 0);
/// ```
pub fn tier_index(tier: i32) -> usize {
    if (MIN_TIER..=MAX_TIER).contains(&tier) {
        (tier - MIN_TIER) as usize
    } else {
        0
    }
}

/// The kinds of stored entity the engine deals with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Rule,
    Weapon,
    WarGear,
    Unit,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EntityKind::Rule => "rule",
            EntityKind::Weapon => "weapon",
            EntityKind::WarGear => "wargear",
            EntityKind::Unit => "unit",
        })
    }
}

/// A game rule with its three tier costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free-form category label; folded into the classifier text when present.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
    pub points: TierCosts,
}

impl Rule {
    /// A rule with explicit tier costs.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        description: impl Into<String>,
        points: TierCosts,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            rule_type: None,
            points,
        }
    }

    /// Cost of this rule at `tier`, with out-of-range tiers read as tier 1.
    pub fn cost_at(&self, tier: i32) -> i32 {
        self.points[tier_index(tier)]
    }
}

/// A rule attached to something else, at a chosen tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleReference {
    pub rule_id: EntityId,
    #[serde(default = "default_tier")]
    pub tier: i32,
}

impl RuleReference {
    /// Reference `rule_id` at `tier`. The tier is stored as given.
    pub fn new(rule_id: impl Into<EntityId>, tier: i32) -> Self {
        Self {
            rule_id: rule_id.into(),
            tier,
        }
    }
}

fn default_tier() -> i32 {
    MIN_TIER
}

/// Whether a weapon is used in close combat or at range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    #[serde(alias = "melee")]
    Melee,
    #[serde(alias = "ranged")]
    Ranged,
}

impl WeaponType {
    /// Stored label, `"Melee"` or `"Ranged"`.
    pub fn as_str(self) -> &'static str {
        match self {
            WeaponType::Melee => "Melee",
            WeaponType::Ranged => "Ranged",
        }
    }
}

impl std::fmt::Display for WeaponType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weapon profile.
///
/// `ap` and `attacks` are kept as text because stored profiles use values
/// like `"X"` or `"3+"` that are not plain integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub weapon_type: WeaponType,
    #[serde(default)]
    pub range: i32,
    #[serde(default)]
    pub ap: String,
    #[serde(default)]
    pub attacks: String,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub rules: Vec<RuleReference>,
}

impl Weapon {
    /// A rule-free, zero-point profile with one attack and no AP.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, weapon_type: WeaponType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            weapon_type,
            range: 0,
            ap: String::from("0"),
            attacks: String::from("1"),
            points: 0,
            rules: Vec::new(),
        }
    }
}

/// A wargear item. Its cost to a unit comes entirely from its rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarGear {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub rules: Vec<RuleReference>,
}

impl WarGear {
    /// An item with no description, points or rules.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            points: 0,
            rules: Vec::new(),
        }
    }
}

/// A weapon carried by some of a unit's models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponReference {
    pub weapon_id: EntityId,
    /// Number of models carrying the weapon.
    #[serde(default = "default_count")]
    pub quantity: i32,
    #[serde(rename = "type")]
    pub weapon_type: WeaponType,
}

impl WeaponReference {
    /// Equip `quantity` of `weapon_id`.
    pub fn new(weapon_id: impl Into<EntityId>, quantity: i32, weapon_type: WeaponType) -> Self {
        Self {
            weapon_id: weapon_id.into(),
            quantity,
            weapon_type,
        }
    }
}

fn default_count() -> i32 {
    1
}

/// A unit entry: combat stats, model count and everything it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub melee: i32,
    #[serde(default)]
    pub ranged: i32,
    #[serde(default)]
    pub morale: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub points: i32,
    /// Model count; multiplies every per-model cost.
    #[serde(default = "default_count")]
    pub amount: i32,
    #[serde(default = "default_count")]
    pub max: i32,
    #[serde(default)]
    pub rules: Vec<RuleReference>,
    #[serde(default)]
    pub weapons: Vec<WeaponReference>,
    #[serde(rename = "warGear", default)]
    pub wargear: Vec<EntityId>,
    #[serde(default)]
    pub available_weapons: Vec<EntityId>,
    #[serde(rename = "availableWarGear", default)]
    pub available_wargear: Vec<EntityId>,
}

impl Unit {
    /// A single-model unit with zeroed stats and no references.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            melee: 0,
            ranged: 0,
            morale: 0,
            defense: 0,
            points: 0,
            amount: 1,
            max: 1,
            rules: Vec::new(),
            weapons: Vec::new(),
            wargear: Vec::new(),
            available_weapons: Vec::new(),
            available_wargear: Vec::new(),
        }
    }

    /// Set the four combat stats.
    pub fn with_stats(mut self, melee: i32, ranged: i32, morale: i32, defense: i32) -> Self {
        self.melee = melee;
        self.ranged = ranged;
        self.morale = morale;
        self.defense = defense;
        self
    }

    /// Set the model count.
    pub fn with_amount(mut self, amount: i32) -> Self {
        self.amount = amount;
        self
    }
}
