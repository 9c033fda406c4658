//! # rostercost - Deterministic Point Costing for Wargame Rosters
//!
//! A costing engine for tabletop wargame roster data that provides:
//! - **Rule pricing** from free text (keyword and number heuristics)
//! - **Tiered costs**: every rule carries three increasing price points
//! - **Weapon pricing** straight from range, attacks and AP
//! - **Unit totals** that tolerate dangling references
//!
//! ## Core Concepts
//!
//! ### Rule Pipeline
//!
//! ```text
//! [name + description] → [TextClassifier] → [RuleEffectiveness] → [formula] → [t1, t2, t3]
//! ```
//!
//! 1. The **classifier** labels text with a power level and a usage frequency
//! 2. The **formula** turns that label into three tier costs in `[1, 75]`
//!
//! ### Unit Aggregation
//!
//! A unit's total is its stat cost plus the tier costs of everything it
//! references, fetched through a [`ReferenceResolver`]. Aggregation is
//! best-effort (missing references count as zero and are reported in the
//! breakdown); population for display is strict and fails on the first
//! missing reference.
//!
//! ## Example
//!
//! ```rust
//! use rostercost::*;
//!
//! let calculator = PointsCalculator::new();
//!
//! let mut catalog = InMemoryCatalog::new();
//! let hide = calculator.recalculate(&Rule::new("hide", "Toughened Hide", "", [0, 0, 0]));
//! assert_eq!(hide.points, [4, 5, 6]);
//! catalog.insert_rule(hide);
//!
//! let mut claws = Weapon::new("claws", "Claws", WeaponType::Melee);
//! claws.attacks = "2".into();
//! claws.ap = "3".into();
//! claws.points = calculator.weapon_points(&claws);
//! catalog.insert_weapon(claws);
//!
//! let mut unit = Unit::new("beasts", "Beasts").with_stats(3, 3, 7, 3).with_amount(5);
//! unit.rules.push(RuleReference::new("hide", 2));
//! unit.weapons.push(WeaponReference::new("claws", 5, WeaponType::Melee));
//!
//! let breakdown = calculate_unit_points(&unit, &catalog);
//! assert_eq!(breakdown.base_cost, 42);
//! assert_eq!(breakdown.unit_rules_cost, 25); // tier 2 = 5, × 5 models
//! assert_eq!(breakdown.weapons_cost, 10); // 2 points × 5 carried
//! assert_eq!(breakdown.total_points, 77);
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Stored entities (rules, weapons, wargear, units)
//! - [`classifier`] - Rule text classification
//! - [`formula`] - Tiered point formula
//! - [`weapon_cost`] - Weapon stat cost model
//! - [`resolver`] - Reference lookup capability
//! - [`aggregator`] - Unit cost aggregation
//! - [`populate`] - Resolved views for display
//! - [`graph`] - Reference impact graph
//! - [`calculator`] - Administrator-facing entry point
//! - [`error`] - Error types

pub mod aggregator;
pub mod breakdown;
pub mod calculator;
pub mod classifier;
pub mod config;
pub mod entity_id;
pub mod error;
pub mod formula;
pub mod graph;
pub mod model;
pub mod populate;
pub mod resolver;
pub mod weapon_cost;

// Re-export main types for convenience
pub use calculator::{PointsCalculator, RecalculationImpact};
pub use config::ClassifierConfig;
pub use entity_id::EntityId;
pub use error::CostError;
pub use graph::{EntityRef, ReferenceGraph};
pub use resolver::{InMemoryCatalog, ReferenceResolver};

// Re-export the data model
pub use model::{
    EntityKind, Rule, RuleReference, TierCosts, Unit, WarGear, Weapon, WeaponReference,
    WeaponType,
};

// Re-export the pure components
pub use classifier::{BaseEffectiveness, Frequency, RuleEffectiveness, TextClassifier};
pub use formula::{calculate_points, RulePointsBreakdown};
pub use weapon_cost::{calculate_weapon_points, WeaponCostBreakdown, WeaponStats};

// Re-export aggregation and population
pub use aggregator::{calculate_unit_points, UnitCostAggregator};
pub use breakdown::{CostCategory, CostLine, SkippedReference, UnitPointsBreakdown};
pub use populate::{
    calculate_total_points, populate_unit, populate_wargear, populate_weapon, PopulatedUnit,
    PopulatedWarGear, PopulatedWeapon, RuleWithTier,
};
