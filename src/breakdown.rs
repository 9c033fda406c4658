//! Unit cost breakdown.
//!
//! Contains `UnitPointsBreakdown`, the result of costing a unit: the five
//! component subtotals, the total, and an ordered list of the line items
//! that produced them.

use crate::entity_id::EntityId;
use crate::model::EntityKind;
use serde::{Deserialize, Serialize};

/// Which subtotal a line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Base,
    UnitRule,
    Weapon,
    WeaponRule,
    Wargear,
}

/// One contribution to a unit's total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLine {
    pub category: CostCategory,
    pub description: String,
    pub points: i32,
}

/// A reference that could not be resolved and so contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedReference {
    pub kind: EntityKind,
    pub id: EntityId,
    pub reason: String,
}

/// The cost of a unit, split by component.
///
/// `total_points` is always the sum of the five subtotals, and each subtotal
/// is the sum of its line items. Both sums saturate at the `i32` bounds.
///
/// # Examples
///
/// ```rust
/// use rostercost::breakdown::{CostCategory, UnitPointsBreakdown};
///
/// let mut breakdown = UnitPointsBreakdown::new();
/// breakdown.add_line(CostCategory::Base, "Base stats", 42);
/// breakdown.add_line(CostCategory::UnitRule, "Stealth (tier 1) x5", 10);
///
/// assert_eq!(breakdown.base_cost, 42);
/// assert_eq!(breakdown.unit_rules_cost, 10);
/// assert_eq!(breakdown.total_points, 52);
/// assert_eq!(breakdown.line_items.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPointsBreakdown {
    pub base_cost: i32,
    pub unit_rules_cost: i32,
    pub weapons_cost: i32,
    pub weapon_rules_cost: i32,
    pub wargear_cost: i32,
    pub total_points: i32,

    /// Contributions in the order they were computed.
    #[serde(default)]
    pub line_items: Vec<CostLine>,

    /// Dangling references left out of the total.
    #[serde(default)]
    pub skipped: Vec<SkippedReference>,
}

impl UnitPointsBreakdown {
    /// An empty breakdown with every subtotal at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a contribution and fold it into its subtotal and the total.
    pub fn add_line(&mut self, category: CostCategory, description: impl Into<String>, points: i32) {
        let subtotal = match category {
            CostCategory::Base => &mut self.base_cost,
            CostCategory::UnitRule => &mut self.unit_rules_cost,
            CostCategory::Weapon => &mut self.weapons_cost,
            CostCategory::WeaponRule => &mut self.weapon_rules_cost,
            CostCategory::Wargear => &mut self.wargear_cost,
        };
        *subtotal = subtotal.saturating_add(points);
        self.total_points = self.subtotal_sum();
        self.line_items.push(CostLine {
            category,
            description: description.into(),
            points,
        });
    }

    /// Saturating sum of the five subtotals.
    fn subtotal_sum(&self) -> i32 {
        [
            self.unit_rules_cost,
            self.weapons_cost,
            self.weapon_rules_cost,
            self.wargear_cost,
        ]
        .iter()
        .fold(self.base_cost, |acc, v| acc.saturating_add(*v))
    }

    /// Record a reference that was skipped.
    pub fn add_skipped(&mut self, kind: EntityKind, id: EntityId, reason: impl Into<String>) {
        self.skipped.push(SkippedReference {
            kind,
            id,
            reason: reason.into(),
        });
    }

    /// Whether every reference resolved.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Line items belonging to one category.
    pub fn lines(&self, category: CostCategory) -> impl Iterator<Item = &CostLine> {
        self.line_items.iter().filter(move |l| l.category == category)
    }
}
