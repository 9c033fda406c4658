//! Unit cost aggregation.
//!
//! Sums a unit's cost from its stats and everything it references:
//!
//! ```text
//! base          = max(5, (melee + ranged + morale + defense) × 2 + 10)
//! unit rules    = Σ rule tier cost                     × amount
//! weapons       = Σ weapon points                      × weapon quantity
//! weapon rules  = Σ Σ rule tier cost (per weapon)      × amount
//! wargear       = Σ Σ rule tier cost (per wargear)     × amount
//! ```
//!
//! Weapon rules scale with the unit's model count, not with how many models
//! carry the weapon. Aggregation is best-effort: a reference that does not
//! resolve is logged, recorded in [`UnitPointsBreakdown::skipped`] and
//! contributes nothing.

use crate::breakdown::{CostCategory, UnitPointsBreakdown};
use crate::model::{EntityKind, RuleReference, Unit};
use crate::resolver::ReferenceResolver;
use tracing::{debug, warn};

/// Smallest base cost a unit can have.
pub const MIN_BASE_COST: i32 = 5;

/// Cost of a unit's combat stats alone.
///
/// # Examples
///
/// ```rust
/// use rostercost::aggregator::base_cost;
///
/// assert_eq!(base_cost(3, 3, 7, 3), 42);
/// assert_eq!(base_cost(-5, -5, 0, 0), 5);
/// ```
pub fn base_cost(melee: i32, ranged: i32, morale: i32, defense: i32) -> i32 {
    let stat_sum = melee
        .saturating_add(ranged)
        .saturating_add(morale)
        .saturating_add(defense);
    stat_sum
        .saturating_mul(2)
        .saturating_add(10)
        .max(MIN_BASE_COST)
}

/// Costs units through a [`ReferenceResolver`].
///
/// # Examples
///
/// ```rust
/// use rostercost::{InMemoryCatalog, Rule, RuleReference, Unit, UnitCostAggregator};
///
/// let mut catalog = InMemoryCatalog::new();
/// catalog.insert_rule(Rule::new("stealth", "Stealth", "", [2, 3, 4]));
///
/// let mut unit = Unit::new("u1", "Scouts").with_stats(3, 3, 7, 3).with_amount(5);
/// unit.rules.push(RuleReference::new("stealth", 2));
/// unit.rules.push(RuleReference::new("deleted", 1));
///
/// let breakdown = UnitCostAggregator::new(&catalog).calculate_unit_points(&unit);
/// assert_eq!(breakdown.base_cost, 42);
/// assert_eq!(breakdown.unit_rules_cost, 15);
/// assert_eq!(breakdown.total_points, 57);
/// assert_eq!(breakdown.skipped.len(), 1);
/// ```
pub struct UnitCostAggregator<R> {
    resolver: R,
}

impl<R: ReferenceResolver> UnitCostAggregator<R> {
    /// Aggregator reading references through `resolver`.
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// The resolver references are looked up through.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Cost a unit. Never fails; dangling references are skipped.
    pub fn calculate_unit_points(&self, unit: &Unit) -> UnitPointsBreakdown {
        let mut breakdown = UnitPointsBreakdown::new();
        let amount = unit.amount;

        breakdown.add_line(
            CostCategory::Base,
            format!(
                "Base stats (melee {}, ranged {}, morale {}, defense {})",
                unit.melee, unit.ranged, unit.morale, unit.defense
            ),
            base_cost(unit.melee, unit.ranged, unit.morale, unit.defense),
        );

        for reference in &unit.rules {
            self.add_rule(&mut breakdown, unit, reference, CostCategory::UnitRule, None);
        }

        for weapon_ref in &unit.weapons {
            let weapon = match self.resolver.weapon_by_id(&weapon_ref.weapon_id) {
                Ok(weapon) => weapon,
                Err(err) => {
                    warn!(
                        unit = %unit.id,
                        weapon = %weapon_ref.weapon_id,
                        error = %err,
                        "skipping unresolved weapon reference"
                    );
                    breakdown.add_skipped(EntityKind::Weapon, weapon_ref.weapon_id.clone(), err.to_string());
                    continue;
                }
            };

            breakdown.add_line(
                CostCategory::Weapon,
                format!("{} x{}", weapon.name, weapon_ref.quantity),
                weapon.points.saturating_mul(weapon_ref.quantity),
            );

            for reference in &weapon.rules {
                self.add_rule(
                    &mut breakdown,
                    unit,
                    reference,
                    CostCategory::WeaponRule,
                    Some(&weapon.name),
                );
            }
        }

        for wargear_id in &unit.wargear {
            let wargear = match self.resolver.wargear_by_id(wargear_id) {
                Ok(wargear) => wargear,
                Err(err) => {
                    warn!(
                        unit = %unit.id,
                        wargear = %wargear_id,
                        error = %err,
                        "skipping unresolved wargear reference"
                    );
                    breakdown.add_skipped(EntityKind::WarGear, wargear_id.clone(), err.to_string());
                    continue;
                }
            };

            for reference in &wargear.rules {
                self.add_rule(
                    &mut breakdown,
                    unit,
                    reference,
                    CostCategory::Wargear,
                    Some(&wargear.name),
                );
            }
        }

        debug!(
            unit = %unit.id,
            amount,
            base = breakdown.base_cost,
            unit_rules = breakdown.unit_rules_cost,
            weapons = breakdown.weapons_cost,
            weapon_rules = breakdown.weapon_rules_cost,
            wargear = breakdown.wargear_cost,
            total = breakdown.total_points,
            skipped = breakdown.skipped.len(),
            "calculated unit points"
        );

        breakdown
    }

    /// Resolve one rule reference and add its per-model cost.
    fn add_rule(
        &self,
        breakdown: &mut UnitPointsBreakdown,
        unit: &Unit,
        reference: &RuleReference,
        category: CostCategory,
        holder: Option<&str>,
    ) {
        match self.resolver.rule_by_id(&reference.rule_id) {
            Ok(rule) => {
                let cost = rule.cost_at(reference.tier).saturating_mul(unit.amount);
                let description = match holder {
                    Some(holder) => format!(
                        "{}: {} (tier {}) x{}",
                        holder, rule.name, reference.tier, unit.amount
                    ),
                    None => format!("{} (tier {}) x{}", rule.name, reference.tier, unit.amount),
                };
                breakdown.add_line(category, description, cost);
            }
            Err(err) => {
                warn!(
                    unit = %unit.id,
                    rule = %reference.rule_id,
                    holder = holder.unwrap_or("unit"),
                    error = %err,
                    "skipping unresolved rule reference"
                );
                breakdown.add_skipped(EntityKind::Rule, reference.rule_id.clone(), err.to_string());
            }
        }
    }
}

/// Cost a unit with a one-off aggregator.
pub fn calculate_unit_points<R: ReferenceResolver + ?Sized>(
    unit: &Unit,
    resolver: &R,
) -> UnitPointsBreakdown {
    UnitCostAggregator::new(resolver).calculate_unit_points(unit)
}
