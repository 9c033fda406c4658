//! Points calculator.
//!
//! [`PointsCalculator`] is the entry point an administrator-facing service
//! uses: it classifies rule text, turns the result into tier costs and hands
//! back recalculated copies of rules for the caller to persist.

use crate::aggregator::UnitCostAggregator;
use crate::breakdown::UnitPointsBreakdown;
use crate::classifier::{RuleEffectiveness, TextClassifier};
use crate::config::ClassifierConfig;
use crate::entity_id::EntityId;
use crate::error::CostError;
use crate::formula::{self, RulePointsBreakdown};
use crate::graph::ReferenceGraph;
use crate::model::{Rule, TierCosts, Unit, Weapon};
use crate::resolver::ReferenceResolver;
use crate::weapon_cost::{WeaponCostBreakdown, WeaponStats};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A recalculated rule together with the units whose totals it moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalculationImpact {
    pub rule: Rule,
    pub previous_points: TierCosts,
    /// Empty when the tiers did not change.
    pub affected_units: Vec<EntityId>,
}

impl RecalculationImpact {
    /// Whether recalculation moved any tier.
    pub fn changed(&self) -> bool {
        self.previous_points != self.rule.points
    }
}

/// Classifier plus formulas.
///
/// Stateless apart from its keyword tables; cheap to share behind an `Arc`.
///
/// # Examples
///
/// ```rust
/// use rostercost::{PointsCalculator, Rule};
///
/// let calculator = PointsCalculator::new();
/// let rule = Rule::new("r1", "Stealth", "Harder to hit at range", [9, 9, 9]);
///
/// let updated = calculator.recalculate(&rule);
/// assert_eq!(updated.points, calculator.rule_points(&rule));
/// assert_eq!(rule.points, [9, 9, 9]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PointsCalculator {
    classifier: TextClassifier,
}

impl PointsCalculator {
    /// Calculator with the default keyword tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculator with custom keyword tables.
    pub fn with_config(config: ClassifierConfig) -> Result<Self, CostError> {
        Ok(Self {
            classifier: TextClassifier::with_config(config)?,
        })
    }

    /// The classifier used for rule text.
    pub fn classifier(&self) -> &TextClassifier {
        &self.classifier
    }

    /// Tier costs for an already classified rule.
    pub fn calculate_points(&self, effectiveness: &RuleEffectiveness) -> TierCosts {
        formula::calculate_points(effectiveness)
    }

    /// Classify free text and price it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rostercost::PointsCalculator;
    ///
    /// let calculator = PointsCalculator::new();
    /// // "tough" is both a strong and a passive keyword
    /// assert_eq!(calculator.calculate_points_from_description("Toughened Hide", "", None), [4, 5, 6]);
    /// ```
    pub fn calculate_points_from_description(
        &self,
        name: &str,
        description: &str,
        rule_type: Option<&str>,
    ) -> TierCosts {
        let effectiveness = self.classifier.classify(name, description, rule_type);
        formula::calculate_points(&effectiveness)
    }

    /// What the classifier makes of a stored rule.
    pub fn rule_effectiveness(&self, rule: &Rule) -> RuleEffectiveness {
        self.classifier
            .classify(&rule.name, &rule.description, rule.rule_type.as_deref())
    }

    /// Fresh tier costs for a stored rule.
    pub fn rule_points(&self, rule: &Rule) -> TierCosts {
        formula::calculate_points(&self.rule_effectiveness(rule))
    }

    /// Every step of the formula for a stored rule.
    pub fn breakdown(&self, rule: &Rule) -> RulePointsBreakdown {
        RulePointsBreakdown::compute(&self.rule_effectiveness(rule))
    }

    /// A copy of `rule` with recalculated points.
    pub fn recalculate(&self, rule: &Rule) -> Rule {
        let points = self.rule_points(rule);
        debug!(
            rule = %rule.id,
            previous = ?rule.points,
            points = ?points,
            "recalculated rule points"
        );
        Rule {
            points,
            ..rule.clone()
        }
    }

    /// Recalculate many rules, keeping their order.
    pub fn bulk_recalculate(&self, rules: &[Rule]) -> Vec<Rule> {
        rules.iter().map(|rule| self.recalculate(rule)).collect()
    }

    /// A copy of `rule` priced from a hand-chosen effectiveness.
    pub fn calculate_points_with(&self, rule: &Rule, effectiveness: &RuleEffectiveness) -> Rule {
        let points = formula::calculate_points(effectiveness);
        debug!(
            rule = %rule.id,
            base_value = %effectiveness.base_value,
            frequency = %effectiveness.frequency,
            multiplier = effectiveness.multiplier,
            previous = ?rule.points,
            points = ?points,
            "priced rule from explicit effectiveness"
        );
        Rule {
            points,
            ..rule.clone()
        }
    }

    /// Recalculate a rule and report which units' totals it moves.
    pub fn recalculate_with_impact(&self, rule: &Rule, graph: &ReferenceGraph) -> RecalculationImpact {
        let updated = self.recalculate(rule);
        let affected_units = if updated.points == rule.points {
            Vec::new()
        } else {
            graph.affected_units(&rule.id)
        };
        RecalculationImpact {
            previous_points: rule.points,
            rule: updated,
            affected_units,
        }
    }

    /// Base cost of a stored weapon profile.
    pub fn weapon_points(&self, weapon: &Weapon) -> i32 {
        self.weapon_breakdown(&WeaponStats::from(weapon)).calculated_points
    }

    /// Every step of the weapon model for a profile.
    pub fn weapon_breakdown(&self, stats: &WeaponStats) -> WeaponCostBreakdown {
        WeaponCostBreakdown::compute(stats)
    }

    /// Cost a unit through `resolver`. Dangling references are skipped.
    pub fn unit_points<R: ReferenceResolver + ?Sized>(&self, unit: &Unit, resolver: &R) -> UnitPointsBreakdown {
        UnitCostAggregator::new(resolver).calculate_unit_points(unit)
    }
}
