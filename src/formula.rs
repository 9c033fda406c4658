//! Tiered point formula.
//!
//! Converts a [`RuleEffectiveness`] into three tier costs. The pipeline is
//! deterministic and total:
//!
//! ```text
//! weight(base) × multiplier × discount(frequency) → score
//! 2^((score − 1) / 2) clamped to [1, 75]          → base points
//! base × {1.0, 1.1, 1.21}, rounded                 → tiers
//! ```
//!
//! Tiers are pushed apart so each is at least one point above the previous,
//! then each is capped at 75 individually. At the cap the tiers may coincide.

use crate::classifier::{BaseEffectiveness, Frequency, RuleEffectiveness};
use crate::model::TierCosts;
use serde::{Deserialize, Serialize};

/// Lowest cost any tier can have.
pub const MIN_RULE_POINTS: i32 = 1;

/// Highest cost any tier can have.
pub const MAX_RULE_POINTS: i32 = 75;

/// Tier 2 cost relative to tier 1.
pub const TIER_2_SCALE: f64 = 1.1;

/// Tier 3 cost relative to tier 1.
pub const TIER_3_SCALE: f64 = 1.21;

const MIN_MULTIPLIER: f64 = 0.1;
const MAX_MULTIPLIER: f64 = 2.0;

/// Weight of each effectiveness level.
pub fn base_weight(base_value: BaseEffectiveness) -> f64 {
    match base_value {
        BaseEffectiveness::Minimal => 1.0,
        BaseEffectiveness::Moderate => 3.0,
        BaseEffectiveness::Strong => 5.0,
        BaseEffectiveness::Overpowered => 8.0,
    }
}

/// Discount applied for how often a rule can be used.
///
/// Anything that is not passive or limited is priced as conditional.
pub fn frequency_multiplier(frequency: Frequency) -> f64 {
    match frequency {
        Frequency::Passive => 1.0,
        Frequency::Limited => 0.4,
        Frequency::Conditional | Frequency::Frequent => 0.7,
    }
}

/// Clamp a caller-supplied multiplier into `[0.1, 2.0]`; NaN reads as 1.0.
fn sanitize_multiplier(multiplier: f64) -> f64 {
    if multiplier.is_nan() {
        1.0
    } else {
        multiplier.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)
    }
}

/// Compute the three tier costs for a rule.
///
/// # Examples
///
/// ```rust
/// use rostercost::{calculate_points, BaseEffectiveness, Frequency, RuleEffectiveness};
///
/// let eff = RuleEffectiveness::new(BaseEffectiveness::Moderate, 1.0, Frequency::Conditional);
/// // score 3.0 × 1.0 × 0.7 = 2.1, base 2^0.55 ≈ 1.46
/// assert_eq!(calculate_points(&eff), [1, 2, 3]);
/// ```
pub fn calculate_points(effectiveness: &RuleEffectiveness) -> TierCosts {
    RulePointsBreakdown::compute(effectiveness).points
}

/// Every intermediate value of the tiered formula, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulePointsBreakdown {
    pub effectiveness: RuleEffectiveness,
    pub base_weight: f64,
    /// The multiplier actually used, after clamping.
    pub multiplier: f64,
    pub frequency_multiplier: f64,
    pub final_score: f64,
    /// `2^((score − 1) / 2)` before clamping.
    pub raw_base_points: f64,
    pub base_points: f64,
    pub points: TierCosts,
    pub tier_scaling: [f64; 3],
    pub explanation: String,
}

impl RulePointsBreakdown {
    /// Run the formula, keeping every step.
    pub fn compute(effectiveness: &RuleEffectiveness) -> Self {
        let weight = base_weight(effectiveness.base_value);
        let multiplier = sanitize_multiplier(effectiveness.multiplier);
        let discount = frequency_multiplier(effectiveness.frequency);
        let final_score = weight * multiplier * discount;

        let raw_base_points = 2f64.powf((final_score - 1.0) / 2.0);
        let base_points = raw_base_points.clamp(MIN_RULE_POINTS as f64, MAX_RULE_POINTS as f64);

        let mut tier1 = base_points.round() as i32;
        let mut tier2 = (base_points * TIER_2_SCALE).round() as i32;
        let mut tier3 = (base_points * TIER_3_SCALE).round() as i32;

        if tier2 <= tier1 {
            tier2 = tier1 + 1;
        }
        if tier3 <= tier2 {
            tier3 = tier2 + 1;
        }

        tier1 = tier1.min(MAX_RULE_POINTS);
        tier2 = tier2.min(MAX_RULE_POINTS);
        tier3 = tier3.min(MAX_RULE_POINTS);

        let points = [tier1, tier2, tier3];
        let explanation = format!(
            "{} effectiveness (weight {:.1}) x multiplier {:.2} x {} frequency ({:.1}) = score {:.2}; \
             base points {:.2}; tiers {}/{}/{}",
            effectiveness.base_value,
            weight,
            multiplier,
            effectiveness.frequency,
            discount,
            final_score,
            base_points,
            tier1,
            tier2,
            tier3,
        );

        Self {
            effectiveness: *effectiveness,
            base_weight: weight,
            multiplier,
            frequency_multiplier: discount,
            final_score,
            raw_base_points,
            base_points,
            points,
            tier_scaling: [1.0, TIER_2_SCALE, TIER_3_SCALE],
            explanation,
        }
    }
}
