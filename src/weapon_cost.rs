//! Weapon stat cost model.
//!
//! Prices a weapon profile directly from its range, attack count and armour
//! penetration. Independent of rule classification: a weapon's own rules are
//! costed separately through their tier costs.

use crate::model::Weapon;
use serde::{Deserialize, Serialize};

/// Lowest base cost a weapon profile can have.
pub const MIN_WEAPON_POINTS: i32 = 1;

/// Highest base cost a weapon profile can have.
pub const MAX_WEAPON_POINTS: i32 = 50;

/// Ranges beyond this many inches score the same.
pub const MAX_SCORED_RANGE: i32 = 48;

/// The stats the weapon model reads.
///
/// `weapon_type` is free text: `"Melee"`, `"Ranged"`, the generic
/// `"Weapon"`, or anything else a stored profile carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    #[serde(default)]
    pub range: i32,
    #[serde(default)]
    pub attacks: String,
    #[serde(default)]
    pub ap: String,
    #[serde(rename = "type")]
    pub weapon_type: String,
}

impl WeaponStats {
    /// Stats from a free-text type label and raw profile values.
    pub fn new(
        weapon_type: impl Into<String>,
        range: i32,
        attacks: impl Into<String>,
        ap: impl Into<String>,
    ) -> Self {
        Self {
            range,
            attacks: attacks.into(),
            ap: ap.into(),
            weapon_type: weapon_type.into(),
        }
    }
}

impl From<&Weapon> for WeaponStats {
    fn from(weapon: &Weapon) -> Self {
        Self {
            range: weapon.range,
            attacks: weapon.attacks.clone(),
            ap: weapon.ap.clone(),
            weapon_type: weapon.weapon_type.as_str().to_string(),
        }
    }
}

fn is_melee(weapon_type: &str) -> bool {
    weapon_type.trim().eq_ignore_ascii_case("melee")
}

fn is_ranged(weapon_type: &str) -> bool {
    let t = weapon_type.trim();
    t.eq_ignore_ascii_case("ranged") || t.eq_ignore_ascii_case("weapon")
}

/// Range score: flat 1.0 for melee, one point per 6" otherwise, capped at 8.
pub fn range_score(range: i32, weapon_type: &str) -> f64 {
    if is_melee(weapon_type) {
        return 1.0;
    }
    let capped = range.min(MAX_SCORED_RANGE);
    (capped as f64 / 6.0).min(8.0)
}

/// Parse an attack count. `"X"` means 3; anything else unparsable means 1.
pub fn parse_attacks(attacks: &str) -> i64 {
    let trimmed = attacks.trim();
    match trimmed.parse::<i64>() {
        Ok(n) => n,
        Err(_) if trimmed.eq_ignore_ascii_case("x") => 3,
        Err(_) => 1,
    }
}

/// Attack score with diminishing returns past six attacks.
pub fn attacks_score(attacks: &str) -> f64 {
    match parse_attacks(attacks) {
        n if n <= 0 => 0.5,
        1 => 1.0,
        2 => 2.0,
        3 => 2.8,
        4 => 3.5,
        5 | 6 => 4.0,
        n => 4.0 + (n - 6) as f64 * 0.2,
    }
}

/// AP score. Unparsable values (`"3+"`, `"-"`) score as no penetration.
pub fn ap_score(ap: &str) -> f64 {
    match ap.trim().parse::<i64>() {
        Ok(n) if n <= 0 => 1.0,
        Ok(1) => 1.5,
        Ok(2) => 2.0,
        Ok(3) => 2.5,
        Ok(_) => 3.0,
        Err(_) => 1.0,
    }
}

/// `(range, attacks, ap)` weights for a weapon type.
///
/// Ranged and generic weapons lean on range; everything else (melee and
/// unrecognised types) leans on attacks.
pub fn stat_weights(weapon_type: &str) -> (f64, f64, f64) {
    if is_ranged(weapon_type) {
        (0.4, 0.4, 0.2)
    } else {
        (0.1, 0.6, 0.3)
    }
}

/// Base point cost of a weapon profile, always within `[1, 50]`.
///
/// # Examples
///
/// ```rust
/// use rostercost::{calculate_weapon_points, WeaponStats};
///
/// // 0.1 × 1.0 + 0.6 × 2.0 + 0.3 × 2.5 = 2.05, and 1.6^1.025 ≈ 1.62
/// let stats = WeaponStats::new("Melee", 0, "2", "3");
/// assert_eq!(calculate_weapon_points(&stats), 2);
/// ```
pub fn calculate_weapon_points(stats: &WeaponStats) -> i32 {
    WeaponCostBreakdown::compute(stats).calculated_points
}

/// Input value, score, weight and weighted score of one stat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatScore<T> {
    pub value: T,
    pub score: f64,
    pub weight: f64,
    pub weighted: f64,
}

impl<T> StatScore<T> {
    fn new(value: T, score: f64, weight: f64) -> Self {
        Self {
            value,
            score,
            weight,
            weighted: score * weight,
        }
    }
}

/// Every intermediate value of the weapon model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponCostBreakdown {
    pub range: StatScore<i32>,
    pub attacks: StatScore<String>,
    pub ap: StatScore<String>,
    pub combined_score: f64,
    pub calculated_points: i32,
    pub weapon_type: String,
}

impl WeaponCostBreakdown {
    /// Score each stat, weight it and convert the sum to points.
    pub fn compute(stats: &WeaponStats) -> Self {
        let (range_weight, attacks_weight, ap_weight) = stat_weights(&stats.weapon_type);

        let range = StatScore::new(
            stats.range,
            range_score(stats.range, &stats.weapon_type),
            range_weight,
        );
        let attacks = StatScore::new(stats.attacks.clone(), attacks_score(&stats.attacks), attacks_weight);
        let ap = StatScore::new(stats.ap.clone(), ap_score(&stats.ap), ap_weight);

        let combined_score = range.weighted + attacks.weighted + ap.weighted;
        let points = 1.6f64
            .powf(combined_score / 2.0)
            .clamp(MIN_WEAPON_POINTS as f64, MAX_WEAPON_POINTS as f64);

        Self {
            range,
            attacks,
            ap,
            combined_score,
            calculated_points: points.round() as i32,
            weapon_type: stats.weapon_type.clone(),
        }
    }
}
