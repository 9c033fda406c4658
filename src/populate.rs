//! Entity population for display.
//!
//! Turns id and [`RuleReference`] lists into fully resolved objects. Each
//! view holds the stored entity next to its resolved parts; on the wire the
//! entity is flattened so the view reads as the entity plus `populated*`
//! fields.
//!
//! Population is strict: the first reference that fails to resolve aborts
//! the call with the resolver's error.

use crate::error::CostError;
use crate::model::{Rule, RuleReference, Unit, WarGear, Weapon};
use crate::resolver::ReferenceResolver;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A resolved rule together with the tier it was referenced at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleWithTier {
    #[serde(flatten)]
    pub rule: Rule,
    pub tier: i32,
}

impl RuleWithTier {
    /// Cost of the rule at the referenced tier.
    pub fn cost(&self) -> i32 {
        self.rule.cost_at(self.tier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedWeapon {
    #[serde(flatten)]
    pub weapon: Weapon,
    pub populated_rules: Vec<RuleWithTier>,
}

impl PopulatedWeapon {
    /// Weapon points plus the tier cost of every rule.
    pub fn total_points(&self) -> i32 {
        self.populated_rules
            .iter()
            .fold(self.weapon.points, |acc, r| acc.saturating_add(r.cost()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedWarGear {
    #[serde(flatten)]
    pub wargear: WarGear,
    pub populated_rules: Vec<RuleWithTier>,
}

/// A unit with every reference resolved.
///
/// Equipped weapons are listed once per [`WeaponReference`](crate::WeaponReference),
/// in the unit's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedUnit {
    #[serde(flatten)]
    pub unit: Unit,
    pub populated_rules: Vec<RuleWithTier>,
    pub populated_weapons: Vec<Weapon>,
    #[serde(rename = "populatedWarGear")]
    pub populated_wargear: Vec<WarGear>,
    pub populated_available_weapons: Vec<Weapon>,
    #[serde(rename = "populatedAvailableWarGear")]
    pub populated_available_wargear: Vec<WarGear>,
}

fn resolve_rules<R: ReferenceResolver + ?Sized>(
    references: &[RuleReference],
    resolver: &R,
) -> Result<Vec<RuleWithTier>, CostError> {
    references
        .iter()
        .map(|reference| {
            let rule = resolver.rule_by_id(&reference.rule_id)?;
            Ok(RuleWithTier {
                rule,
                tier: reference.tier,
            })
        })
        .collect()
}

/// Resolve a weapon's rules.
pub fn populate_weapon<R: ReferenceResolver + ?Sized>(
    weapon: &Weapon,
    resolver: &R,
) -> Result<PopulatedWeapon, CostError> {
    let populated_rules = resolve_rules(&weapon.rules, resolver)?;
    debug!(weapon = %weapon.id, rules = populated_rules.len(), "populated weapon");
    Ok(PopulatedWeapon {
        weapon: weapon.clone(),
        populated_rules,
    })
}

/// Resolve a wargear item's rules.
pub fn populate_wargear<R: ReferenceResolver + ?Sized>(
    wargear: &WarGear,
    resolver: &R,
) -> Result<PopulatedWarGear, CostError> {
    let populated_rules = resolve_rules(&wargear.rules, resolver)?;
    debug!(wargear = %wargear.id, rules = populated_rules.len(), "populated wargear");
    Ok(PopulatedWarGear {
        wargear: wargear.clone(),
        populated_rules,
    })
}

/// Resolve everything a unit references: rules, equipped weapons and
/// wargear, and the weapon and wargear options it may choose from.
///
/// # Examples
///
/// ```rust
/// use rostercost::{populate_unit, CostError, InMemoryCatalog, Unit, Weapon, WeaponReference, WeaponType};
///
/// let mut catalog = InMemoryCatalog::new();
/// catalog.insert_weapon(Weapon::new("w1", "Bolter", WeaponType::Ranged));
///
/// let mut unit = Unit::new("u1", "Squad");
/// unit.weapons.push(WeaponReference::new("w1", 5, WeaponType::Ranged));
/// let populated = populate_unit(&unit, &catalog).unwrap();
/// assert_eq!(populated.populated_weapons[0].name, "Bolter");
///
/// unit.available_weapons.push("w2".into());
/// assert_eq!(
///     populate_unit(&unit, &catalog),
///     Err(CostError::WeaponNotFound("w2".into()))
/// );
/// ```
pub fn populate_unit<R: ReferenceResolver + ?Sized>(
    unit: &Unit,
    resolver: &R,
) -> Result<PopulatedUnit, CostError> {
    let populated_rules = resolve_rules(&unit.rules, resolver)?;

    let populated_weapons = unit
        .weapons
        .iter()
        .map(|w| resolver.weapon_by_id(&w.weapon_id))
        .collect::<Result<Vec<_>, _>>()?;

    let populated_wargear = unit
        .wargear
        .iter()
        .map(|id| resolver.wargear_by_id(id))
        .collect::<Result<Vec<_>, _>>()?;

    let populated_available_weapons = unit
        .available_weapons
        .iter()
        .map(|id| resolver.weapon_by_id(id))
        .collect::<Result<Vec<_>, _>>()?;

    let populated_available_wargear = unit
        .available_wargear
        .iter()
        .map(|id| resolver.wargear_by_id(id))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        unit = %unit.id,
        rules = populated_rules.len(),
        weapons = populated_weapons.len(),
        wargear = populated_wargear.len(),
        "populated unit"
    );

    Ok(PopulatedUnit {
        unit: unit.clone(),
        populated_rules,
        populated_weapons,
        populated_wargear,
        populated_available_weapons,
        populated_available_wargear,
    })
}

/// A weapon's points plus the tier cost of each of its rules.
///
/// Fails on the first rule that does not resolve.
///
/// # Examples
///
/// ```rust
/// use rostercost::{calculate_total_points, InMemoryCatalog, Rule, RuleReference, Weapon, WeaponType};
///
/// let mut catalog = InMemoryCatalog::new();
/// catalog.insert_rule(Rule::new("rapid", "Rapid Fire", "", [2, 3, 4]));
///
/// let mut weapon = Weapon::new("w1", "Bolter", WeaponType::Ranged);
/// weapon.points = 3;
/// weapon.rules.push(RuleReference::new("rapid", 3));
/// assert_eq!(calculate_total_points(&weapon, &catalog), Ok(7));
/// ```
pub fn calculate_total_points<R: ReferenceResolver + ?Sized>(
    weapon: &Weapon,
    resolver: &R,
) -> Result<i32, CostError> {
    weapon.rules.iter().try_fold(weapon.points, |total, reference| {
        let rule = resolver.rule_by_id(&reference.rule_id)?;
        Ok(total.saturating_add(rule.cost_at(reference.tier)))
    })
}
