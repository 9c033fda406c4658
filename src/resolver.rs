//! Reference resolution.
//!
//! The costing engine never talks to storage directly. Whatever holds the
//! roster data implements [`ReferenceResolver`], and the aggregator and the
//! populator look rules, weapons and wargear up through it.
//! [`InMemoryCatalog`] is a ready-made implementation backed by hash maps.

use crate::entity_id::EntityId;
use crate::error::CostError;
use crate::model::{Rule, WarGear, Weapon};
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup-by-id capability supplied by the persistence layer.
///
/// Implementations return [`CostError::RuleNotFound`] (or the weapon/wargear
/// equivalent) for a dangling id and [`CostError::Lookup`] for any other
/// backend failure. Lookups must not mutate anything the engine can observe.
///
/// # Examples
///
/// ```rust
/// use rostercost::{CostError, EntityId, InMemoryCatalog, ReferenceResolver, Rule};
///
/// let mut catalog = InMemoryCatalog::new();
/// catalog.insert_rule(Rule::new("r1", "Stealth", "Hard to hit", [2, 3, 4]));
///
/// assert_eq!(catalog.rule_by_id(&EntityId::new("r1")).unwrap().points, [2, 3, 4]);
/// assert_eq!(
///     catalog.rule_by_id(&EntityId::new("nope")),
///     Err(CostError::RuleNotFound(EntityId::new("nope")))
/// );
/// ```
pub trait ReferenceResolver: Send + Sync {
    /// Fetch a rule by id.
    fn rule_by_id(&self, id: &EntityId) -> Result<Rule, CostError>;

    /// Fetch a weapon by id.
    fn weapon_by_id(&self, id: &EntityId) -> Result<Weapon, CostError>;

    /// Fetch a wargear item by id.
    fn wargear_by_id(&self, id: &EntityId) -> Result<WarGear, CostError>;
}

impl<R: ReferenceResolver + ?Sized> ReferenceResolver for &R {
    fn rule_by_id(&self, id: &EntityId) -> Result<Rule, CostError> {
        (**self).rule_by_id(id)
    }

    fn weapon_by_id(&self, id: &EntityId) -> Result<Weapon, CostError> {
        (**self).weapon_by_id(id)
    }

    fn wargear_by_id(&self, id: &EntityId) -> Result<WarGear, CostError> {
        (**self).wargear_by_id(id)
    }
}

impl<R: ReferenceResolver + ?Sized> ReferenceResolver for Arc<R> {
    fn rule_by_id(&self, id: &EntityId) -> Result<Rule, CostError> {
        (**self).rule_by_id(id)
    }

    fn weapon_by_id(&self, id: &EntityId) -> Result<Weapon, CostError> {
        (**self).weapon_by_id(id)
    }

    fn wargear_by_id(&self, id: &EntityId) -> Result<WarGear, CostError> {
        (**self).wargear_by_id(id)
    }
}

/// Hash-map backed resolver.
///
/// Useful for tests, for snapshots loaded wholesale from an export, and for
/// feeding a [`ReferenceGraph`](crate::ReferenceGraph).
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    rules: HashMap<EntityId, Rule>,
    weapons: HashMap<EntityId, Weapon>,
    wargear: HashMap<EntityId, WarGear>,
}

impl InMemoryCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a rule under its own id, returning any rule it replaced.
    pub fn insert_rule(&mut self, rule: Rule) -> Option<Rule> {
        self.rules.insert(rule.id.clone(), rule)
    }

    /// Store a weapon under its own id, returning any weapon it replaced.
    pub fn insert_weapon(&mut self, weapon: Weapon) -> Option<Weapon> {
        self.weapons.insert(weapon.id.clone(), weapon)
    }

    /// Store a wargear item under its own id, returning any item it replaced.
    pub fn insert_wargear(&mut self, wargear: WarGear) -> Option<WarGear> {
        self.wargear.insert(wargear.id.clone(), wargear)
    }

    /// Remove a rule. References to it dangle afterwards.
    pub fn remove_rule(&mut self, id: &EntityId) -> Option<Rule> {
        self.rules.remove(id)
    }

    /// Remove a weapon.
    pub fn remove_weapon(&mut self, id: &EntityId) -> Option<Weapon> {
        self.weapons.remove(id)
    }

    /// Remove a wargear item.
    pub fn remove_wargear(&mut self, id: &EntityId) -> Option<WarGear> {
        self.wargear.remove(id)
    }

    /// Stored rules, in no particular order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Stored weapons, in no particular order.
    pub fn weapons(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.values()
    }

    /// Stored wargear, in no particular order.
    pub fn wargear(&self) -> impl Iterator<Item = &WarGear> {
        self.wargear.values()
    }
}

impl ReferenceResolver for InMemoryCatalog {
    fn rule_by_id(&self, id: &EntityId) -> Result<Rule, CostError> {
        self.rules
            .get(id)
            .cloned()
            .ok_or_else(|| CostError::RuleNotFound(id.clone()))
    }

    fn weapon_by_id(&self, id: &EntityId) -> Result<Weapon, CostError> {
        self.weapons
            .get(id)
            .cloned()
            .ok_or_else(|| CostError::WeaponNotFound(id.clone()))
    }

    fn wargear_by_id(&self, id: &EntityId) -> Result<WarGear, CostError> {
        self.wargear
            .get(id)
            .cloned()
            .ok_or_else(|| CostError::WarGearNotFound(id.clone()))
    }
}
