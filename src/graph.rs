//! Reference impact graph.
//!
//! Provides [`ReferenceGraph`], a directed graph of which entities reference
//! which. An edge runs from a referenced entity to the entity that references
//! it, so walking forward from a rule visits everything whose derived cost
//! depends on that rule's tiers.

use crate::entity_id::EntityId;
use crate::model::{EntityKind, Unit, WarGear, Weapon};
use crate::resolver::InMemoryCatalog;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A typed pointer to a stored entity.
///
/// Rules, weapons and wargear live in separate collections, so an id alone
/// is not unique across kinds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: EntityId,
}

impl EntityRef {
    /// A reference to `id` in the `kind` collection.
    pub fn new(kind: EntityKind, id: impl Into<EntityId>) -> Self {
        Self { kind, id: id.into() }
    }

    /// Shorthand for a rule reference.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rostercost::{EntityKind, EntityRef};
    ///
    /// let r = EntityRef::rule("stealth");
    /// assert_eq!(r.kind, EntityKind::Rule);
    /// assert_eq!(r.to_string(), "rule:stealth");
    /// ```
    pub fn rule(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::Rule, id)
    }

    /// Shorthand for a weapon reference.
    pub fn weapon(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::Weapon, id)
    }

    /// Shorthand for a wargear reference.
    pub fn wargear(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::WarGear, id)
    }

    /// Shorthand for a unit reference.
    pub fn unit(id: impl Into<EntityId>) -> Self {
        Self::new(EntityKind::Unit, id)
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Who references whom.
///
/// Only references that feed a unit's cost are recorded: unit rules,
/// equipped weapons and wargear, and the rules on those. Available options
/// are not part of a unit's total and are left out.
///
/// References are one level deep (rules reference nothing), so the graph
/// is always acyclic.
///
/// # Examples
///
/// ```rust
/// use rostercost::graph::{EntityRef, ReferenceGraph};
/// use rostercost::{RuleReference, Unit, Weapon, WeaponReference, WeaponType};
///
/// let mut bolter = Weapon::new("bolter", "Bolter", WeaponType::Ranged);
/// bolter.rules.push(RuleReference::new("rapid", 1));
///
/// let mut unit = Unit::new("u1", "Squad");
/// unit.weapons.push(WeaponReference::new("bolter", 5, WeaponType::Ranged));
///
/// let mut graph = ReferenceGraph::new();
/// graph.record_weapon(&bolter);
/// graph.record_unit(&unit);
///
/// assert_eq!(
///     graph.dependents_of(&EntityRef::rule("rapid")),
///     vec![EntityRef::weapon("bolter"), EntityRef::unit("u1")]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    graph: DiGraph<EntityRef, ()>,
    node_map: HashMap<EntityRef, NodeIndex>,
}

impl ReferenceGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from everything in a catalog plus a set of units.
    pub fn from_catalog<'a>(catalog: &InMemoryCatalog, units: impl IntoIterator<Item = &'a Unit>) -> Self {
        let mut graph = Self::new();
        for weapon in catalog.weapons() {
            graph.record_weapon(weapon);
        }
        for wargear in catalog.wargear() {
            graph.record_wargear(wargear);
        }
        for unit in units {
            graph.record_unit(unit);
        }
        graph
    }

    /// Add a node if it is not already present.
    pub fn add_node(&mut self, entity: EntityRef) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&entity) {
            idx
        } else {
            let idx = self.graph.add_node(entity.clone());
            self.node_map.insert(entity, idx);
            idx
        }
    }

    /// Record that `dependent` references `dependency`.
    ///
    /// Repeated references collapse into one edge.
    pub fn add_reference(&mut self, dependent: EntityRef, dependency: EntityRef) {
        let from = self.add_node(dependency);
        let to = self.add_node(dependent);
        self.graph.update_edge(from, to, ());
    }

    /// Record a weapon's rule references.
    pub fn record_weapon(&mut self, weapon: &Weapon) {
        let me = EntityRef::weapon(weapon.id.clone());
        self.add_node(me.clone());
        for reference in &weapon.rules {
            self.add_reference(me.clone(), EntityRef::rule(reference.rule_id.clone()));
        }
    }

    /// Record a wargear item's rule references.
    pub fn record_wargear(&mut self, wargear: &WarGear) {
        let me = EntityRef::wargear(wargear.id.clone());
        self.add_node(me.clone());
        for reference in &wargear.rules {
            self.add_reference(me.clone(), EntityRef::rule(reference.rule_id.clone()));
        }
    }

    /// Record a unit's rules, equipped weapons and equipped wargear.
    pub fn record_unit(&mut self, unit: &Unit) {
        let me = EntityRef::unit(unit.id.clone());
        self.add_node(me.clone());
        for reference in &unit.rules {
            self.add_reference(me.clone(), EntityRef::rule(reference.rule_id.clone()));
        }
        for reference in &unit.weapons {
            self.add_reference(me.clone(), EntityRef::weapon(reference.weapon_id.clone()));
        }
        for id in &unit.wargear {
            self.add_reference(me.clone(), EntityRef::wargear(id.clone()));
        }
    }

    /// Drop an entity and every edge touching it.
    ///
    /// Used before re-recording an entity whose references were edited.
    pub fn remove(&mut self, entity: &EntityRef) -> bool {
        let Some(idx) = self.node_map.remove(entity) else {
            return false;
        };
        self.graph.remove_node(idx);
        // remove_node swaps the last node into the freed slot.
        if let Some(moved) = self.graph.node_weight(idx) {
            self.node_map.insert(moved.clone(), idx);
        }
        true
    }

    /// Whether `entity` has been recorded or referenced.
    pub fn contains(&self, entity: &EntityRef) -> bool {
        self.node_map.contains_key(entity)
    }

    /// Number of distinct entities in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct references.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Entities `entity` references directly, sorted.
    pub fn references_of(&self, entity: &EntityRef) -> Vec<EntityRef> {
        let Some(&idx) = self.node_map.get(entity) else {
            return Vec::new();
        };
        let mut out: Vec<EntityRef> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .map(|n| self.graph[n].clone())
            .collect();
        out.sort();
        out
    }

    /// Every entity whose derived cost depends on `entity`, transitively,
    /// sorted by kind then id. Excludes `entity` itself.
    pub fn dependents_of(&self, entity: &EntityRef) -> Vec<EntityRef> {
        let Some(&start) = self.node_map.get(entity) else {
            return Vec::new();
        };
        let mut dfs = Dfs::new(&self.graph, start);
        let mut out = Vec::new();
        while let Some(idx) = dfs.next(&self.graph) {
            if idx != start {
                out.push(self.graph[idx].clone());
            }
        }
        out.sort();
        out
    }

    /// Units whose total changes when `rule_id`'s tiers change.
    pub fn affected_units(&self, rule_id: &EntityId) -> Vec<EntityId> {
        self.dependents_of(&EntityRef::rule(rule_id.clone()))
            .into_iter()
            .filter(|e| e.kind == EntityKind::Unit)
            .map(|e| e.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rule, RuleReference, WeaponReference, WeaponType};

    fn sample() -> (InMemoryCatalog, Vec<Unit>) {
        let mut catalog = InMemoryCatalog::new();
        catalog.insert_rule(Rule::new("rapid", "Rapid Fire", "", [2, 3, 4]));
        catalog.insert_rule(Rule::new("deep", "Deep Strike", "", [5, 6, 7]));
        catalog.insert_rule(Rule::new("fearless", "Fearless", "", [3, 4, 5]));

        let mut bolter = Weapon::new("bolter", "Bolter", WeaponType::Ranged);
        bolter.rules.push(RuleReference::new("rapid", 1));
        catalog.insert_weapon(bolter);

        let mut pack = WarGear::new("pack", "Jump Pack");
        pack.rules.push(RuleReference::new("deep", 1));
        catalog.insert_wargear(pack);

        let mut tactical = Unit::new("tactical", "Tactical Squad");
        tactical.weapons.push(WeaponReference::new("bolter", 5, WeaponType::Ranged));
        tactical.rules.push(RuleReference::new("fearless", 1));

        let mut assault = Unit::new("assault", "Assault Squad");
        assault.wargear.push("pack".into());
        assault.available_weapons.push("bolter".into());

        (catalog, vec![tactical, assault])
    }

    #[test]
    fn test_rule_reaches_units_through_weapons() {
        let (catalog, units) = sample();
        let graph = ReferenceGraph::from_catalog(&catalog, &units);

        assert_eq!(graph.affected_units(&"rapid".into()), vec![EntityId::new("tactical")]);
        assert_eq!(graph.affected_units(&"deep".into()), vec![EntityId::new("assault")]);
        assert_eq!(graph.affected_units(&"fearless".into()), vec![EntityId::new("tactical")]);
    }

    #[test]
    fn test_available_options_do_not_count() {
        let (catalog, units) = sample();
        let graph = ReferenceGraph::from_catalog(&catalog, &units);
        let dependents = graph.dependents_of(&EntityRef::weapon("bolter"));
        assert_eq!(dependents, vec![EntityRef::unit("tactical")]);
    }

    #[test]
    fn test_unknown_entity_has_no_dependents() {
        let graph = ReferenceGraph::new();
        assert!(graph.dependents_of(&EntityRef::rule("nope")).is_empty());
        assert!(graph.affected_units(&"nope".into()).is_empty());
    }

    #[test]
    fn test_duplicate_references_collapse() {
        let mut weapon = Weapon::new("w", "W", WeaponType::Melee);
        weapon.rules.push(RuleReference::new("r", 1));
        weapon.rules.push(RuleReference::new("r", 2));

        let mut graph = ReferenceGraph::new();
        graph.record_weapon(&weapon);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_references_of() {
        let (catalog, units) = sample();
        let graph = ReferenceGraph::from_catalog(&catalog, &units);
        assert_eq!(
            graph.references_of(&EntityRef::unit("tactical")),
            vec![EntityRef::rule("fearless"), EntityRef::weapon("bolter")]
        );
    }

    #[test]
    fn test_remove_keeps_index_consistent() {
        let (catalog, units) = sample();
        let mut graph = ReferenceGraph::from_catalog(&catalog, &units);

        assert!(graph.remove(&EntityRef::weapon("bolter")));
        assert!(!graph.remove(&EntityRef::weapon("bolter")));
        assert!(!graph.contains(&EntityRef::weapon("bolter")));
        assert!(graph.affected_units(&"rapid".into()).is_empty());

        // Every surviving node must still be reachable through the map.
        for entity in [
            EntityRef::rule("rapid"),
            EntityRef::rule("deep"),
            EntityRef::rule("fearless"),
            EntityRef::wargear("pack"),
            EntityRef::unit("tactical"),
            EntityRef::unit("assault"),
        ] {
            assert!(graph.contains(&entity), "{}", entity);
        }
        assert_eq!(graph.affected_units(&"deep".into()), vec![EntityId::new("assault")]);
        assert_eq!(graph.affected_units(&"fearless".into()), vec![EntityId::new("tactical")]);
    }
}
