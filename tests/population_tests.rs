use rostercost::*;

fn catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    catalog.insert_rule(Rule::new("rapid", "Rapid Fire", "Double shots at half range", [2, 3, 4]));
    catalog.insert_rule(Rule::new("deep", "Deep Strike", "Arrives from reserve", [5, 6, 7]));
    catalog.insert_rule(Rule::new("hide", "Toughened Hide", "", [4, 5, 6]));

    let mut bolter = Weapon::new("bolter", "Bolter", WeaponType::Ranged);
    bolter.range = 24;
    bolter.points = 2;
    bolter.rules.push(RuleReference::new("rapid", 2));
    catalog.insert_weapon(bolter);

    let mut claws = Weapon::new("claws", "Claws", WeaponType::Melee);
    claws.points = 1;
    catalog.insert_weapon(claws);

    let mut pack = WarGear::new("pack", "Jump Pack");
    pack.rules.push(RuleReference::new("deep", 1));
    catalog.insert_wargear(pack);

    catalog.insert_wargear(WarGear::new("banner", "Banner"));
    catalog
}

fn full_unit() -> Unit {
    let mut unit = Unit::new("assault", "Assault Squad").with_stats(4, 3, 8, 4).with_amount(5);
    unit.max = 10;
    unit.rules.push(RuleReference::new("hide", 3));
    unit.weapons.push(WeaponReference::new("bolter", 5, WeaponType::Ranged));
    unit.wargear.push("pack".into());
    unit.available_weapons = vec!["bolter".into(), "claws".into()];
    unit.available_wargear = vec!["pack".into(), "banner".into()];
    unit
}

#[test]
fn test_populate_unit_embeds_everything() {
    let catalog = catalog();
    let populated = populate_unit(&full_unit(), &catalog).unwrap();

    assert_eq!(populated.populated_rules.len(), 1);
    assert_eq!(populated.populated_rules[0].rule.name, "Toughened Hide");
    assert_eq!(populated.populated_rules[0].cost(), 6);

    let weapon_names: Vec<&str> = populated.populated_weapons.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(weapon_names, vec!["Bolter"]);

    let options: Vec<&str> = populated
        .populated_available_wargear
        .iter()
        .map(|g| g.name.as_str())
        .collect();
    assert_eq!(options, vec!["Jump Pack", "Banner"]);
    assert_eq!(populated.populated_available_weapons.len(), 2);
    assert_eq!(populated.populated_wargear[0].rules[0].rule_id, EntityId::new("deep"));
}

#[test]
fn test_populated_unit_json_is_flat() {
    let populated = populate_unit(&full_unit(), &catalog()).unwrap();
    let json = serde_json::to_value(&populated).unwrap();

    assert_eq!(json["id"], "assault");
    assert_eq!(json["amount"], 5);
    assert_eq!(json["warGear"][0], "pack");
    assert_eq!(json["populatedRules"][0]["tier"], 3);
    assert_eq!(json["populatedRules"][0]["points"][2], 6);
    assert_eq!(json["populatedWeapons"][0]["name"], "Bolter");
    assert_eq!(json["populatedWarGear"][0]["name"], "Jump Pack");
    assert_eq!(json["populatedAvailableWarGear"][1]["name"], "Banner");

    let round_tripped: PopulatedUnit = serde_json::from_value(json).unwrap();
    assert_eq!(round_tripped, populated);
}

#[test]
fn test_population_is_strict_for_every_reference_kind() {
    let catalog = catalog();

    let mut unit = full_unit();
    unit.rules.push(RuleReference::new("gone", 1));
    assert_eq!(populate_unit(&unit, &catalog), Err(CostError::RuleNotFound("gone".into())));

    let mut unit = full_unit();
    unit.weapons.push(WeaponReference::new("gone", 1, WeaponType::Melee));
    assert_eq!(populate_unit(&unit, &catalog), Err(CostError::WeaponNotFound("gone".into())));

    let mut unit = full_unit();
    unit.wargear.push("gone".into());
    assert_eq!(populate_unit(&unit, &catalog), Err(CostError::WarGearNotFound("gone".into())));

    let mut unit = full_unit();
    unit.available_wargear.push("gone".into());
    assert_eq!(populate_unit(&unit, &catalog), Err(CostError::WarGearNotFound("gone".into())));
}

#[test]
fn test_aggregator_tolerates_what_population_rejects() {
    let catalog = catalog();
    let mut unit = full_unit();
    unit.weapons.push(WeaponReference::new("gone", 2, WeaponType::Ranged));

    assert!(populate_unit(&unit, &catalog).unwrap_err().is_not_found());

    let breakdown = calculate_unit_points(&unit, &catalog);
    assert_eq!(breakdown.skipped.len(), 1);
    assert_eq!(breakdown.skipped[0].id, EntityId::new("gone"));
    assert!(breakdown.total_points > breakdown.base_cost);
}

#[test]
fn test_weapon_total_points() {
    let catalog = catalog();
    let bolter = catalog.weapon_by_id(&"bolter".into()).unwrap();

    // 2 + rapid tier 2 (3)
    assert_eq!(calculate_total_points(&bolter, &catalog), Ok(5));
    assert_eq!(populate_weapon(&bolter, &catalog).unwrap().total_points(), 5);

    let mut odd_tier = bolter.clone();
    odd_tier.rules[0].tier = 9;
    assert_eq!(calculate_total_points(&odd_tier, &catalog), Ok(4));

    let mut dangling = bolter;
    dangling.rules.push(RuleReference::new("gone", 1));
    assert_eq!(
        calculate_total_points(&dangling, &catalog),
        Err(CostError::RuleNotFound("gone".into()))
    );
}

#[test]
fn test_populate_wargear() {
    let catalog = catalog();
    let pack = catalog.wargear_by_id(&"pack".into()).unwrap();
    let populated = populate_wargear(&pack, &catalog).unwrap();

    assert_eq!(populated.populated_rules.len(), 1);
    assert_eq!(populated.populated_rules[0].cost(), 5);

    let json = serde_json::to_value(&populated).unwrap();
    assert_eq!(json["name"], "Jump Pack");
    assert_eq!(json["populatedRules"][0]["name"], "Deep Strike");
}

#[test]
fn test_rule_change_reaches_affected_units() {
    let mut catalog = catalog();
    let mut other = Unit::new("beasts", "Beasts");
    other.weapons.push(WeaponReference::new("claws", 3, WeaponType::Melee));
    let units = vec![full_unit(), other];

    let graph = ReferenceGraph::from_catalog(&catalog, &units);
    let calculator = PointsCalculator::new();

    let rapid = catalog.rule_by_id(&"rapid".into()).unwrap();
    let impact = calculator.recalculate_with_impact(&rapid, &graph);
    assert!(impact.changed());
    assert_eq!(impact.affected_units, vec![EntityId::new("assault")]);

    let before = calculate_unit_points(&units[0], &catalog).total_points;
    catalog.insert_rule(impact.rule.clone());
    let after = calculate_unit_points(&units[0], &catalog).total_points;
    // The squad's bolters reference Rapid Fire at tier 2.
    let delta = (impact.rule.cost_at(2) - rapid.cost_at(2)) * units[0].amount;
    assert_eq!(after - before, delta);

    assert_eq!(graph.dependents_of(&EntityRef::weapon("claws")), vec![EntityRef::unit("beasts")]);
}
