use rostercost::*;
use std::sync::Arc;

const BASE_VALUES: [BaseEffectiveness; 4] = BaseEffectiveness::ALL;
const FREQUENCIES: [Frequency; 3] = [Frequency::Passive, Frequency::Conditional, Frequency::Limited];

fn multipliers() -> impl Iterator<Item = f64> {
    // 0.10, 0.15, ..., 2.00
    (0..=38).map(|i| 0.1 + i as f64 * 0.05)
}

/// A resolver whose backend is down for one id.
struct FlakyResolver {
    inner: InMemoryCatalog,
    broken: EntityId,
}

impl ReferenceResolver for FlakyResolver {
    fn rule_by_id(&self, id: &EntityId) -> Result<Rule, CostError> {
        if *id == self.broken {
            return Err(CostError::Lookup {
                id: id.clone(),
                reason: "connection reset".into(),
            });
        }
        self.inner.rule_by_id(id)
    }

    fn weapon_by_id(&self, id: &EntityId) -> Result<Weapon, CostError> {
        self.inner.weapon_by_id(id)
    }

    fn wargear_by_id(&self, id: &EntityId) -> Result<WarGear, CostError> {
        self.inner.wargear_by_id(id)
    }
}

fn roster_catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    catalog.insert_rule(Rule::new("fearless", "Fearless", "Never falls back", [3, 4, 5]));
    catalog.insert_rule(Rule::new("rapid", "Rapid Fire", "", [2, 3, 4]));
    catalog.insert_rule(Rule::new("deep", "Deep Strike", "", [5, 6, 7]));

    let mut bolter = Weapon::new("bolter", "Bolter", WeaponType::Ranged);
    bolter.range = 24;
    bolter.points = 2;
    bolter.rules.push(RuleReference::new("rapid", 1));
    catalog.insert_weapon(bolter);

    let mut sword = Weapon::new("sword", "Power Sword", WeaponType::Melee);
    sword.attacks = "2".into();
    sword.ap = "3".into();
    sword.points = 2;
    catalog.insert_weapon(sword);

    let mut pack = WarGear::new("pack", "Jump Pack");
    pack.points = 40;
    pack.rules.push(RuleReference::new("deep", 3));
    catalog.insert_wargear(pack);

    catalog
}

/// Moderate, conditional, multiplier 1.0 prices at [1, 2, 3].
#[test]
fn test_moderate_conditional_rule_tiers() {
    let eff = RuleEffectiveness::new(BaseEffectiveness::Moderate, 1.0, Frequency::Conditional);
    let breakdown = RulePointsBreakdown::compute(&eff);

    assert_eq!(breakdown.base_weight, 3.0);
    assert!((breakdown.final_score - 2.1).abs() < 1e-9);
    assert!((breakdown.base_points - 2f64.powf(0.55)).abs() < 1e-9);
    assert_eq!(breakdown.points, [1, 2, 3]);
}

/// A 2-attack AP3 melee weapon prices at 2.
#[test]
fn test_melee_weapon_points() {
    let stats = WeaponStats::new("Melee", 0, "2", "3");
    let breakdown = WeaponCostBreakdown::compute(&stats);

    assert!((breakdown.combined_score - 2.05).abs() < 1e-9);
    assert_eq!(breakdown.calculated_points, 2);
    assert_eq!(calculate_weapon_points(&stats), 2);
}

/// A bare unit costs exactly its base.
#[test]
fn test_bare_unit_costs_base() {
    let unit = Unit::new("u1", "Line Troopers").with_stats(3, 3, 7, 3).with_amount(5);
    let breakdown = calculate_unit_points(&unit, &InMemoryCatalog::new());

    assert_eq!(breakdown.base_cost, 42);
    assert_eq!(breakdown.total_points, 42);
    assert_eq!(breakdown.line_items.len(), 1);
}

#[test]
fn test_tiers_bounded_and_strictly_increasing_below_cap() {
    for base in BASE_VALUES {
        for frequency in FREQUENCIES {
            for multiplier in multipliers() {
                let eff = RuleEffectiveness::new(base, multiplier, frequency);
                let points = calculate_points(&eff);

                for p in points {
                    assert!((1..=75).contains(&p), "{:?} -> {:?}", eff, points);
                }
                if points[2] < 75 {
                    assert!(points[0] < points[1] && points[1] < points[2], "{:?} -> {:?}", eff, points);
                }
                assert_eq!(points, calculate_points(&eff));
            }
        }
    }
}

#[test]
fn test_tier_one_never_decreases_with_base_value() {
    for frequency in FREQUENCIES {
        for multiplier in multipliers() {
            let mut previous = 0;
            for base in BASE_VALUES {
                let tier1 = calculate_points(&RuleEffectiveness::new(base, multiplier, frequency))[0];
                assert!(tier1 >= previous, "{} {} {}", base, frequency, multiplier);
                previous = tier1;
            }
        }
    }
}

#[test]
fn test_weapon_points_bounded_and_melee_ignores_range() {
    for weapon_type in ["Melee", "Ranged", "Weapon"] {
        for range in [0, 1, 6, 18, 36, 48, 96] {
            for attacks in ["0", "1", "2", "4", "6", "10", "X", "D3"] {
                for ap in ["0", "1", "2", "3", "5", "-"] {
                    let stats = WeaponStats::new(weapon_type, range, attacks, ap);
                    let points = calculate_weapon_points(&stats);
                    assert!((1..=50).contains(&points));

                    if weapon_type == "Melee" {
                        let at_zero = WeaponStats::new(weapon_type, 0, attacks, ap);
                        assert_eq!(
                            WeaponCostBreakdown::compute(&stats).combined_score,
                            WeaponCostBreakdown::compute(&at_zero).combined_score
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_text_to_tiers() {
    let calculator = PointsCalculator::new();

    // "tough" is strong and passive
    assert_eq!(calculator.calculate_points_from_description("Toughened Hide", "", None), [4, 5, 6]);

    // A number of 20 or more forces overpowered; no frequency keywords means conditional.
    let eff = calculator.classifier().classify("Deadly Aim", "Reroll 25 dice", None);
    assert_eq!(eff.base_value, BaseEffectiveness::Overpowered);
    assert_eq!(eff.frequency, Frequency::Conditional);
    assert_eq!(calculator.calculate_points_from_description("Deadly Aim", "Reroll 25 dice", None), [5, 6, 7]);

    // Limited usage is cheaper than the same text without the restriction.
    let limited = calculator.calculate_points_from_description("Smoke", "once per game", None);
    let unlimited = calculator.calculate_points_from_description("Smoke", "", None);
    assert!(limited[0] <= unlimited[0]);
}

#[test]
fn test_classifier_config_override_changes_prices() {
    let config = ClassifierConfig::from_json_str(r#"{"overpoweredNumber": 30}"#).unwrap();
    let calculator = PointsCalculator::with_config(config).unwrap();

    let eff = calculator.classifier().classify("Deadly Aim", "Reroll 25 dice", None);
    assert_eq!(eff.base_value, BaseEffectiveness::Strong);

    let default_points = PointsCalculator::new().calculate_points_from_description("Deadly Aim", "Reroll 25 dice", None);
    let tuned_points = calculator.calculate_points_from_description("Deadly Aim", "Reroll 25 dice", None);
    assert!(tuned_points[0] < default_points[0]);
}

#[test]
fn test_invalid_config_is_rejected() {
    assert!(matches!(
        ClassifierConfig::from_json_str("{not json"),
        Err(CostError::InvalidConfig(_))
    ));
}

#[test]
fn test_full_unit_breakdown() {
    let catalog = roster_catalog();

    let mut unit = Unit::new("assault", "Assault Squad").with_stats(4, 3, 8, 4).with_amount(5);
    unit.rules.push(RuleReference::new("fearless", 2));
    unit.weapons.push(WeaponReference::new("bolter", 3, WeaponType::Ranged));
    unit.weapons.push(WeaponReference::new("sword", 2, WeaponType::Melee));
    unit.wargear.push("pack".into());

    let breakdown = calculate_unit_points(&unit, &catalog);

    assert_eq!(breakdown.base_cost, 48);
    assert_eq!(breakdown.unit_rules_cost, 20); // 4 × 5
    assert_eq!(breakdown.weapons_cost, 10); // 2 × 3 + 2 × 2
    assert_eq!(breakdown.weapon_rules_cost, 10); // rapid tier 1 × 5 models
    assert_eq!(breakdown.wargear_cost, 35); // deep tier 3 × 5, pack points ignored
    assert_eq!(breakdown.total_points, 48 + 20 + 10 + 10 + 35);
    assert!(breakdown.is_complete());

    let listed: i32 = breakdown.line_items.iter().map(|l| l.points).sum();
    assert_eq!(listed, breakdown.total_points);
    assert_eq!(breakdown.lines(CostCategory::Weapon).count(), 2);
}

#[test]
fn test_dangling_references_contribute_zero() {
    let catalog = roster_catalog();

    let mut unit = Unit::new("u1", "Squad").with_stats(3, 3, 7, 3).with_amount(5);
    unit.rules.push(RuleReference::new("deleted-rule", 1));
    unit.weapons.push(WeaponReference::new("deleted-weapon", 5, WeaponType::Ranged));
    unit.wargear.push("deleted-wargear".into());
    unit.rules.push(RuleReference::new("fearless", 1));

    let breakdown = calculate_unit_points(&unit, &catalog);

    assert_eq!(breakdown.total_points, 42 + 15);
    assert_eq!(breakdown.skipped.len(), 3);
    assert!(breakdown
        .skipped
        .iter()
        .any(|s| s.kind == EntityKind::Weapon && s.id == EntityId::new("deleted-weapon")));
}

#[test]
fn test_backend_failures_are_skipped_too() {
    let resolver = FlakyResolver {
        inner: roster_catalog(),
        broken: EntityId::new("fearless"),
    };

    let mut unit = Unit::new("u1", "Squad").with_amount(2);
    unit.rules.push(RuleReference::new("fearless", 1));
    unit.rules.push(RuleReference::new("deep", 1));

    let breakdown = UnitCostAggregator::new(&resolver).calculate_unit_points(&unit);
    assert_eq!(breakdown.unit_rules_cost, 10);
    assert_eq!(breakdown.skipped.len(), 1);
    assert!(breakdown.skipped[0].reason.contains("connection reset"));
}

#[test]
fn test_concurrent_costing_shares_one_resolver() {
    let catalog = Arc::new(roster_catalog());
    let aggregator = UnitCostAggregator::new(Arc::clone(&catalog));

    let units: Vec<Unit> = (1..=8)
        .map(|n| {
            let mut unit = Unit::new(format!("u{}", n), "Squad").with_stats(3, 3, 7, 3).with_amount(n);
            unit.rules.push(RuleReference::new("fearless", 1));
            unit
        })
        .collect();

    let totals: Vec<i32> = std::thread::scope(|scope| {
        let handles: Vec<_> = units
            .iter()
            .map(|unit| {
                let aggregator = &aggregator;
                scope.spawn(move || aggregator.calculate_unit_points(unit).total_points)
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (unit, total) in units.iter().zip(totals) {
        assert_eq!(total, 42 + 3 * unit.amount);
    }
}

#[test]
fn test_breakdown_json_shape() {
    let unit = Unit::new("u1", "Squad").with_stats(3, 3, 7, 3);
    let json = serde_json::to_value(calculate_unit_points(&unit, &InMemoryCatalog::new())).unwrap();

    assert_eq!(json["base_cost"], 42);
    assert_eq!(json["unit_rules_cost"], 0);
    assert_eq!(json["total_points"], 42);
}

#[test]
fn test_effectiveness_json_accepts_unknown_labels() {
    let eff: RuleEffectiveness =
        serde_json::from_str(r#"{"baseValue": "legendary", "multiplier": 1.0, "frequency": "sometimes"}"#)
            .unwrap();
    assert_eq!(eff.base_value, BaseEffectiveness::Moderate);
    assert_eq!(eff.frequency, Frequency::Conditional);
    assert_eq!(calculate_points(&eff), [1, 2, 3]);
}
