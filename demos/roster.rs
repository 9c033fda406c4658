//! Roster example: pricing a rule, a weapon and a unit
//!
//! This example demonstrates:
//! - Recalculating a rule's tier costs from its text
//! - Scoring a weapon profile
//! - Costing a unit against an in-memory catalog

use rostercost::*;

fn main() -> Result<(), CostError> {
    let calculator = PointsCalculator::new();

    // Price a rule from its description
    let rule = Rule::new(
        "relentless",
        "Relentless",
        "Re-roll all failed hit rolls. Once per battle this unit may advance and shoot.",
        [0, 0, 0],
    );
    let rule = calculator.recalculate(&rule);
    let explained = calculator.breakdown(&rule);

    println!("=== Rule ===");
    println!("{}: {:?}", rule.name, rule.points);
    println!("{}", explained.explanation);

    // Price a weapon profile
    let mut bolter = Weapon::new("bolter", "Bolter", WeaponType::Ranged);
    bolter.range = 24;
    bolter.attacks = "2".into();
    bolter.ap = "-1".into();
    bolter.points = calculator.weapon_points(&bolter);
    bolter.rules.push(RuleReference::new("relentless", 1));

    let weapon = calculator.weapon_breakdown(&WeaponStats::from(&bolter));
    println!("\n=== Weapon ===");
    println!("{} ({})", bolter.name, weapon.weapon_type);
    println!("  range   {:>4} -> {:.2}", weapon.range.value, weapon.range.weighted);
    println!("  attacks {:>4} -> {:.2}", weapon.attacks.value, weapon.attacks.weighted);
    println!("  ap      {:>4} -> {:.2}", weapon.ap.value, weapon.ap.weighted);
    println!("  points: {}", weapon.calculated_points);

    // Cost a unit carrying it
    let mut catalog = InMemoryCatalog::new();
    catalog.insert_rule(rule);
    catalog.insert_weapon(bolter.clone());

    let mut squad = Unit::new("tactical", "Tactical Squad")
        .with_stats(3, 3, 7, 3)
        .with_amount(5);
    squad.weapons.push(WeaponReference::new("bolter", 5, WeaponType::Ranged));
    squad.rules.push(RuleReference::new("relentless", 2));

    let breakdown = calculator.unit_points(&squad, &catalog);
    println!("\n=== Unit ===");
    println!("{} x{}", squad.name, squad.amount);
    for line in &breakdown.line_items {
        println!("  {:<40} {:>5}", line.description, line.points);
    }
    println!("  {:<40} {:>5}", "Total", breakdown.total_points);

    // Embedding fails on dangling references where costing does not
    let populated = populate_unit(&squad, &catalog)?;
    println!(
        "\nPopulated {} with {} rule(s) and {} weapon(s)",
        populated.unit.name,
        populated.populated_rules.len(),
        populated.populated_weapons.len()
    );

    Ok(())
}
