//! # Footprint Calculation Example
//!
//! This example runs the pure calculation path end to end without a
//! database: a set of known emission factors, a few products, and the
//! resulting breakdowns and totals, including a product that fails the
//! all-or-nothing matching policy.

use carbon_footprint::breakdown::{calculate_breakdown, total_footprint};
use carbon_footprint::emission_model::{EmissionFactor, Ingredient};

fn main() {
    env_logger::init();

    println!("🌍 Carbon Footprint Calculator Example");
    println!("======================================\n");

    let factors = vec![
        EmissionFactor::new("ham", "kg", 0.11, "Agrybalise"),
        EmissionFactor::new("cheese", "kg", 0.12, "Agrybalise"),
        EmissionFactor::new("tomato", "kg", 0.13, "Agrybalise"),
        EmissionFactor::new("flour", "kg", 0.14, "Agrybalise"),
        EmissionFactor::new("oliveOil", "kg", 0.15, "Agrybalise"),
    ];

    println!("📋 Known emission factors:");
    for factor in &factors {
        println!(
            "  {} ({}): {} kgCO2e per unit [{}]",
            factor.name, factor.unit, factor.emission_co2e_in_kg_per_unit, factor.source
        );
    }

    // Example 1: every ingredient matches a factor, grams convert to kg
    println!("\n🍕 Example 1: Ham & cheese pizza");
    println!("--------------------------------");
    let pizza = vec![
        Ingredient::new("ham", 100.0, "g"),
        Ingredient::new("cheese", 150.0, "g"),
        Ingredient::new("tomato", 0.4, "kg"),
        Ingredient::new("flour", 0.7, "kg"),
        Ingredient::new("oliveOil", 0.3, "kg"),
    ];
    report(&pizza, &factors);

    // Example 2: one unmatched ingredient nulls the whole result
    println!("\n🥪 Example 2: Sandwich with an unknown ingredient");
    println!("-------------------------------------------------");
    let sandwich = vec![
        Ingredient::new("ham", 0.1, "kg"),
        Ingredient::new("unicornMeat", 0.2, "kg"),
    ];
    report(&sandwich, &factors);

    // Example 3: zero ingredients still has a defined footprint
    println!("\n📦 Example 3: Empty product");
    println!("---------------------------");
    report(&[], &factors);
}

fn report(ingredients: &[Ingredient], factors: &[EmissionFactor]) {
    let breakdown = calculate_breakdown(ingredients, factors);
    let total = total_footprint(breakdown.as_deref());

    match (&breakdown, total) {
        (Some(entries), Some(total)) => {
            for entry in entries {
                println!(
                    "  {} → {} {} × {} = {:.4} kgCO2e",
                    entry.name,
                    entry.quantity,
                    entry.unit,
                    entry.emission_factor.unwrap_or(0.0),
                    entry.emission_co2e_in_kg.unwrap_or(0.0)
                );
            }
            println!("  Total: {total:.4} kgCO2e");
        }
        _ => println!("  Calculation failed: footprint is unknown"),
    }
}
