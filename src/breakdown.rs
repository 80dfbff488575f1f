//! # Breakdown Calculation Module
//!
//! Computes the per-ingredient carbon footprint of a product against a list
//! of known emission factors, and aggregates it into a total.
//!
//! The calculation is all-or-nothing: a single ingredient with no matching
//! factor, or whose unit cannot be converted to the factor's unit,
//! invalidates the whole breakdown. Unmatched ingredients are never silently
//! skipped.

use log::{debug, warn};

use crate::emission_model::{EmissionFactor, Ingredient, IngredientBreakdown};
use crate::factor_index::EmissionFactorIndex;
use crate::unit_conversion::{self, ConversionError};

/// Why a breakdown calculation failed.
///
/// Failures are data-quality outcomes, not faults: they are logged and
/// surface to the caller as a `None` breakdown, never as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum BreakdownFailure {
    /// No emission factor matches the ingredient name
    UnmatchedIngredient(String),
    /// Factor and ingredient units differ and no conversion rule exists
    UnsupportedConversion { ingredient: String, from: String, to: String },
}

impl std::fmt::Display for BreakdownFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreakdownFailure::UnmatchedIngredient(name) => {
                write!(f, "No emission factor found for ingredient '{name}'")
            }
            BreakdownFailure::UnsupportedConversion { ingredient, from, to } => {
                write!(
                    f,
                    "Cannot convert ingredient '{ingredient}' from '{from}' to '{to}'"
                )
            }
        }
    }
}

impl std::error::Error for BreakdownFailure {}

/// Calculate the per-ingredient breakdown for a product.
///
/// Each ingredient is matched against the factors by exact (trimmed name,
/// trimmed unit) first, then by name alone in factor supply order. Returns
/// `None` when any ingredient stays unmatched or needs an unsupported unit
/// conversion. An empty ingredient list yields an empty breakdown, not
/// `None`.
pub fn calculate_breakdown(
    ingredients: &[Ingredient],
    factors: &[EmissionFactor],
) -> Option<Vec<IngredientBreakdown>> {
    let index = EmissionFactorIndex::build(factors);

    match try_calculate(ingredients, &index) {
        Ok(breakdown) => Some(breakdown),
        Err(failure) => {
            warn!("Breakdown calculation failed: {failure}");
            None
        }
    }
}

fn try_calculate(
    ingredients: &[Ingredient],
    index: &EmissionFactorIndex,
) -> Result<Vec<IngredientBreakdown>, BreakdownFailure> {
    let mut breakdown = Vec::with_capacity(ingredients.len());

    for ingredient in ingredients {
        let name = ingredient.name.trim();
        let unit = ingredient.unit.trim();

        let factor = index
            .find(name, unit)
            .ok_or_else(|| BreakdownFailure::UnmatchedIngredient(name.to_string()))?;

        let factor_unit = factor.unit.trim();

        let (quantity, used_unit) = if factor_unit == unit {
            (ingredient.quantity, unit)
        } else {
            let converted = unit_conversion::convert(ingredient.quantity, unit, factor_unit)
                .map_err(|ConversionError::Unsupported { from, to }| {
                    BreakdownFailure::UnsupportedConversion {
                        ingredient: name.to_string(),
                        from,
                        to,
                    }
                })?;
            (converted, factor_unit)
        };

        let emission = quantity * factor.emission_co2e_in_kg_per_unit;
        debug!(
            "Matched '{}': {} {} x {} kgCO2e/{} = {} kgCO2e",
            name, quantity, used_unit, factor.emission_co2e_in_kg_per_unit, factor_unit, emission
        );

        breakdown.push(IngredientBreakdown {
            name: name.to_string(),
            quantity,
            unit: used_unit.to_string(),
            emission_factor: Some(factor.emission_co2e_in_kg_per_unit),
            emission_co2e_in_kg: Some(emission),
        });
    }

    Ok(breakdown)
}

/// Sum a breakdown into a total footprint.
///
/// A failed (`None`) breakdown propagates to a `None` total. Entries with a
/// missing emission count as 0, and an empty breakdown totals 0, not `None`.
pub fn total_footprint(breakdown: Option<&[IngredientBreakdown]>) -> Option<f64> {
    breakdown.map(|entries| {
        entries
            .iter()
            .map(|entry| entry.emission_co2e_in_kg.unwrap_or(0.0))
            .sum()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emission_model::EmissionFactor;

    fn sample_factors() -> Vec<EmissionFactor> {
        vec![
            EmissionFactor::new("ham", "kg", 0.11, "Agrybalise"),
            EmissionFactor::new("cheese", "kg", 0.12, "Agrybalise"),
            EmissionFactor::new("tomato", "kg", 0.13, "Agrybalise"),
        ]
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_breakdown_for_exact_matches() {
        let ingredients = vec![
            Ingredient::new("ham", 0.1, "kg"),
            Ingredient::new("cheese", 0.15, "kg"),
        ];

        let breakdown = calculate_breakdown(&ingredients, &sample_factors()).unwrap();

        assert_eq!(breakdown.len(), 2);
        assert!(close(breakdown[0].emission_co2e_in_kg.unwrap(), 0.011));
        assert!(close(breakdown[1].emission_co2e_in_kg.unwrap(), 0.018));
    }

    #[test]
    fn test_unmatched_ingredient_nulls_everything() {
        let ingredients = vec![
            Ingredient::new("ham", 0.1, "kg"),
            Ingredient::new("chicken", 0.2, "kg"),
        ];

        assert!(calculate_breakdown(&ingredients, &sample_factors()).is_none());
    }

    #[test]
    fn test_grams_converted_to_kilograms() {
        let ingredients = vec![Ingredient::new("ham", 100.0, "g")];

        let breakdown = calculate_breakdown(&ingredients, &sample_factors()).unwrap();

        assert_eq!(breakdown.len(), 1);
        assert!(close(breakdown[0].quantity, 0.1));
        assert_eq!(breakdown[0].unit, "kg");
        assert_eq!(breakdown[0].emission_factor, Some(0.11));
        assert!(close(breakdown[0].emission_co2e_in_kg.unwrap(), 0.011));
    }

    #[test]
    fn test_kilograms_converted_to_grams() {
        let factors = vec![EmissionFactor::new("salt", "g", 0.001, "test")];
        let ingredients = vec![Ingredient::new("salt", 1.0, "kg")];

        let breakdown = calculate_breakdown(&ingredients, &factors).unwrap();

        assert!(close(breakdown[0].quantity, 1000.0));
        assert_eq!(breakdown[0].unit, "g");
    }

    #[test]
    fn test_milliliters_converted_to_liters() {
        let factors = vec![EmissionFactor::new("water", "L", 0.0001, "test")];
        let ingredients = vec![Ingredient::new("water", 500.0, "ml")];

        let breakdown = calculate_breakdown(&ingredients, &factors).unwrap();

        assert!(close(breakdown[0].quantity, 0.5));
        assert_eq!(breakdown[0].unit, "L");
    }

    #[test]
    fn test_unsupported_conversion_nulls_everything() {
        let ingredients = vec![Ingredient::new("ham", 100.0, "lbs")];

        assert!(calculate_breakdown(&ingredients, &sample_factors()).is_none());
    }

    #[test]
    fn test_whitespace_trimmed_before_lookup() {
        let ingredients = vec![Ingredient::new("  ham ", 0.1, " kg ")];

        let breakdown = calculate_breakdown(&ingredients, &sample_factors()).unwrap();

        assert_eq!(breakdown[0].name, "ham");
        assert_eq!(breakdown[0].unit, "kg");
        assert!(close(breakdown[0].emission_co2e_in_kg.unwrap(), 0.011));
    }

    #[test]
    fn test_name_fallback_ignores_unit() {
        // "tomato" factor is in kg; the request comes in grams and converts.
        let ingredients = vec![Ingredient::new("tomato", 250.0, "g")];

        let breakdown = calculate_breakdown(&ingredients, &sample_factors()).unwrap();

        assert!(close(breakdown[0].quantity, 0.25));
        assert!(close(breakdown[0].emission_co2e_in_kg.unwrap(), 0.0325));
    }

    #[test]
    fn test_empty_ingredient_list_yields_empty_breakdown() {
        let breakdown = calculate_breakdown(&[], &sample_factors());

        assert_eq!(breakdown, Some(vec![]));
        assert_eq!(total_footprint(breakdown.as_deref()), Some(0.0));
    }

    #[test]
    fn test_total_sums_emissions() {
        let ingredients = vec![
            Ingredient::new("ham", 0.1, "kg"),
            Ingredient::new("cheese", 0.15, "kg"),
        ];

        let breakdown = calculate_breakdown(&ingredients, &sample_factors());
        let total = total_footprint(breakdown.as_deref()).unwrap();

        assert!(close(total, 0.029));
    }

    #[test]
    fn test_total_of_none_is_none() {
        assert_eq!(total_footprint(None), None);
    }

    #[test]
    fn test_total_treats_missing_emissions_as_zero() {
        let entries = vec![
            IngredientBreakdown {
                name: "ham".to_string(),
                quantity: 0.1,
                unit: "kg".to_string(),
                emission_factor: Some(0.11),
                emission_co2e_in_kg: Some(0.011),
            },
            IngredientBreakdown {
                name: "mystery".to_string(),
                quantity: 1.0,
                unit: "kg".to_string(),
                emission_factor: None,
                emission_co2e_in_kg: None,
            },
        ];

        assert!(close(total_footprint(Some(&entries)).unwrap(), 0.011));
    }

    #[test]
    fn test_zero_emission_factor_totals_zero() {
        let factors = vec![EmissionFactor::new("water", "L", 0.0, "test")];
        let ingredients = vec![Ingredient::new("water", 1.0, "L")];

        let breakdown = calculate_breakdown(&ingredients, &factors);
        assert_eq!(total_footprint(breakdown.as_deref()), Some(0.0));
    }

    #[test]
    fn test_failure_display() {
        let failure = BreakdownFailure::UnmatchedIngredient("chicken".to_string());
        assert_eq!(
            failure.to_string(),
            "No emission factor found for ingredient 'chicken'"
        );

        let failure = BreakdownFailure::UnsupportedConversion {
            ingredient: "ham".to_string(),
            from: "lbs".to_string(),
            to: "kg".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "Cannot convert ingredient 'ham' from 'lbs' to 'kg'"
        );
    }
}
