//! # Emission Data Model
//!
//! This module defines the data structures shared by the footprint calculation
//! and the persistence layer: emission factors (immutable reference data),
//! product ingredients as submitted by the caller, the per-ingredient
//! breakdown derived from them, and the persisted product record.
//!
//! Serde field renames preserve the JSON shape of the `ingredients` and
//! `breakdown` jsonb columns and of the payloads exchanged with the
//! request-handling collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reference emission rate for a named material.
///
/// Factors are created through administrative input and never mutated by the
/// calculator; each calculation reads a fresh snapshot of all factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    /// Material name the factor applies to (e.g., "ham", "flour")
    pub name: String,

    /// Unit the rate is expressed in (e.g., "kg", "L")
    pub unit: String,

    /// Emission rate in kg CO2-equivalent per unit quantity
    #[serde(rename = "emissionCO2eInKgPerUnit")]
    pub emission_co2e_in_kg_per_unit: f64,

    /// Provenance of the rate (e.g., "Agrybalise")
    pub source: String,
}

impl EmissionFactor {
    pub fn new(name: &str, unit: &str, emission_co2e_in_kg_per_unit: f64, source: &str) -> Self {
        Self {
            name: name.to_string(),
            unit: unit.to_string(),
            emission_co2e_in_kg_per_unit,
            source: source.to_string(),
        }
    }
}

/// One ingredient of a product, as supplied per footprint request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name; surrounding whitespace is trimmed before lookup
    pub name: String,

    /// Quantity in `unit`; expected to be positive
    pub quantity: f64,

    /// Unit the quantity is expressed in
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: &str, quantity: f64, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
        }
    }
}

/// Per-ingredient share of a product's carbon footprint.
///
/// `quantity` and `unit` reflect the matched factor's unit when a conversion
/// was applied, the trimmed original values otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientBreakdown {
    pub name: String,

    /// Quantity after any unit conversion
    pub quantity: f64,

    /// Unit the quantity and emission were computed in
    pub unit: String,

    /// Per-unit rate of the matched factor
    #[serde(rename = "emissionFactor")]
    pub emission_factor: Option<f64>,

    /// Weighted emission for this ingredient, in kg CO2e
    #[serde(rename = "emissionCO2eInKg")]
    pub emission_co2e_in_kg: Option<f64>,
}

/// A persisted product with its computed carbon footprint.
///
/// Invariant: `breakdown` is `None` exactly when `total_carbon_footprint` is
/// `None` — the calculation fails as a unit and partial breakdowns are never
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Generated primary key
    pub id: i32,

    pub name: String,

    /// Ingredients exactly as submitted
    pub ingredients: Vec<Ingredient>,

    /// Total footprint in kg CO2e, or `None` when the calculation failed
    #[serde(rename = "totalCarbonFootprint")]
    pub total_carbon_footprint: Option<f64>,

    /// Per-ingredient breakdown, or `None` when the calculation failed
    pub breakdown: Option<Vec<IngredientBreakdown>>,

    /// Set by the database at creation time
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
