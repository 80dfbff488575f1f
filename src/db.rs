//! # Database Module
//!
//! Postgres persistence for emission factors and products. Emission factors
//! are reference data written through administrative input; products carry
//! their submitted ingredients and the computed breakdown/total as jsonb
//! columns, with both nullable footprint fields left NULL when the
//! calculation failed.

use anyhow::{Context, Result};
use log::info;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::emission_model::{EmissionFactor, Ingredient, IngredientBreakdown, Product};

/// Initialize the database schema
pub async fn init_database_schema(pool: &PgPool) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS carbon_emission_factors (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            unit TEXT NOT NULL,
            emission_co2e_in_kg_per_unit DOUBLE PRECISION NOT NULL,
            source TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create carbon_emission_factors table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS products (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            ingredients JSONB NOT NULL,
            total_carbon_footprint DOUBLE PRECISION,
            breakdown JSONB,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create products table")?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Persist a batch of emission factors and return the stored records.
pub async fn create_emission_factors(
    pool: &PgPool,
    factors: &[EmissionFactor],
) -> Result<Vec<EmissionFactor>> {
    info!("Creating {} emission factors", factors.len());

    let mut tx = pool
        .begin()
        .await
        .context("Failed to start emission factor transaction")?;

    let mut stored = Vec::with_capacity(factors.len());
    for factor in factors {
        let row = sqlx::query(
            "INSERT INTO carbon_emission_factors (name, unit, emission_co2e_in_kg_per_unit, source)
             VALUES ($1, $2, $3, $4)
             RETURNING name, unit, emission_co2e_in_kg_per_unit, source",
        )
        .bind(&factor.name)
        .bind(&factor.unit)
        .bind(factor.emission_co2e_in_kg_per_unit)
        .bind(&factor.source)
        .fetch_one(&mut *tx)
        .await
        .context("Failed to insert emission factor")?;

        stored.push(emission_factor_from_row(&row)?);
    }

    tx.commit()
        .await
        .context("Failed to commit emission factor transaction")?;

    Ok(stored)
}

/// Read all known emission factors, in the order they were created.
///
/// Creation order carries through to the factor index, where it decides the
/// name-only fallback between factors sharing a name.
pub async fn list_emission_factors(pool: &PgPool) -> Result<Vec<EmissionFactor>> {
    let rows = sqlx::query(
        "SELECT name, unit, emission_co2e_in_kg_per_unit, source
         FROM carbon_emission_factors
         ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .context("Failed to list emission factors")?;

    rows.iter().map(emission_factor_from_row).collect()
}

/// Insert a product with its computed footprint and return the stored row.
pub async fn insert_product(
    pool: &PgPool,
    name: &str,
    ingredients: &[Ingredient],
    total_carbon_footprint: Option<f64>,
    breakdown: Option<&[IngredientBreakdown]>,
) -> Result<Product> {
    info!("Creating product: {}", name);

    let row = sqlx::query(
        "INSERT INTO products (name, ingredients, total_carbon_footprint, breakdown)
         VALUES ($1, $2, $3, $4)
         RETURNING id, name, ingredients, total_carbon_footprint, breakdown, created_at",
    )
    .bind(name)
    .bind(Json(ingredients))
    .bind(total_carbon_footprint)
    .bind(breakdown.map(Json))
    .fetch_one(pool)
    .await
    .context("Failed to insert product")?;

    let product = product_from_row(&row)?;
    info!("Product created with ID: {}", product.id);

    Ok(product)
}

/// Read all products, newest first.
pub async fn list_products(pool: &PgPool) -> Result<Vec<Product>> {
    let rows = sqlx::query(
        "SELECT id, name, ingredients, total_carbon_footprint, breakdown, created_at
         FROM products
         ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
    .context("Failed to list products")?;

    rows.iter().map(product_from_row).collect()
}

/// Read a product by ID
pub async fn read_product(pool: &PgPool, product_id: i32) -> Result<Option<Product>> {
    let row = sqlx::query(
        "SELECT id, name, ingredients, total_carbon_footprint, breakdown, created_at
         FROM products
         WHERE id = $1",
    )
    .bind(product_id)
    .fetch_optional(pool)
    .await
    .context("Failed to read product")?;

    row.as_ref().map(product_from_row).transpose()
}

fn emission_factor_from_row(row: &PgRow) -> Result<EmissionFactor> {
    Ok(EmissionFactor {
        name: row.try_get("name")?,
        unit: row.try_get("unit")?,
        emission_co2e_in_kg_per_unit: row.try_get("emission_co2e_in_kg_per_unit")?,
        source: row.try_get("source")?,
    })
}

fn product_from_row(row: &PgRow) -> Result<Product> {
    let Json(ingredients): Json<Vec<Ingredient>> = row.try_get("ingredients")?;
    let breakdown: Option<Json<Vec<IngredientBreakdown>>> = row.try_get("breakdown")?;

    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        ingredients,
        total_carbon_footprint: row.try_get("total_carbon_footprint")?,
        breakdown: breakdown.map(|json| json.0),
        created_at: row.try_get("created_at")?,
    })
}
