//! # Product Service Module
//!
//! Ties the footprint calculation to persistence: reads a fresh snapshot of
//! all emission factors, computes the breakdown and total for the submitted
//! ingredients, and stores the resulting product.
//!
//! A failed calculation is a data-quality outcome, not an error: the product
//! is still created, with its footprint fields left empty. Only storage
//! failures propagate to the caller.

use anyhow::Result;
use log::info;
use sqlx::PgPool;

use crate::breakdown::{calculate_breakdown, total_footprint};
use crate::db;
use crate::emission_model::{Ingredient, Product};

/// Calculate a product's footprint and persist the result.
pub async fn calculate_and_save(
    pool: &PgPool,
    name: &str,
    ingredients: &[Ingredient],
) -> Result<Product> {
    info!(
        "Calculating footprint for product '{}' with {} ingredients",
        name,
        ingredients.len()
    );

    let factors = db::list_emission_factors(pool).await?;
    let breakdown = calculate_breakdown(ingredients, &factors);
    let total = total_footprint(breakdown.as_deref());

    db::insert_product(pool, name, ingredients, total, breakdown.as_deref()).await
}

/// All products, newest first.
pub async fn find_all(pool: &PgPool) -> Result<Vec<Product>> {
    db::list_products(pool).await
}

/// A single product by ID, or `None` when it does not exist.
pub async fn find_one(pool: &PgPool, product_id: i32) -> Result<Option<Product>> {
    db::read_product(pool, product_id).await
}
