//! # Carbon Footprint Calculator
//!
//! Computes the carbon footprint of food products from their ingredient
//! lists and a database of known emission factors, and persists the results
//! in Postgres alongside the per-ingredient breakdown.

pub mod breakdown;
pub mod db;
pub mod emission_model;
pub mod factor_index;
pub mod product_service;
pub mod unit_conversion;
