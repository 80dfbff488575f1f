//! # Emission Factor Index Module
//!
//! Builds the lookup structure used to match ingredients against known
//! emission factors. The index is keyed by `"name:unit"` and additionally
//! keeps insertion order so that the name-only fallback can scan factors in
//! the order they were supplied.

use std::collections::HashMap;

use crate::emission_model::EmissionFactor;

/// Builds the `"name:unit"` lookup key for a factor or an ingredient.
///
/// Both components are trimmed of surrounding whitespace before
/// concatenation, so padded administrative input and padded request input
/// resolve to the same key.
pub fn factor_key(name: &str, unit: &str) -> String {
    format!("{}:{}", name.trim(), unit.trim())
}

/// Insertion-ordered index from `"name:unit"` to an emission factor.
///
/// Duplicate (name, unit) pairs follow map-overwrite semantics: the last
/// factor wins, at the position where the key first appeared.
#[derive(Debug, Clone, Default)]
pub struct EmissionFactorIndex {
    entries: Vec<EmissionFactor>,
    positions: HashMap<String, usize>,
}

impl EmissionFactorIndex {
    /// Build the index from a factor list, preserving iteration order.
    pub fn build(factors: &[EmissionFactor]) -> Self {
        let mut index = Self::default();
        for factor in factors {
            index.insert(factor.clone());
        }
        index
    }

    fn insert(&mut self, factor: EmissionFactor) {
        let key = factor_key(&factor.name, &factor.unit);
        match self.positions.get(&key) {
            Some(&pos) => self.entries[pos] = factor,
            None => {
                self.positions.insert(key, self.entries.len());
                self.entries.push(factor);
            }
        }
    }

    /// Exact lookup on (name, unit). Inputs are expected pre-trimmed.
    pub fn exact(&self, name: &str, unit: &str) -> Option<&EmissionFactor> {
        self.positions
            .get(&factor_key(name, unit))
            .map(|&pos| &self.entries[pos])
    }

    /// First factor in insertion order whose name matches, regardless of
    /// unit. When several factors share a name with different units this is
    /// a tie-break by supply order, not a correctness guarantee.
    pub fn by_name(&self, name: &str) -> Option<&EmissionFactor> {
        self.entries.iter().find(|factor| factor.name.trim() == name)
    }

    /// Exact (name, unit) match, falling back to the first name match.
    pub fn find(&self, name: &str, unit: &str) -> Option<&EmissionFactor> {
        self.exact(name, unit).or_else(|| self.by_name(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_key_trims_both_components() {
        assert_eq!(factor_key("ham", "kg"), "ham:kg");
        assert_eq!(factor_key("  ham ", " kg  "), "ham:kg");
    }

    #[test]
    fn test_exact_lookup() {
        let index = EmissionFactorIndex::build(&[
            EmissionFactor::new("ham", "kg", 0.11, "test"),
            EmissionFactor::new("cheese", "kg", 0.12, "test"),
        ]);

        assert_eq!(index.len(), 2);
        let factor = index.exact("cheese", "kg").unwrap();
        assert_eq!(factor.emission_co2e_in_kg_per_unit, 0.12);
        assert!(index.exact("cheese", "g").is_none());
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let index = EmissionFactorIndex::build(&[
            EmissionFactor::new("ham", "kg", 0.11, "old"),
            EmissionFactor::new("ham", "kg", 0.25, "new"),
        ]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.exact("ham", "kg").unwrap().source, "new");
    }

    #[test]
    fn test_name_fallback_uses_insertion_order() {
        let index = EmissionFactorIndex::build(&[
            EmissionFactor::new("milk", "L", 0.9, "test"),
            EmissionFactor::new("milk", "kg", 1.1, "test"),
        ]);

        // No exact unit match: the first supplied factor wins.
        let factor = index.find("milk", "g").unwrap();
        assert_eq!(factor.unit, "L");
    }

    #[test]
    fn test_find_prefers_exact_match() {
        let index = EmissionFactorIndex::build(&[
            EmissionFactor::new("milk", "L", 0.9, "test"),
            EmissionFactor::new("milk", "kg", 1.1, "test"),
        ]);

        let factor = index.find("milk", "kg").unwrap();
        assert_eq!(factor.unit, "kg");
    }

    #[test]
    fn test_unknown_name_returns_none() {
        let index = EmissionFactorIndex::build(&[EmissionFactor::new("ham", "kg", 0.11, "test")]);

        assert!(index.find("chicken", "kg").is_none());
    }

    #[test]
    fn test_empty_index() {
        let index = EmissionFactorIndex::build(&[]);

        assert!(index.is_empty());
        assert!(index.find("ham", "kg").is_none());
    }
}
