//! Exchange rate table
//!
//! A directed graph of currencies: each currency maps to the currencies it
//! can be converted into and the multiplicative rate of each conversion.
//! The table is static configuration and never changes during a search.

use crate::error::{ConversionError, ConversionResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Currency identifier
pub type Currency = String;

pub const SNOWBALLS: &str = "Snowballs";
pub const PIZZAS: &str = "Pizzas";
pub const SILICON_NUGGETS: &str = "Silicon Nuggets";
pub const SEASHELLS: &str = "Seashells";

/// Directed rate graph: `from -> (to -> rate)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: BTreeMap<Currency, BTreeMap<Currency, f64>>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The island's four-currency trading table
    pub fn reference() -> Self {
        Self::new()
            .with_rate(SNOWBALLS, PIZZAS, 1.45)
            .with_rate(SNOWBALLS, SILICON_NUGGETS, 0.52)
            .with_rate(SNOWBALLS, SEASHELLS, 0.72)
            .with_rate(PIZZAS, SNOWBALLS, 0.7)
            .with_rate(PIZZAS, SILICON_NUGGETS, 0.31)
            .with_rate(PIZZAS, SEASHELLS, 0.48)
            .with_rate(SILICON_NUGGETS, SNOWBALLS, 1.95)
            .with_rate(SILICON_NUGGETS, PIZZAS, 3.1)
            .with_rate(SILICON_NUGGETS, SEASHELLS, 1.49)
            .with_rate(SEASHELLS, SNOWBALLS, 1.34)
            .with_rate(SEASHELLS, PIZZAS, 1.98)
            .with_rate(SEASHELLS, SILICON_NUGGETS, 0.64)
    }

    /// Builder: add or replace the edge `from -> to`
    pub fn with_rate(
        mut self,
        from: impl Into<Currency>,
        to: impl Into<Currency>,
        rate: f64,
    ) -> Self {
        self.rates
            .entry(from.into())
            .or_default()
            .insert(to.into(), rate);
        self
    }

    /// Rate of a single conversion, if the edge exists
    pub fn rate(&self, from: &str, to: &str) -> Option<f64> {
        self.rates.get(from)?.get(to).copied()
    }

    /// Outgoing edges of a currency (empty if it has none)
    pub fn neighbors<'a>(
        &'a self,
        from: &str,
    ) -> impl Iterator<Item = (&'a Currency, f64)> + use<'a> {
        self.rates
            .get(from)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(to, rate)| (to, *rate)))
    }

    /// Currencies with at least one outgoing edge
    pub fn currencies(&self) -> impl Iterator<Item = &Currency> {
        self.rates.keys()
    }

    /// Largest out-degree in the table
    pub fn max_out_degree(&self) -> usize {
        self.rates.values().map(BTreeMap::len).max().unwrap_or(0)
    }

    pub fn edge_count(&self) -> usize {
        self.rates.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }

    /// Product of rates along a path; `None` if any hop is missing
    pub fn path_rate(&self, path: &[Currency]) -> Option<f64> {
        path.windows(2)
            .try_fold(1.0, |acc, pair| Some(acc * self.rate(&pair[0], &pair[1])?))
    }

    /// Every rate must be finite and strictly positive
    pub fn validate(&self) -> ConversionResult<()> {
        for (from, edges) in &self.rates {
            for (to, rate) in edges {
                if !rate.is_finite() || *rate <= 0.0 {
                    return Err(ConversionError::InvalidRate {
                        from: from.clone(),
                        to: to.clone(),
                        rate: *rate,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table_shape() {
        let table = RateTable::reference();
        assert_eq!(table.currencies().count(), 4);
        assert_eq!(table.edge_count(), 12);
        assert_eq!(table.max_out_degree(), 3);
        assert_eq!(table.rate(SEASHELLS, PIZZAS), Some(1.98));
        assert_eq!(table.rate(SEASHELLS, SEASHELLS), None);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_neighbors_of_unknown_currency() {
        let table = RateTable::reference();
        assert_eq!(table.neighbors("Coconuts").count(), 0);
        assert_eq!(table.neighbors(PIZZAS).count(), 3);
    }

    #[test]
    fn test_path_rate() {
        let table = RateTable::new().with_rate("A", "B", 2.0).with_rate("B", "A", 0.4);
        let path = vec!["A".to_string(), "B".to_string(), "A".to_string()];
        assert_eq!(table.path_rate(&path), Some(0.8));

        let broken = vec!["A".to_string(), "C".to_string()];
        assert_eq!(table.path_rate(&broken), None);
    }

    #[test]
    fn test_validate_rejects_non_positive_rate() {
        let table = RateTable::new().with_rate("A", "B", 0.0);
        assert_eq!(
            table.validate(),
            Err(ConversionError::InvalidRate {
                from: "A".to_string(),
                to: "B".to_string(),
                rate: 0.0
            })
        );

        let table = RateTable::new().with_rate("A", "B", f64::NAN);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_deserialize_nested_map() {
        let json = r#"{"A": {"B": 2.0}, "B": {"A": 0.4}}"#;
        let table: RateTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.rate("A", "B"), Some(2.0));
        assert_eq!(table.rate("B", "A"), Some(0.4));
    }
}
