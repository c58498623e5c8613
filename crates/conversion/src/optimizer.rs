//! Multi-hop conversion search
//!
//! Finds the walk of exactly `hops` conversions from `start` to `end` that
//! leaves the most of the end currency. [`PathOptimizer::best_walk`]
//! enumerates every walk level by level; the table is small enough that
//! exponential growth in `hops` is acceptable.
//!
//! [`PathOptimizer::best_walk_tabulated`] keeps only the best amount per
//! (currency, hop) pair. With positive rates and a positive starting
//! amount the two agree on the optimal amount.

use crate::{
    error::{ConversionError, ConversionResult},
    rates::{Currency, RateTable},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathQuery {
    pub start: Currency,
    pub end: Currency,
    pub amount: f64,
    pub hops: usize,
}

impl PathQuery {
    pub fn new(
        start: impl Into<Currency>,
        end: impl Into<Currency>,
        amount: f64,
        hops: usize,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            amount,
            hops,
        }
    }

    /// Start and end at the same currency
    pub fn round_trip(currency: impl Into<Currency>, amount: f64, hops: usize) -> Self {
        let currency = currency.into();
        Self::new(currency.clone(), currency, amount, hops)
    }
}

/// Winning walk and the amount it ends with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Walk {
    pub path: Vec<Currency>,
    pub amount: f64,
}

impl Walk {
    /// Number of conversions performed
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Gain over the starting amount (may be negative)
    pub fn profit(&self, start_amount: f64) -> f64 {
        self.amount - start_amount
    }
}

impl fmt::Display for Walk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.join(" -> "))
    }
}

/// Partial walk during expansion
#[derive(Debug, Clone)]
struct SearchState {
    path: Vec<Currency>,
    amount: f64,
}

impl SearchState {
    fn origin(start: &str, amount: f64) -> Self {
        Self {
            path: vec![start.to_string()],
            amount,
        }
    }

    fn terminal(&self) -> &str {
        // Never empty: every state starts from `origin`
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    fn extend(&self, to: &Currency, rate: f64) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(to.clone());
        Self {
            path,
            amount: self.amount * rate,
        }
    }
}

/// One cell of the tabulated search: best amount reaching a currency at a
/// given hop, and the currency it came from.
#[derive(Debug, Clone, Copy)]
struct Cell<'a> {
    amount: f64,
    from: Option<&'a Currency>,
}

/// Conversion path optimizer over a validated rate table
#[derive(Debug, Clone)]
pub struct PathOptimizer {
    table: RateTable,
}

impl PathOptimizer {
    /// Create an optimizer, rejecting tables with unusable rates
    pub fn new(table: RateTable) -> ConversionResult<Self> {
        table.validate()?;
        Ok(Self { table })
    }

    /// Optimizer over the reference four-currency table
    pub fn reference() -> Self {
        Self {
            table: RateTable::reference(),
        }
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Exhaustive breadth-first search.
    ///
    /// Returns `Ok(None)` when no walk of exactly `hops` conversions ends at
    /// `end`. Ties keep the first walk found.
    pub fn best_walk(&self, query: &PathQuery) -> ConversionResult<Option<Walk>> {
        check_amount(query.amount)?;

        let mut states = vec![SearchState::origin(&query.start, query.amount)];
        for hop in 1..=query.hops {
            let mut next = Vec::with_capacity(states.len() * self.table.max_out_degree());
            for state in &states {
                for (to, rate) in self.table.neighbors(state.terminal()) {
                    next.push(state.extend(to, rate));
                }
            }
            log::debug!("[PathOptimizer] hop {}: {} walks", hop, next.len());
            states = next;
        }

        let mut best: Option<SearchState> = None;
        for state in states {
            if state.terminal() != query.end {
                continue;
            }
            if best.as_ref().is_none_or(|b| state.amount > b.amount) {
                best = Some(state);
            }
        }

        Ok(best.map(|state| Walk {
            path: state.path,
            amount: state.amount,
        }))
    }

    /// Tabulated search over (currency, hop) with back-pointers.
    ///
    /// Linear in `hops` instead of exponential. Requires a positive
    /// starting amount; anything else falls back to [`Self::best_walk`].
    pub fn best_walk_tabulated(&self, query: &PathQuery) -> ConversionResult<Option<Walk>> {
        check_amount(query.amount)?;
        if query.amount <= 0.0 {
            return self.best_walk(query);
        }

        let mut levels: Vec<BTreeMap<&Currency, Cell<'_>>> = Vec::with_capacity(query.hops + 1);
        let mut origin = BTreeMap::new();
        origin.insert(
            &query.start,
            Cell {
                amount: query.amount,
                from: None,
            },
        );
        levels.push(origin);

        for hop in 1..=query.hops {
            let mut next: BTreeMap<&Currency, Cell<'_>> = BTreeMap::new();
            for (currency, cell) in &levels[hop - 1] {
                for (to, rate) in self.table.neighbors(currency) {
                    let amount = cell.amount * rate;
                    let better = next.get(to).is_none_or(|existing| amount > existing.amount);
                    if better {
                        next.insert(
                            to,
                            Cell {
                                amount,
                                from: Some(*currency),
                            },
                        );
                    }
                }
            }
            log::debug!("[PathOptimizer] hop {}: {} reachable", hop, next.len());
            levels.push(next);
        }

        let Some(last) = levels.last().and_then(|level| level.get(&query.end)) else {
            return Ok(None);
        };
        let amount = last.amount;

        // Walk the back-pointers from the end currency to the start
        let mut path = Vec::with_capacity(query.hops + 1);
        let mut current = &query.end;
        path.push(current.clone());
        for level in levels.iter().skip(1).rev() {
            let Some(previous) = level.get(current).and_then(|cell| cell.from) else {
                break;
            };
            path.push(previous.clone());
            current = previous;
        }
        path.reverse();

        Ok(Some(Walk { path, amount }))
    }
}

fn check_amount(amount: f64) -> ConversionResult<()> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(ConversionError::InvalidAmount(amount))
    }
}
