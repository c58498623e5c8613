//! Atoll Conversion
//!
//! Static exchange-rate table and the search for the most profitable
//! sequence of currency conversions of a fixed length.
//!
//! ```rust
//! use atoll_conversion::{PathOptimizer, PathQuery, RateTable};
//!
//! let table = RateTable::new().with_rate("A", "B", 2.0).with_rate("B", "A", 0.4);
//! let optimizer = PathOptimizer::new(table).unwrap();
//! let walk = optimizer
//!     .best_walk(&PathQuery::round_trip("A", 100.0, 2))
//!     .unwrap()
//!     .expect("A -> B -> A exists");
//! assert_eq!(walk.to_string(), "A -> B -> A");
//! ```

pub mod error;
pub mod optimizer;
pub mod rates;

pub use error::{ConversionError, ConversionResult};
pub use optimizer::{PathOptimizer, PathQuery, Walk};
pub use rates::{Currency, RateTable};
