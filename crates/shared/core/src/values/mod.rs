/// Price value - integer ticks as quoted by the simulated exchange
pub type Price = i64;

/// Quantity value - signed; positive for buys/bid depth, negative for sells/ask depth
pub type Quantity = i64;

/// Simulation timestamp (exchange ticks, not wall-clock time)
pub type Timestamp = i64;

/// Symbol identifier for a tradeable product
pub type Symbol = String;
