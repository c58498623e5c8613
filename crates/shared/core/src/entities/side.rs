use serde::{Deserialize, Serialize};

use crate::values::Quantity;

/// Order side (Buy or Sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Side implied by a signed quantity; `None` for zero
    pub fn from_signed(quantity: Quantity) -> Option<Self> {
        match quantity {
            q if q > 0 => Some(Side::Buy),
            q if q < 0 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Apply this side's sign to an unsigned size
    pub fn signed(&self, size: Quantity) -> Quantity {
        match self {
            Side::Buy => size,
            Side::Sell => -size,
        }
    }
}
