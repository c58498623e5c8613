use serde::{Deserialize, Serialize};
use std::fmt;

use super::Side;
use crate::values::{Price, Quantity, Symbol};

/// An order intent handed to the exchange.
///
/// The quantity is signed: positive buys, negative sells. Orders are
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub symbol: Symbol,
    pub price: Price,
    pub quantity: Quantity,
}

impl Order {
    /// Create an order from a signed quantity
    pub fn new(symbol: impl Into<Symbol>, price: Price, quantity: Quantity) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            quantity,
        }
    }

    /// Buy `size` units at `price`
    pub fn buy(symbol: impl Into<Symbol>, price: Price, size: Quantity) -> Self {
        Self::new(symbol, price, Side::Buy.signed(size))
    }

    /// Sell `size` units at `price` (stored as a negative quantity)
    pub fn sell(symbol: impl Into<Symbol>, price: Price, size: Quantity) -> Self {
        Self::new(symbol, price, Side::Sell.signed(size))
    }

    /// Side implied by the sign of the quantity
    pub fn side(&self) -> Option<Side> {
        Side::from_signed(self.quantity)
    }

    /// Unsigned size of the order
    pub fn size(&self) -> Quantity {
        self.quantity.saturating_abs()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side() {
            Some(Side::Buy) => write!(f, "BUY {} {} @ {}", self.size(), self.symbol, self.price),
            Some(Side::Sell) => write!(f, "SELL {} {} @ {}", self.size(), self.symbol, self.price),
            None => write!(f, "EMPTY {} @ {}", self.symbol, self.price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_and_sell_signs() {
        let buy = Order::buy("KELP", 98, 10);
        assert_eq!(buy.quantity, 10);
        assert_eq!(buy.side(), Some(Side::Buy));

        let sell = Order::sell("KELP", 103, 4);
        assert_eq!(sell.quantity, -4);
        assert_eq!(sell.size(), 4);
        assert_eq!(sell.side(), Some(Side::Sell));
    }

    #[test]
    fn test_display() {
        assert_eq!(Order::sell("SQUID_INK", 120, 3).to_string(), "SELL 3 SQUID_INK @ 120");
        assert_eq!(Order::buy("KELP", 95, 2).to_string(), "BUY 2 KELP @ 95");
    }
}
