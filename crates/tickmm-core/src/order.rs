//! Order-related types and identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Product identifier as it appears in the tick snapshot (e.g. `"KELP"`).
pub type Symbol = String;

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// A price/quantity request for one product.
///
/// The sign of `quantity` carries the side: positive buys, negative sells.
/// Emitted orders never have a zero quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    pub symbol: Symbol,
    pub price: i64,
    pub quantity: i64,
}

impl Order {
    /// Buy `quantity` (taken as an absolute size) at `price`.
    pub fn buy(symbol: impl Into<Symbol>, price: i64, quantity: i64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            quantity: quantity.saturating_abs(),
        }
    }

    /// Sell `quantity` (taken as an absolute size) at `price`.
    pub fn sell(symbol: impl Into<Symbol>, price: i64, quantity: i64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            quantity: -quantity.saturating_abs(),
        }
    }

    pub fn side(&self) -> OrderSide {
        if self.quantity >= 0 {
            OrderSide::Buy
        } else {
            OrderSide::Sell
        }
    }

    /// Unsigned order size.
    pub fn size(&self) -> i64 {
        self.quantity.saturating_abs()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @ {}",
            self.side(),
            self.size(),
            self.symbol,
            self.price
        )
    }
}
