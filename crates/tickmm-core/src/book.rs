//! Per-product order book snapshot and book analytics.
//!
//! Quantities keep the sign convention of the incoming snapshot: resting bids
//! are positive, resting asks are negative. Levels are held in `BTreeMap`s so
//! every scan over the book has a deterministic price order.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// One side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSide {
    Bid,
    Ask,
}

impl fmt::Display for BookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bid => write!(f, "bid"),
            Self::Ask => write!(f, "ask"),
        }
    }
}

/// Resting liquidity for one product at one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDepth {
    /// Bids: price -> positive resting quantity.
    #[serde(default, alias = "bids")]
    pub buy_orders: BTreeMap<i64, i64>,
    /// Asks: price -> negative resting quantity.
    #[serde(default, alias = "asks")]
    pub sell_orders: BTreeMap<i64, i64>,
}

impl OrderDepth {
    /// Build a book from `(price, quantity)` pairs, normalising the sign of
    /// each side.
    pub fn from_levels(
        bids: impl IntoIterator<Item = (i64, i64)>,
        asks: impl IntoIterator<Item = (i64, i64)>,
    ) -> Self {
        Self {
            buy_orders: bids
                .into_iter()
                .map(|(p, q)| (p, q.saturating_abs()))
                .collect(),
            sell_orders: asks
                .into_iter()
                .map(|(p, q)| (p, -q.saturating_abs()))
                .collect(),
        }
    }

    /// Asks as `(price, available size)`, cheapest first.
    pub fn asks_ascending(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.sell_orders.iter().map(|(&p, &q)| (p, q.saturating_abs()))
    }

    /// Bids as `(price, available size)`, highest first.
    pub fn bids_descending(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.buy_orders
            .iter()
            .rev()
            .map(|(&p, &q)| (p, q.saturating_abs()))
    }

    /// Resting bid size at exactly `price`, if the level exists.
    pub fn bid_at(&self, price: i64) -> Option<i64> {
        self.buy_orders.get(&price).map(|q| q.saturating_abs())
    }

    /// Resting ask size at exactly `price`, if the level exists.
    pub fn ask_at(&self, price: i64) -> Option<i64> {
        self.sell_orders.get(&price).map(|q| q.saturating_abs())
    }

    /// Volume-weighted average price of one side.
    ///
    /// Fails with `EmptyBookSide` when the side has no resting quantity and
    /// with `Overflow` when the notional does not fit a `Decimal`.
    pub fn vwap(&self, side: BookSide) -> Result<Decimal> {
        let levels = match side {
            BookSide::Bid => &self.buy_orders,
            BookSide::Ask => &self.sell_orders,
        };

        let (volume, value) = levels
            .iter()
            .try_fold(
                (Decimal::ZERO, Decimal::ZERO),
                |(volume, value), (&price, &qty)| {
                    let qty = Decimal::from(qty).abs();
                    let notional = Decimal::from(price).checked_mul(qty)?;
                    Some((volume.checked_add(qty)?, value.checked_add(notional)?))
                },
            )
            .ok_or(CoreError::Overflow { side })?;

        if volume.is_zero() {
            return Err(CoreError::EmptyBookSide { side });
        }
        Ok(value / volume)
    }

    /// Mean of the bid-side and ask-side VWAPs.
    pub fn midprice(&self) -> Result<Decimal> {
        let bid_vwap = self.vwap(BookSide::Bid)?;
        let ask_vwap = self.vwap(BookSide::Ask)?;
        let total = bid_vwap
            .checked_add(ask_vwap)
            .ok_or(CoreError::Overflow { side: BookSide::Ask })?;
        Ok(total / Decimal::TWO)
    }
}
