//! Inventory bookkeeping within a tick, and inventory clearing.
//!
//! `TickInventory` tracks how much a policy has committed to buy and sell so
//! far this tick, so every step sizes its orders against the capacity left
//! under the position limit.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tickmm_core::{Order, OrderDepth};
use tracing::trace;

/// Position and per-tick order volume for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInventory {
    /// Inventory at the start of the tick.
    pub position: i64,
    /// Maximum absolute inventory.
    pub limit: i64,
    /// Quantity committed to buy this tick.
    pub bought: i64,
    /// Quantity committed to sell this tick.
    pub sold: i64,
}

impl TickInventory {
    pub fn new(position: i64, limit: i64) -> Self {
        Self {
            position,
            limit,
            bought: 0,
            sold: 0,
        }
    }

    /// Position if everything committed so far executes.
    pub fn net_position(&self) -> i64 {
        self.position
            .saturating_add(self.bought)
            .saturating_sub(self.sold)
    }

    /// Remaining quantity that can be bought without exceeding `+limit`.
    pub fn buy_capacity(&self) -> i64 {
        self.limit
            .saturating_sub(self.position)
            .saturating_sub(self.bought)
            .max(0)
    }

    /// Remaining quantity that can be sold without exceeding `-limit`.
    pub fn sell_capacity(&self) -> i64 {
        self.limit
            .saturating_add(self.position)
            .saturating_sub(self.sold)
            .max(0)
    }

    /// Clamp `wanted` to buy capacity and commit it. Returns the committed size.
    pub fn commit_buy(&mut self, wanted: i64) -> i64 {
        let qty = wanted.min(self.buy_capacity()).max(0);
        self.bought += qty;
        qty
    }

    /// Clamp `wanted` to sell capacity and commit it. Returns the committed size.
    pub fn commit_sell(&mut self, wanted: i64) -> i64 {
        let qty = wanted.min(self.sell_capacity()).max(0);
        self.sold += qty;
        qty
    }
}

/// Flatten leftover inventory against a resting order at the fair price.
///
/// When net long, sells into a bid resting exactly at `ceil(fair_value)`;
/// when net short, buys from an ask resting exactly at `floor(fair_value)`.
/// Size is bounded by the level, the net position and the remaining
/// capacity. Appends at most one order to `orders`.
pub fn clear_position(
    orders: &mut Vec<Order>,
    book: &OrderDepth,
    symbol: &str,
    mut inventory: TickInventory,
    fair_value: Decimal,
) -> TickInventory {
    let net = inventory.net_position();

    if net > 0 {
        let Some(price) = fair_value.ceil().to_i64() else {
            return inventory;
        };
        if let Some(available) = book.bid_at(price) {
            let qty = inventory.commit_sell(available.min(net));
            if qty > 0 {
                trace!(product = %symbol, price, qty, net, "Clearing long inventory");
                orders.push(Order::sell(symbol, price, qty));
            }
        }
    } else if net < 0 {
        let Some(price) = fair_value.floor().to_i64() else {
            return inventory;
        };
        if let Some(available) = book.ask_at(price) {
            let qty = inventory.commit_buy(available.min(net.saturating_abs()));
            if qty > 0 {
                trace!(product = %symbol, price, qty, net, "Clearing short inventory");
                orders.push(Order::buy(symbol, price, qty));
            }
        }
    }

    inventory
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SYM: &str = "RAINFOREST_RESIN";

    #[test]
    fn test_capacity() {
        let mut inv = TickInventory::new(10, 50);
        assert_eq!(inv.buy_capacity(), 40);
        assert_eq!(inv.sell_capacity(), 60);

        assert_eq!(inv.commit_buy(100), 40);
        assert_eq!(inv.buy_capacity(), 0);
        assert_eq!(inv.commit_buy(5), 0);

        assert_eq!(inv.commit_sell(25), 25);
        assert_eq!(inv.net_position(), 25);
        assert_eq!(inv.sell_capacity(), 35);
    }

    #[test]
    fn test_capacity_never_negative_beyond_limit() {
        let inv = TickInventory::new(60, 50);
        assert_eq!(inv.buy_capacity(), 0);
        assert_eq!(inv.sell_capacity(), 110);

        let inv = TickInventory::new(-60, 50);
        assert_eq!(inv.sell_capacity(), 0);

        let inv = TickInventory::new(i64::MIN, 50);
        assert_eq!(inv.buy_capacity(), i64::MAX);
        assert_eq!(inv.sell_capacity(), 0);
        assert_eq!(inv.net_position(), i64::MIN);
    }

    #[test]
    fn test_clear_long_sells_into_fair_bid() {
        let book = OrderDepth::from_levels([(100, 10)], [(103, -5)]);
        let mut orders = Vec::new();
        let inv = clear_position(&mut orders, &book, SYM, TickInventory::new(30, 50), dec!(100));

        assert_eq!(orders, vec![Order::sell(SYM, 100, 10)]);
        assert_eq!(inv.sold, 10);
        assert_eq!(inv.bought, 0);
    }

    #[test]
    fn test_clear_long_bounded_by_net_position() {
        let book = OrderDepth::from_levels([(100, 40)], []);
        let mut orders = Vec::new();
        let inv = clear_position(&mut orders, &book, SYM, TickInventory::new(7, 50), dec!(100));
        assert_eq!(orders, vec![Order::sell(SYM, 100, 7)]);
        assert_eq!(inv.net_position(), 0);
    }

    #[test]
    fn test_clear_short_buys_from_fair_ask() {
        let book = OrderDepth::from_levels([(98, 3)], [(100, -6)]);
        let mut orders = Vec::new();
        let start = TickInventory {
            bought: 2,
            ..TickInventory::new(-20, 50)
        };
        let inv = clear_position(&mut orders, &book, SYM, start, dec!(100));

        // net = -18, ask at 100 has 6
        assert_eq!(orders, vec![Order::buy(SYM, 100, 6)]);
        assert_eq!(inv.bought, 8);
    }

    #[test]
    fn test_clear_uses_ceil_for_long_and_floor_for_short() {
        let book = OrderDepth::from_levels([(100, 5), (101, 5)], [(100, -5), (101, -5)]);

        let mut orders = Vec::new();
        clear_position(&mut orders, &book, SYM, TickInventory::new(3, 50), dec!(100.4));
        assert_eq!(orders, vec![Order::sell(SYM, 101, 3)]);

        let mut orders = Vec::new();
        clear_position(&mut orders, &book, SYM, TickInventory::new(-3, 50), dec!(100.6));
        assert_eq!(orders, vec![Order::buy(SYM, 100, 3)]);
    }

    #[test]
    fn test_clear_no_level_at_fair() {
        let book = OrderDepth::from_levels([(99, 10)], [(101, -10)]);
        let mut orders = Vec::new();
        let inv = clear_position(&mut orders, &book, SYM, TickInventory::new(30, 50), dec!(100));
        assert!(orders.is_empty());
        assert_eq!(inv, TickInventory::new(30, 50));
    }

    #[test]
    fn test_clear_flat_does_nothing() {
        let book = OrderDepth::from_levels([(100, 10)], [(100, -10)]);
        let mut orders = Vec::new();
        clear_position(&mut orders, &book, SYM, TickInventory::new(0, 50), dec!(100));
        assert!(orders.is_empty());
    }

    #[test]
    fn test_clear_respects_exhausted_capacity() {
        // Starting beyond the short limit leaves no sell capacity, even when
        // this tick's buys make the net position long.
        let book = OrderDepth::from_levels([(100, 10)], []);
        let start = TickInventory {
            bought: 105,
            ..TickInventory::new(-60, 50)
        };
        assert_eq!(start.net_position(), 45);
        assert_eq!(start.sell_capacity(), 0);

        let mut orders = Vec::new();
        let inv = clear_position(&mut orders, &book, SYM, start, dec!(100));
        assert!(orders.is_empty());
        assert_eq!(inv, start);
    }
}
