//! Capacity-constrained greedy taking of mispriced levels.
//!
//! Asks are walked cheapest first and bids highest first, so when capacity
//! runs out the most favourable levels are the ones filled.

use tickmm_core::{Order, OrderDepth};
use tracing::trace;

use crate::inventory::TickInventory;

/// Prices beyond which resting liquidity is considered mispriced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Asks priced strictly below this are bought.
    pub buy_below: i64,
    /// Bids priced strictly above this are sold into.
    pub sell_above: i64,
}

impl Thresholds {
    /// Take strictly through `fair_value` on both sides.
    pub fn at(fair_value: i64) -> Self {
        Self {
            buy_below: fair_value,
            sell_above: fair_value,
        }
    }

    /// Take only beyond `fair_value ± spread`.
    pub fn banded(fair_value: i64, buy_spread: i64, sell_spread: i64) -> Self {
        Self {
            buy_below: fair_value.saturating_sub(buy_spread),
            sell_above: fair_value.saturating_add(sell_spread),
        }
    }
}

/// Result of one taking pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TakeOutcome {
    pub orders: Vec<Order>,
    pub inventory: TickInventory,
    /// Lowest ask left resting above `buy_below`.
    pub ask_above: Option<i64>,
    /// Highest bid left resting below `sell_above`.
    pub bid_below: Option<i64>,
}

impl TakeOutcome {
    /// Total quantity taken on both sides.
    pub fn volume(&self) -> i64 {
        self.inventory.bought + self.inventory.sold
    }
}

/// Buy every ask below `buy_below` and sell into every bid above
/// `sell_above`, each clamped to the capacity left under the limit.
///
/// Levels priced exactly at a threshold are neither taken nor tracked.
pub fn take_mispriced(
    symbol: &str,
    book: &OrderDepth,
    mut inventory: TickInventory,
    thresholds: Thresholds,
) -> TakeOutcome {
    let mut orders = Vec::new();
    let mut ask_above: Option<i64> = None;
    let mut bid_below: Option<i64> = None;

    for (price, available) in book.asks_ascending() {
        if price < thresholds.buy_below {
            let qty = inventory.commit_buy(available);
            if qty > 0 {
                trace!(product = %symbol, price, qty, "Taking mispriced ask");
                orders.push(Order::buy(symbol, price, qty));
            }
        } else if price > thresholds.buy_below {
            ask_above = Some(ask_above.map_or(price, |a| a.min(price)));
        }
    }

    for (price, available) in book.bids_descending() {
        if price > thresholds.sell_above {
            let qty = inventory.commit_sell(available);
            if qty > 0 {
                trace!(product = %symbol, price, qty, "Taking mispriced bid");
                orders.push(Order::sell(symbol, price, qty));
            }
        } else if price < thresholds.sell_above {
            bid_below = Some(bid_below.map_or(price, |b| b.max(price)));
        }
    }

    TakeOutcome {
        orders,
        inventory,
        ask_above,
        bid_below,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYM: &str = "RAINFOREST_RESIN";

    #[test]
    fn test_takes_both_sides_through_fair() {
        let book = OrderDepth::from_levels([(10001, 4), (9990, 2)], [(9998, -5), (10005, -3)]);
        let out = take_mispriced(SYM, &book, TickInventory::new(0, 50), Thresholds::at(10000));

        assert_eq!(
            out.orders,
            vec![Order::buy(SYM, 9998, 5), Order::sell(SYM, 10001, 4)]
        );
        assert_eq!(out.inventory.bought, 5);
        assert_eq!(out.inventory.sold, 4);
        assert_eq!(out.ask_above, Some(10005));
        assert_eq!(out.bid_below, Some(9990));
        assert_eq!(out.volume(), 9);
    }

    #[test]
    fn test_cheapest_asks_filled_first_when_capacity_limited() {
        let book = OrderDepth::from_levels([], [(97, -8), (95, -8), (96, -8)]);
        let out = take_mispriced(SYM, &book, TickInventory::new(40, 50), Thresholds::at(100));

        // only 10 capacity: 8 @ 95 then 2 @ 96, nothing at 97
        assert_eq!(
            out.orders,
            vec![Order::buy(SYM, 95, 8), Order::buy(SYM, 96, 2)]
        );
        assert_eq!(out.inventory.buy_capacity(), 0);
    }

    #[test]
    fn test_highest_bids_filled_first_when_capacity_limited() {
        let book = OrderDepth::from_levels([(103, 5), (105, 5), (104, 5)], []);
        let out = take_mispriced(SYM, &book, TickInventory::new(-43, 50), Thresholds::at(100));

        assert_eq!(
            out.orders,
            vec![Order::sell(SYM, 105, 5), Order::sell(SYM, 104, 2)]
        );
    }

    #[test]
    fn test_no_capacity_emits_nothing() {
        let book = OrderDepth::from_levels([], [(90, -5)]);
        let out = take_mispriced(SYM, &book, TickInventory::new(50, 50), Thresholds::at(100));
        assert!(out.orders.is_empty());
        assert_eq!(out.inventory.bought, 0);
    }

    #[test]
    fn test_level_at_threshold_ignored() {
        let book = OrderDepth::from_levels([(100, 5)], [(100, -5)]);
        let out = take_mispriced(SYM, &book, TickInventory::new(0, 50), Thresholds::at(100));
        assert!(out.orders.is_empty());
        assert_eq!(out.ask_above, None);
        assert_eq!(out.bid_below, None);
    }

    #[test]
    fn test_banded_thresholds() {
        let band = Thresholds::banded(200, 15, 15);
        assert_eq!(band.buy_below, 185);
        assert_eq!(band.sell_above, 215);

        let book = OrderDepth::from_levels([(216, 2), (214, 9)], [(184, -3), (190, -7)]);
        let out = take_mispriced("SQUID_INK", &book, TickInventory::new(0, 50), band);
        assert_eq!(
            out.orders,
            vec![
                Order::buy("SQUID_INK", 184, 3),
                Order::sell("SQUID_INK", 216, 2)
            ]
        );
    }
}
