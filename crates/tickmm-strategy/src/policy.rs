//! Product policies.
//!
//! A policy turns one product's book and position into an order list. It is
//! a pure function: the rolling history is passed in and the updated history
//! is handed back in the plan for the engine to commit.

use rust_decimal::Decimal;
use tickmm_core::{Order, OrderDepth};

use crate::config::PolicyConfig;
use crate::error::{StrategyError, StrategyResult};
use crate::estimator::RollingMean;
use crate::inventory::{clear_position, TickInventory};
use crate::taking::{take_mispriced, TakeOutcome, Thresholds};

/// Inputs for one product at one tick.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub symbol: &'a str,
    pub book: &'a OrderDepth,
    pub position: i64,
    pub limit: i64,
}

/// What a policy decided for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyPlan {
    pub orders: Vec<Order>,
    pub fair_value: i64,
    /// Quantity taken against resting liquidity (taking and clearing).
    pub taken_volume: i64,
    /// Rolling history including this tick's sample, for policies that keep one.
    pub history: Option<RollingMean>,
}

/// Run `policy` for one product.
///
/// Fails with `EmptyBookSide` when a rolling policy cannot compute a
/// mid-price; in that case nothing has been decided and `history` is
/// unchanged.
pub fn plan(
    policy: &PolicyConfig,
    ctx: &PolicyContext<'_>,
    history: Option<&RollingMean>,
) -> StrategyResult<PolicyPlan> {
    match policy {
        PolicyConfig::Fixed { fair_value } => Ok(make_market(ctx, *fair_value, None)),
        PolicyConfig::RollingMean { window } => {
            let history = observe(ctx, history, *window)?;
            let fair_value = estimate(ctx, &history)?;
            Ok(make_market(ctx, fair_value, Some(history)))
        }
        PolicyConfig::ShiftedRollingMean {
            window,
            shift,
            buy_spread,
            sell_spread,
        } => {
            let history = observe(ctx, history, *window)?;
            let fair_value = estimate(ctx, &history)?
                .checked_sub(*shift)
                .ok_or_else(|| StrategyError::NoEstimate(ctx.symbol.to_string()))?;
            let outcome = take_mispriced(
                ctx.symbol,
                ctx.book,
                TickInventory::new(ctx.position, ctx.limit),
                Thresholds::banded(fair_value, *buy_spread, *sell_spread),
            );
            Ok(PolicyPlan {
                taken_volume: outcome.volume(),
                orders: outcome.orders,
                fair_value,
                history: Some(history),
            })
        }
    }
}

/// History with this tick's mid-price appended.
fn observe(
    ctx: &PolicyContext<'_>,
    history: Option<&RollingMean>,
    window: usize,
) -> StrategyResult<RollingMean> {
    let mid = ctx.book.midprice()?;
    Ok(match history {
        Some(history) => history.pushed(mid),
        None => RollingMean::new(window).pushed(mid),
    })
}

fn estimate(ctx: &PolicyContext<'_>, history: &RollingMean) -> StrategyResult<i64> {
    history
        .rounded_mean()
        .ok_or_else(|| StrategyError::NoEstimate(ctx.symbol.to_string()))
}

/// Take through fair value, clear leftover inventory at fair, then quote the
/// remaining capacity one tick inside the best untaken levels.
fn make_market(
    ctx: &PolicyContext<'_>,
    fair_value: i64,
    history: Option<RollingMean>,
) -> PolicyPlan {
    let TakeOutcome {
        mut orders,
        inventory,
        ask_above,
        bid_below,
    } = take_mispriced(
        ctx.symbol,
        ctx.book,
        TickInventory::new(ctx.position, ctx.limit),
        Thresholds::at(fair_value),
    );

    let inventory = clear_position(
        &mut orders,
        ctx.book,
        ctx.symbol,
        inventory,
        Decimal::from(fair_value),
    );
    let taken_volume = inventory.bought + inventory.sold;

    quote_residual(
        &mut orders,
        ctx.symbol,
        &inventory,
        fair_value,
        bid_below,
        ask_above,
    );

    PolicyPlan {
        orders,
        fair_value,
        taken_volume,
        history,
    }
}

/// Quote all remaining capacity. Without an untaken level on a side the
/// quote sits at the fair value.
fn quote_residual(
    orders: &mut Vec<Order>,
    symbol: &str,
    inventory: &TickInventory,
    fair_value: i64,
    bid_below: Option<i64>,
    ask_above: Option<i64>,
) {
    let buy_qty = inventory.buy_capacity();
    if buy_qty > 0 {
        let price = bid_below.map_or(fair_value, |bid| bid.saturating_add(1));
        orders.push(Order::buy(symbol, price, buy_qty));
    }

    let sell_qty = inventory.sell_capacity();
    if sell_qty > 0 {
        let price = ask_above.map_or(fair_value, |ask| ask.saturating_sub(1));
        orders.push(Order::sell(symbol, price, sell_qty));
    }
}
