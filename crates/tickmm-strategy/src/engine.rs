//! Tick orchestration.
//!
//! `TickEngine` owns the only cross-tick state (`EngineState`): the rolling
//! mid-price history per product, the tick counter and a traded-volume
//! counter kept for diagnostics. Each product is planned independently; a
//! failure for one product empties its order list and leaves the others
//! untouched.

use std::collections::BTreeMap;

use tickmm_core::{Order, Symbol, TradingState};
use tracing::{debug, trace};

use crate::config::StrategyConfig;
use crate::error::StrategyResult;
use crate::estimator::RollingMean;
use crate::policy::{plan, PolicyContext, PolicyPlan};

/// Engine state carried from one tick to the next.
#[derive(Debug, Default)]
pub struct EngineState {
    tick: u64,
    histories: BTreeMap<Symbol, RollingMean>,
    traded_volume: i64,
}

impl EngineState {
    /// Number of completed ticks.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Cumulative quantity taken against resting liquidity.
    pub fn traded_volume(&self) -> i64 {
        self.traded_volume
    }

    /// Rolling mid-price history for `symbol`, if its policy keeps one.
    pub fn history(&self, symbol: &str) -> Option<&RollingMean> {
        self.histories.get(symbol)
    }

    fn commit(&mut self, symbol: &str, plan: &mut PolicyPlan) {
        if let Some(history) = plan.history.take() {
            self.histories.insert(symbol.to_string(), history);
        }
        self.traded_volume += plan.taken_volume;
    }
}

/// Everything returned for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutput {
    /// Orders per product. Every product in the snapshot has an entry.
    pub orders: BTreeMap<Symbol, Vec<Order>>,
    pub conversions: i32,
    /// Opaque token handed back to the caller for the next tick.
    pub trader_data: String,
    /// Fair value used for each product that was planned this tick.
    pub fair_values: BTreeMap<Symbol, i64>,
}

impl TickOutput {
    pub fn order_count(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }
}

/// Per-tick decision engine.
#[derive(Debug)]
pub struct TickEngine {
    config: StrategyConfig,
    state: EngineState,
}

impl TickEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: StrategyConfig) -> StrategyResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: EngineState::default(),
        })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Decide orders for every product in `snapshot` and advance the tick.
    pub fn run(&mut self, snapshot: &TradingState) -> TickOutput {
        let mut orders = BTreeMap::new();
        let mut fair_values = BTreeMap::new();

        for (symbol, book) in &snapshot.order_depths {
            let Some(policy) = self.config.policy(symbol) else {
                trace!(product = %symbol, "No policy configured, passing through");
                orders.insert(symbol.clone(), Vec::new());
                continue;
            };

            let ctx = PolicyContext {
                symbol,
                book,
                position: snapshot.position(symbol),
                limit: self.config.position_limit,
            };

            match plan(policy, &ctx, self.state.history(symbol)) {
                Ok(mut planned) => {
                    debug!(
                        product = %symbol,
                        position = ctx.position,
                        fair_value = planned.fair_value,
                        orders = planned.orders.len(),
                        taken = planned.taken_volume,
                        "Planned orders"
                    );
                    for order in &planned.orders {
                        trace!(product = %symbol, %order, "Order");
                    }
                    self.state.commit(symbol, &mut planned);
                    fair_values.insert(symbol.clone(), planned.fair_value);
                    orders.insert(symbol.clone(), planned.orders);
                }
                Err(e) => {
                    debug!(product = %symbol, error = %e, "Skipping product for this tick");
                    orders.insert(symbol.clone(), Vec::new());
                }
            }
        }

        self.state.tick += 1;

        TickOutput {
            orders,
            conversions: self.config.conversions,
            trader_data: self.config.trader_data.clone(),
            fair_values,
        }
    }
}
