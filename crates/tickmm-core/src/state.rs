//! Per-tick snapshot handed to the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::book::OrderDepth;
use crate::order::Symbol;
use crate::types::{Listing, Observation, Trade};

/// Everything the caller knows about the market at one tick.
///
/// Read-only to the engine. Products are keyed in `BTreeMap`s so iteration
/// over them is ordered by symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradingState {
    #[serde(default)]
    pub timestamp: i64,
    /// Opaque token returned by the engine on the previous tick.
    #[serde(default, alias = "traderData")]
    pub trader_data: String,
    #[serde(default)]
    pub listings: BTreeMap<Symbol, Listing>,
    #[serde(default)]
    pub order_depths: BTreeMap<Symbol, OrderDepth>,
    #[serde(default)]
    pub own_trades: BTreeMap<Symbol, Vec<Trade>>,
    #[serde(default)]
    pub market_trades: BTreeMap<Symbol, Vec<Trade>>,
    /// Signed inventory per product. Missing entries mean flat.
    #[serde(default)]
    pub position: BTreeMap<Symbol, i64>,
    #[serde(default)]
    pub observations: Observation,
}

impl TradingState {
    /// Inventory held in `symbol`, zero when absent.
    pub fn position(&self, symbol: &str) -> i64 {
        self.position.get(symbol).copied().unwrap_or(0)
    }

    pub fn with_book(mut self, symbol: impl Into<Symbol>, book: OrderDepth) -> Self {
        self.order_depths.insert(symbol.into(), book);
        self
    }

    pub fn with_position(mut self, symbol: impl Into<Symbol>, position: i64) -> Self {
        self.position.insert(symbol.into(), position);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_position_is_flat() {
        let state = TradingState::default().with_position("KELP", -12);
        assert_eq!(state.position("KELP"), -12);
        assert_eq!(state.position("SQUID_INK"), 0);
    }

    #[test]
    fn test_deserialize_minimal_snapshot() {
        let json = r#"{
            "timestamp": 1300,
            "traderData": "SAMPLE",
            "order_depths": {
                "KELP": {"buy_orders": {"2028": 26}, "sell_orders": {"2032": -26}}
            },
            "position": {"KELP": 3}
        }"#;
        let state: TradingState = serde_json::from_str(json).unwrap();
        assert_eq!(state.timestamp, 1300);
        assert_eq!(state.trader_data, "SAMPLE");
        assert_eq!(state.position("KELP"), 3);
        assert_eq!(state.order_depths["KELP"].bid_at(2028), Some(26));
        assert!(state.listings.is_empty());
        assert!(state.observations.conversion_observations.is_empty());
    }

    #[test]
    fn test_deserialize_observations() {
        let json = r#"{
            "observations": {
                "plainValueObservations": {"DJEMBES": 5},
                "conversionObservations": {
                    "MAGNIFICENT_MACARONS": {
                        "bidPrice": 640.5, "askPrice": 642.0, "transportFees": 1.5,
                        "exportTariff": 9.0, "importTariff": -3.0,
                        "sugarPrice": 200.1, "sunlightIndex": 60.0
                    }
                }
            }
        }"#;
        let state: TradingState = serde_json::from_str(json).unwrap();
        let obs = &state.observations.conversion_observations["MAGNIFICENT_MACARONS"];
        assert_eq!(obs.ask_price, 642.0);
        assert_eq!(state.observations.plain_value_observations["DJEMBES"], 5);
    }
}
