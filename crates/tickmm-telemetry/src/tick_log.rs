//! Compact per-tick log record.
//!
//! One JSON array per tick:
//! `[state, orders, conversions, trader_data, logs]`. The three free-text
//! fields (incoming trader data, outgoing trader data, accumulated log lines)
//! share whatever is left of the record budget after everything else is
//! serialized, split evenly. Shares are counted in serialized characters, so
//! an escaped newline costs two.

use std::collections::BTreeMap;

use serde_json::{json, Value};
use tickmm_core::{Listing, Observation, Order, OrderDepth, Symbol, Trade, TradingState};

use crate::error::TelemetryResult;

/// Default total record size, in characters.
pub const DEFAULT_MAX_LOG_LENGTH: usize = 3750;

const TRUNCATED_FIELDS: usize = 3;

/// Accumulates free-text lines during a tick and emits the tick record.
#[derive(Debug, Clone)]
pub struct TickLogger {
    logs: String,
    max_log_length: usize,
}

impl Default for TickLogger {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOG_LENGTH)
    }
}

impl TickLogger {
    pub fn new(max_log_length: usize) -> Self {
        Self {
            logs: String::new(),
            max_log_length,
        }
    }

    /// Append one line to this tick's free-text log.
    pub fn log(&mut self, line: impl AsRef<str>) {
        self.logs.push_str(line.as_ref());
        self.logs.push('\n');
    }

    /// Build the size-bounded record for this tick and reset the log buffer.
    pub fn flush(
        &mut self,
        state: &TradingState,
        orders: &BTreeMap<Symbol, Vec<Order>>,
        conversions: i32,
        trader_data: &str,
    ) -> TelemetryResult<String> {
        let compressed_orders = compress_orders(orders);

        let empty_state = compress_state(state, "")?;
        let base = serde_json::to_string(&json!([
            empty_state,
            compressed_orders.clone(),
            conversions,
            "",
            "",
        ]))?;
        let base_length = base.chars().count();
        let max_item_length =
            self.max_log_length.saturating_sub(base_length) / TRUNCATED_FIELDS;

        let compressed_state =
            compress_state(state, &truncate(&state.trader_data, max_item_length))?;
        let record = serde_json::to_string(&json!([
            compressed_state,
            compressed_orders,
            conversions,
            truncate(trader_data, max_item_length),
            truncate(&self.logs, max_item_length),
        ]))?;

        self.logs.clear();
        Ok(record)
    }
}

fn compress_state(state: &TradingState, trader_data: &str) -> TelemetryResult<Value> {
    Ok(json!([
        state.timestamp,
        trader_data,
        compress_listings(&state.listings),
        compress_order_depths(&state.order_depths)?,
        compress_trades(&state.own_trades),
        compress_trades(&state.market_trades),
        serde_json::to_value(&state.position)?,
        compress_observations(&state.observations)?,
    ]))
}

fn compress_listings(listings: &BTreeMap<Symbol, Listing>) -> Value {
    listings
        .values()
        .map(|l| json!([l.symbol, l.product, l.denomination]))
        .collect()
}

fn compress_order_depths(depths: &BTreeMap<Symbol, OrderDepth>) -> TelemetryResult<Value> {
    let mut out = serde_json::Map::new();
    for (symbol, depth) in depths {
        out.insert(
            symbol.clone(),
            json!([
                serde_json::to_value(&depth.buy_orders)?,
                serde_json::to_value(&depth.sell_orders)?,
            ]),
        );
    }
    Ok(Value::Object(out))
}

fn compress_trades(trades: &BTreeMap<Symbol, Vec<Trade>>) -> Value {
    trades
        .values()
        .flatten()
        .map(|t| json!([t.symbol, t.price, t.quantity, t.buyer, t.seller, t.timestamp]))
        .collect()
}

fn compress_observations(observations: &Observation) -> TelemetryResult<Value> {
    let conversions: serde_json::Map<String, Value> = observations
        .conversion_observations
        .iter()
        .map(|(product, o)| {
            (
                product.clone(),
                json!([
                    o.bid_price,
                    o.ask_price,
                    o.transport_fees,
                    o.export_tariff,
                    o.import_tariff,
                    o.sugar_price,
                    o.sunlight_index,
                ]),
            )
        })
        .collect();

    Ok(json!([
        serde_json::to_value(&observations.plain_value_observations)?,
        Value::Object(conversions),
    ]))
}

fn compress_orders(orders: &BTreeMap<Symbol, Vec<Order>>) -> Value {
    orders
        .values()
        .flatten()
        .map(|o| json!([o.symbol, o.price, o.quantity]))
        .collect()
}

/// Width of `c` once escaped inside a JSON string.
fn escaped_width(c: char) -> usize {
    match c {
        '"' | '\\' | '\n' | '\r' | '\t' | '\u{8}' | '\u{c}' => 2,
        c if c < '\u{20}' => 6,
        _ => 1,
    }
}

/// Longest prefix of `value` whose escaped form fits in `budget` characters.
fn escaped_prefix(value: &str, budget: usize) -> String {
    let mut used = 0;
    value
        .chars()
        .take_while(|&c| {
            used += escaped_width(c);
            used <= budget
        })
        .collect()
}

/// Cut `value` so that its escaped form is at most `max_length` characters,
/// marking the cut with `...` when there is room for it.
fn truncate(value: &str, max_length: usize) -> String {
    if value.chars().map(escaped_width).sum::<usize>() <= max_length {
        return value.to_string();
    }
    if max_length < 3 {
        return escaped_prefix(value, max_length);
    }
    let mut out = escaped_prefix(value, max_length - 3);
    out.push_str("...");
    out
}
