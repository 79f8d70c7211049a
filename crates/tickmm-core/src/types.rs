//! Auxiliary snapshot data: listings, trades and exogenous observations.
//!
//! The decision engine does not consume these; they travel with the
//! snapshot so the telemetry record can reproduce the full tick.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::order::Symbol;

/// A tradable listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub symbol: Symbol,
    pub product: String,
    pub denomination: String,
}

/// A trade printed since the previous tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: Symbol,
    pub price: i64,
    pub quantity: i64,
    #[serde(default)]
    pub buyer: String,
    #[serde(default)]
    pub seller: String,
    #[serde(default)]
    pub timestamp: i64,
}

/// Conversion-venue quote and its cost components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionObservation {
    pub bid_price: f64,
    pub ask_price: f64,
    pub transport_fees: f64,
    pub export_tariff: f64,
    pub import_tariff: f64,
    pub sugar_price: f64,
    pub sunlight_index: f64,
}

/// Exogenous observations attached to a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(default)]
    pub plain_value_observations: BTreeMap<Symbol, i64>,
    #[serde(default)]
    pub conversion_observations: BTreeMap<Symbol, ConversionObservation>,
}
