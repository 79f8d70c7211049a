//! Core domain types for the tickmm decision engine.
//!
//! This crate provides the types shared by every tickmm crate:
//! - `Symbol`, `Order`, `OrderSide`: what the engine emits
//! - `OrderDepth`: one product's resting book for a tick, plus VWAP analytics
//! - `TradingState`: the full per-tick snapshot handed to the engine

pub mod book;
pub mod error;
pub mod order;
pub mod state;
pub mod types;

pub use book::{BookSide, OrderDepth};
pub use error::{CoreError, Result};
pub use order::{Order, OrderSide, Symbol};
pub use state::TradingState;
pub use types::{ConversionObservation, Listing, Observation, Trade};
