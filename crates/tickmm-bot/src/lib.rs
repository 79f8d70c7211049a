//! tickmm replay driver.
//!
//! Feeds recorded `TradingState` snapshots through the tick engine one line
//! at a time and prints the compact per-tick record for each.

pub mod app;
pub mod config;
pub mod error;

pub use app::{Application, ReplaySummary};
pub use config::{AppConfig, TelemetryConfig};
pub use error::{AppError, AppResult};
