//! Per-tick market making decisions for tickmm.
//!
//! Provides:
//! - Rolling mid-price estimation for fair value
//! - Capacity-constrained taking of mispriced levels
//! - Inventory clearing at the fair price
//! - Residual quoting around fair value
//!
//! # Architecture
//!
//! ```text
//! TradingState → TickEngine.run()
//!                 ├─ PolicyConfig lookup per product (unknown → no orders)
//!                 ├─ policy::plan(): fair value → take → clear → quote
//!                 │    └─ RollingMean (pure: history + sample → new history)
//!                 └─ EngineState: commit buffers, tick counter, traded volume
//!                      ↓
//!                 TickOutput (orders, conversions, trader data)
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod inventory;
pub mod policy;
pub mod taking;

pub use config::{PolicyConfig, StrategyConfig};
pub use engine::{EngineState, TickEngine, TickOutput};
pub use error::{StrategyError, StrategyResult};
pub use estimator::RollingMean;
pub use inventory::{clear_position, TickInventory};
pub use policy::{plan, PolicyContext, PolicyPlan};
pub use taking::{take_mispriced, TakeOutcome, Thresholds};
