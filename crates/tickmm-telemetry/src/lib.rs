//! Structured logging and per-tick log records for tickmm.
//!
//! Provides:
//! - Structured logging with tracing (JSON in production, pretty otherwise)
//! - `TickLogger`: one compact, size-bounded JSON record per tick

pub mod error;
pub mod logging;
pub mod tick_log;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use tick_log::{TickLogger, DEFAULT_MAX_LOG_LENGTH};
