//! Replay loop.
//!
//! Input is JSON lines, one `TradingState` per line. Output is one compact
//! tick record per processed line. Diagnostics go through `tracing`, never
//! to the record stream.

use std::io::{BufRead, Write};

use crate::config::AppConfig;
use crate::error::AppResult;
use tickmm_core::TradingState;
use tickmm_strategy::{TickEngine, TickOutput};
use tickmm_telemetry::TickLogger;
use tracing::{debug, info, warn};

/// Totals for one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub ticks: u64,
    pub skipped_lines: u64,
    pub orders: u64,
    pub traded_volume: i64,
}

/// Main application.
pub struct Application {
    engine: TickEngine,
    logger: TickLogger,
}

impl Application {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let logger = TickLogger::new(config.telemetry.max_log_length);
        let engine = TickEngine::new(config.strategy)?;
        Ok(Self { engine, logger })
    }

    pub fn engine(&self) -> &TickEngine {
        &self.engine
    }

    /// Run one snapshot through the engine and return its tick record.
    pub fn process(&mut self, state: &TradingState) -> AppResult<(TickOutput, String)> {
        let output = self.engine.run(state);

        for (symbol, orders) in &output.orders {
            let fair = output
                .fair_values
                .get(symbol)
                .map_or_else(|| "-".to_string(), i64::to_string);
            self.logger.log(format!(
                "{symbol} pos={} fair={fair} orders={}",
                state.position(symbol),
                orders.len()
            ));
        }

        let record = self.logger.flush(
            state,
            &output.orders,
            output.conversions,
            &output.trader_data,
        )?;
        Ok((output, record))
    }

    /// Replay every snapshot in `input`, writing one record line per tick to
    /// `output`.
    pub fn replay<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> AppResult<ReplaySummary> {
        let mut summary = ReplaySummary::default();

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let state: TradingState = match serde_json::from_str(&line) {
                Ok(state) => state,
                Err(e) => {
                    warn!(line = line_no, error = %e, "Skipping unparseable snapshot");
                    summary.skipped_lines += 1;
                    continue;
                }
            };

            let (tick, record) = self.process(&state)?;
            writeln!(output, "{record}")?;

            summary.ticks += 1;
            summary.orders += tick.order_count() as u64;
            debug!(
                line = line_no,
                tick = self.engine.state().tick(),
                timestamp = state.timestamp,
                orders = tick.order_count(),
                "Tick processed"
            );
        }

        output.flush()?;
        summary.traded_volume = self.engine.state().traded_volume();

        info!(
            ticks = summary.ticks,
            skipped = summary.skipped_lines,
            orders = summary.orders,
            traded_volume = summary.traded_volume,
            "Replay complete"
        );
        Ok(summary)
    }
}
