//! Strategy error types.

use thiserror::Error;
use tickmm_core::{CoreError, Symbol};

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The fair value does not fit an integer price.
    #[error("No fair value estimate for {0}")]
    NoEstimate(Symbol),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type StrategyResult<T> = Result<T, StrategyError>;
