//! Error types for tickmm-core.

use thiserror::Error;

use crate::book::BookSide;

/// Core error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Empty book side: no resting {side} quantity")]
    EmptyBookSide { side: BookSide },

    #[error("Arithmetic overflow computing the {side} side")]
    Overflow { side: BookSide },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
