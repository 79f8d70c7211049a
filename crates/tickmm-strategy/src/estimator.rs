//! Rolling mid-price estimator.
//!
//! Keeps the last `capacity` mid-prices for one product, oldest first, and
//! derives a fair value as the rounded mean of the window.

use std::collections::VecDeque;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Fixed-capacity FIFO window of recent mid-prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingMean {
    capacity: usize,
    samples: VecDeque<Decimal>,
}

impl RollingMean {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a sample, evicting the oldest entries beyond capacity.
    pub fn push(&mut self, sample: Decimal) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Copy of this window with `sample` pushed. `self` is left untouched.
    pub fn pushed(&self, sample: Decimal) -> Self {
        let mut next = self.clone();
        next.push(sample);
        next
    }

    pub fn mean(&self) -> Option<Decimal> {
        if self.samples.is_empty() {
            return None;
        }
        let total: Decimal = self.iter().sum();
        Some(total / Decimal::from(self.samples.len() as u64))
    }

    /// Mean rounded to an integer price, ties to even.
    pub fn rounded_mean(&self) -> Option<i64> {
        self.mean()?.round().to_i64()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decimal> {
        self.samples.iter()
    }
}
