//! Strategy configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tickmm_core::Symbol;

use crate::error::{StrategyError, StrategyResult};

/// Fair value rule and taking band for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PolicyConfig {
    /// Constant fair value; take strictly through it, clear, then quote.
    Fixed {
        #[serde(default = "default_fixed_fair_value")]
        fair_value: i64,
    },
    /// Rounded mean of the last `window` mid-prices; same take/clear/quote
    /// cycle as `Fixed`.
    RollingMean {
        #[serde(default = "default_rolling_window")]
        window: usize,
    },
    /// Rounded mean of the last `window` mid-prices minus `shift`. Only takes
    /// liquidity priced beyond the band `[fair - buy_spread, fair + sell_spread]`.
    /// No clearing and no residual quotes.
    ShiftedRollingMean {
        #[serde(default = "default_shifted_window")]
        window: usize,
        #[serde(default = "default_shift")]
        shift: i64,
        #[serde(default = "default_spread")]
        buy_spread: i64,
        #[serde(default = "default_spread")]
        sell_spread: i64,
    },
}

impl PolicyConfig {
    /// Rolling buffer capacity, for policies that keep one.
    pub fn window(&self) -> Option<usize> {
        match self {
            Self::Fixed { .. } => None,
            Self::RollingMean { window } | Self::ShiftedRollingMean { window, .. } => Some(*window),
        }
    }

    fn validate(&self, symbol: &str) -> StrategyResult<()> {
        if self.window() == Some(0) {
            return Err(StrategyError::InvalidConfig(format!(
                "{symbol}: window must be at least 1"
            )));
        }
        if let Self::ShiftedRollingMean {
            buy_spread,
            sell_spread,
            ..
        } = self
        {
            if *buy_spread < 0 || *sell_spread < 0 {
                return Err(StrategyError::InvalidConfig(format!(
                    "{symbol}: spreads must be non-negative"
                )));
            }
        }
        Ok(())
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Maximum absolute inventory per product.
    #[serde(default = "default_position_limit")]
    pub position_limit: i64,

    /// Conversions value returned with every tick.
    #[serde(default = "default_conversions")]
    pub conversions: i32,

    /// Opaque state token returned with every tick.
    #[serde(default = "default_trader_data")]
    pub trader_data: String,

    /// Policy per product. Products not listed here receive no orders.
    #[serde(default = "default_products")]
    pub products: BTreeMap<Symbol, PolicyConfig>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            position_limit: default_position_limit(),
            conversions: default_conversions(),
            trader_data: default_trader_data(),
            products: default_products(),
        }
    }
}

impl StrategyConfig {
    pub fn validate(&self) -> StrategyResult<()> {
        if self.position_limit < 0 {
            return Err(StrategyError::InvalidConfig(format!(
                "position_limit must be non-negative, got {}",
                self.position_limit
            )));
        }
        for (symbol, policy) in &self.products {
            policy.validate(symbol)?;
        }
        Ok(())
    }

    pub fn policy(&self, symbol: &str) -> Option<&PolicyConfig> {
        self.products.get(symbol)
    }
}

pub const RAINFOREST_RESIN: &str = "RAINFOREST_RESIN";
pub const KELP: &str = "KELP";
pub const SQUID_INK: &str = "SQUID_INK";

fn default_position_limit() -> i64 {
    50
}
fn default_conversions() -> i32 {
    1
}
fn default_trader_data() -> String {
    "SAMPLE".to_string()
}
fn default_fixed_fair_value() -> i64 {
    10_000
}
fn default_rolling_window() -> usize {
    5
}
fn default_shifted_window() -> usize {
    100
}
fn default_shift() -> i64 {
    5 // assumes downward drift
}
fn default_spread() -> i64 {
    15
}
fn default_products() -> BTreeMap<Symbol, PolicyConfig> {
    BTreeMap::from([
        (
            RAINFOREST_RESIN.to_string(),
            PolicyConfig::Fixed {
                fair_value: default_fixed_fair_value(),
            },
        ),
        (
            KELP.to_string(),
            PolicyConfig::RollingMean {
                window: default_rolling_window(),
            },
        ),
        (
            SQUID_INK.to_string(),
            PolicyConfig::ShiftedRollingMean {
                window: default_shifted_window(),
                shift: default_shift(),
                buy_spread: default_spread(),
                sell_spread: default_spread(),
            },
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StrategyConfig::default();
        assert_eq!(config.position_limit, 50);
        assert_eq!(config.conversions, 1);
        assert_eq!(config.trader_data, "SAMPLE");
        assert_eq!(
            config.policy(RAINFOREST_RESIN),
            Some(&PolicyConfig::Fixed { fair_value: 10_000 })
        );
        assert_eq!(
            config.policy(KELP),
            Some(&PolicyConfig::RollingMean { window: 5 })
        );
        assert_eq!(
            config.policy(SQUID_INK),
            Some(&PolicyConfig::ShiftedRollingMean {
                window: 100,
                shift: 5,
                buy_spread: 15,
                sell_spread: 15,
            })
        );
        assert!(config.policy("UNKNOWN").is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde_defaults() {
        let toml_str = r#"
position_limit = 20
"#;
        let config: StrategyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.position_limit, 20);
        assert_eq!(config.trader_data, "SAMPLE");
        assert_eq!(config.products.len(), 3);
    }

    #[test]
    fn test_config_products_table() {
        let toml_str = r#"
[products.KELP]
policy = "rolling_mean"
window = 8

[products.SQUID_INK]
policy = "shifted_rolling_mean"
shift = 0
"#;
        let config: StrategyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.products.len(), 2);
        assert_eq!(
            config.policy(KELP),
            Some(&PolicyConfig::RollingMean { window: 8 })
        );
        assert_eq!(
            config.policy(SQUID_INK),
            Some(&PolicyConfig::ShiftedRollingMean {
                window: 100,
                shift: 0,
                buy_spread: 15,
                sell_spread: 15,
            })
        );
        assert!(config.policy(RAINFOREST_RESIN).is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let negative_limit = StrategyConfig {
            position_limit: -1,
            ..Default::default()
        };
        assert!(matches!(
            negative_limit.validate(),
            Err(StrategyError::InvalidConfig(_))
        ));

        let mut zero_window = StrategyConfig::default();
        zero_window
            .products
            .insert(KELP.to_string(), PolicyConfig::RollingMean { window: 0 });
        assert!(zero_window.validate().is_err());

        let mut negative_spread = StrategyConfig::default();
        negative_spread.products.insert(
            SQUID_INK.to_string(),
            PolicyConfig::ShiftedRollingMean {
                window: 10,
                shift: 5,
                buy_spread: -1,
                sell_spread: 15,
            },
        );
        assert!(negative_spread.validate().is_err());
    }
}
