//! Engine configuration.
//!
//! One explicit value object, passed to `SignalEngine::new` and validated
//! there. Every field has a default, so partial TOML/JSON documents
//! deserialize into a complete config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Signals are never produced from fewer bars than this, whatever the windows.
pub const MIN_HISTORY: usize = 50;

/// Invalid configuration. Fatal: raised at construction, never per ticker.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("min_confidence must be within [0, 1], got {value}")]
    MinConfidenceOutOfRange { value: f64 },

    #[error("volatility_factor must be finite and > 0, got {value}")]
    InvalidVolatilityFactor { value: f64 },

    #[error("{name} must be >= {min}, got {value}")]
    WindowTooShort {
        name: &'static str,
        value: usize,
        min: usize,
    },

    #[error("{short_name} ({short}) must be shorter than {long_name} ({long})")]
    WindowOrder {
        short_name: &'static str,
        short: usize,
        long_name: &'static str,
        long: usize,
    },

    #[error("{name} must be finite and > 0, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error(
        "hurst thresholds must satisfy 0 <= mean_reverting ({mean_reverting}) <= trending ({trending}) <= 1"
    )]
    HurstThresholds { trending: f64, mean_reverting: f64 },

    #[error("trend_strength_min must be within [0, 1], got {value}")]
    TrendStrengthOutOfRange { value: f64 },

    #[error("volatility ratios must satisfy 0 < low ({low}) < high ({high})")]
    VolatilityRatios { high: f64, low: f64 },
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Inclusive confidence gate for materializing a signal.
    pub min_confidence: f64,
    /// ATR multiple for the stop distance; the target sits at twice that.
    pub volatility_factor: f64,
    pub indicators: IndicatorParams,
    pub regime: RegimeParams,
    pub strategy: StrategyParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.6,
            volatility_factor: 2.0,
            indicators: IndicatorParams::default(),
            regime: RegimeParams::default(),
            strategy: StrategyParams::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    pub fn with_volatility_factor(mut self, volatility_factor: f64) -> Self {
        self.volatility_factor = volatility_factor;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::MinConfidenceOutOfRange {
                value: self.min_confidence,
            });
        }
        if !self.volatility_factor.is_finite() || self.volatility_factor <= 0.0 {
            return Err(ConfigError::InvalidVolatilityFactor {
                value: self.volatility_factor,
            });
        }
        self.indicators.validate()?;
        self.regime.validate()?;
        self.strategy.validate()
    }

    /// Bars needed before every snapshot field is out of warm-up.
    pub fn required_history(&self) -> usize {
        let p = &self.indicators;
        [
            MIN_HISTORY,
            p.sma_long,
            p.macd_slow + p.macd_signal - 1,
            2 * p.adx_period,
            p.rsi_period + 1,
            p.bollinger_period,
            p.stochastic_k + p.stochastic_d - 1,
            p.williams_period,
            p.atr_period + 1,
            p.volume_sma_period,
            p.volatility_long + 1,
            p.trend_window,
        ]
        .into_iter()
        .max()
        .unwrap_or(MIN_HISTORY)
    }
}

/// Indicator windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_std: f64,
    pub atr_period: usize,
    pub adx_period: usize,
    pub stochastic_k: usize,
    pub stochastic_d: usize,
    pub williams_period: usize,
    pub sma_short: usize,
    pub sma_long: usize,
    pub volume_sma_period: usize,
    pub keltner_multiplier: f64,
    pub hurst_window: usize,
    pub hurst_max_lag: usize,
    pub trend_window: usize,
    pub volatility_short: usize,
    pub volatility_long: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std: 2.0,
            atr_period: 14,
            adx_period: 14,
            stochastic_k: 14,
            stochastic_d: 3,
            williams_period: 14,
            sma_short: 20,
            sma_long: 50,
            volume_sma_period: 20,
            keltner_multiplier: 1.5,
            hurst_window: 100,
            hurst_max_lag: 20,
            trend_window: 20,
            volatility_short: 10,
            volatility_long: 30,
        }
    }
}

impl IndicatorParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let minimums: [(&'static str, usize, usize); 18] = [
            ("rsi_period", self.rsi_period, 1),
            ("macd_fast", self.macd_fast, 1),
            ("macd_slow", self.macd_slow, 2),
            ("macd_signal", self.macd_signal, 1),
            ("bollinger_period", self.bollinger_period, 2),
            ("atr_period", self.atr_period, 1),
            ("adx_period", self.adx_period, 1),
            ("stochastic_k", self.stochastic_k, 1),
            ("stochastic_d", self.stochastic_d, 1),
            ("williams_period", self.williams_period, 1),
            ("sma_short", self.sma_short, 1),
            ("sma_long", self.sma_long, 2),
            ("volume_sma_period", self.volume_sma_period, 1),
            // Two usable lags need lags 2 and 3.
            ("hurst_max_lag", self.hurst_max_lag, 4),
            ("hurst_window", self.hurst_window, 2 * self.hurst_max_lag),
            ("trend_window", self.trend_window, 2),
            ("volatility_short", self.volatility_short, 2),
            ("volatility_long", self.volatility_long, 3),
        ];
        for (name, value, min) in minimums {
            if value < min {
                return Err(ConfigError::WindowTooShort { name, value, min });
            }
        }

        let ordered = [
            ("macd_fast", self.macd_fast, "macd_slow", self.macd_slow),
            ("sma_short", self.sma_short, "sma_long", self.sma_long),
            (
                "volatility_short",
                self.volatility_short,
                "volatility_long",
                self.volatility_long,
            ),
        ];
        for (short_name, short, long_name, long) in ordered {
            if short >= long {
                return Err(ConfigError::WindowOrder {
                    short_name,
                    short,
                    long_name,
                    long,
                });
            }
        }

        for (name, value) in [
            ("bollinger_std", self.bollinger_std),
            ("keltner_multiplier", self.keltner_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        Ok(())
    }
}

/// Regime classification thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegimeParams {
    /// Hurst above this (with a strong trend fit) reads as trending.
    pub hurst_trending: f64,
    /// Hurst below this reads as mean reverting.
    pub hurst_mean_reverting: f64,
    pub trend_strength_min: f64,
    /// Short/long volatility ratio above which the regime is high volatility.
    pub high_volatility_ratio: f64,
    pub low_volatility_ratio: f64,
}

impl Default for RegimeParams {
    fn default() -> Self {
        Self {
            hurst_trending: 0.55,
            hurst_mean_reverting: 0.45,
            trend_strength_min: 0.7,
            high_volatility_ratio: 1.2,
            low_volatility_ratio: 0.8,
        }
    }
}

impl RegimeParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (trending, mean_reverting) = (self.hurst_trending, self.hurst_mean_reverting);
        if !(0.0..=1.0).contains(&trending)
            || !(0.0..=1.0).contains(&mean_reverting)
            || mean_reverting > trending
        {
            return Err(ConfigError::HurstThresholds {
                trending,
                mean_reverting,
            });
        }
        if !(0.0..=1.0).contains(&self.trend_strength_min) {
            return Err(ConfigError::TrendStrengthOutOfRange {
                value: self.trend_strength_min,
            });
        }
        let (high, low) = (self.high_volatility_ratio, self.low_volatility_ratio);
        if !high.is_finite() || low.is_nan() || low <= 0.0 || low >= high {
            return Err(ConfigError::VolatilityRatios { high, low });
        }
        Ok(())
    }
}

/// Composite-score thresholds used by the checklists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyParams {
    pub momentum_threshold: f64,
    pub mean_reversion_threshold: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            momentum_threshold: 30.0,
            mean_reversion_threshold: 40.0,
        }
    }
}

impl StrategyParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("momentum_threshold", self.momentum_threshold),
            ("mean_reversion_threshold", self.mean_reversion_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}
