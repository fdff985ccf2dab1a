//! RegimeLab Core: indicators, regime classification, strategy checklists,
//! confidence scoring and ATR sizing.
//!
//! This crate contains the per-ticker signal engine:
//! - Domain types (bars, series, regimes, signal types)
//! - Indicator library with NaN warm-up and a look-ahead guard
//! - Indicator snapshot and regime classifier (Hurst, trend strength, volatility)
//! - Momentum and mean-reversion checklists
//! - Confidence scorer and ATR position sizer
//! - `SignalEngine`, the synchronous pipeline tying them together

pub mod confidence;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod regime;
pub mod signal;
pub mod sizing;
pub mod snapshot;
pub mod stats;
pub mod strategy;

pub use confidence::{score_confidence, ConfidenceBonus, ConfidenceScore};
pub use config::{ConfigError, EngineConfig, IndicatorParams, RegimeParams, StrategyParams};
pub use domain::{
    Direction, MarketRegime, PriceBar, PriceSeries, SeriesError, SignalType, Ticker,
    VolatilityRegime,
};
pub use engine::{Analysis, SignalEngine};
pub use error::SignalError;
pub use signal::TradingSignal;
pub use sizing::{PositionSizer, PriceLevels};
pub use snapshot::IndicatorSnapshot;
pub use strategy::{StrategyKind, StrategyOutcome};
