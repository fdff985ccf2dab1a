//! Market-regime classification.
//!
//! Rules, first match wins:
//! 1. volatility regime High → HighVolatility
//! 2. Hurst > trending threshold and trend strength > minimum →
//!    TrendingUp if SMA short > SMA long, else TrendingDown
//! 3. Hurst < mean-reverting threshold → MeanReverting
//! 4. otherwise Sideways
//!
//! The classifier is total: undefined inputs never match a rule and fall
//! through to Sideways.

pub mod hurst;
pub mod trend;
pub mod volatility;

pub use hurst::hurst_exponent;
pub use trend::trend_strength;
pub use volatility::{classify_volatility, realized_volatility};

use serde::{Deserialize, Serialize};

use crate::config::RegimeParams;
use crate::domain::{MarketRegime, VolatilityRegime};

/// The subset of the snapshot the classifier reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeInputs {
    pub hurst: f64,
    pub trend_strength: f64,
    pub sma_short: f64,
    pub sma_long: f64,
    pub volatility_regime: VolatilityRegime,
}

pub fn classify_regime(inputs: &RegimeInputs, params: &RegimeParams) -> MarketRegime {
    if inputs.volatility_regime == VolatilityRegime::High {
        return MarketRegime::HighVolatility;
    }

    let trending =
        inputs.hurst > params.hurst_trending && inputs.trend_strength > params.trend_strength_min;
    if trending && inputs.sma_short.is_finite() && inputs.sma_long.is_finite() {
        return if inputs.sma_short > inputs.sma_long {
            MarketRegime::TrendingUp
        } else {
            MarketRegime::TrendingDown
        };
    }

    if inputs.hurst < params.hurst_mean_reverting {
        return MarketRegime::MeanReverting;
    }

    MarketRegime::Sideways
}
