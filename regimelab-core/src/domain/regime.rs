//! Market and volatility regime labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavioral state of a ticker at evaluation time.
///
/// Exactly one value is assigned per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketRegime {
    TrendingUp,
    TrendingDown,
    MeanReverting,
    Sideways,
    HighVolatility,
}

impl MarketRegime {
    pub const ALL: [MarketRegime; 5] = [
        MarketRegime::TrendingUp,
        MarketRegime::TrendingDown,
        MarketRegime::MeanReverting,
        MarketRegime::Sideways,
        MarketRegime::HighVolatility,
    ];

    /// True for the two directional regimes that select the momentum rule-set.
    pub fn is_trending(self) -> bool {
        matches!(self, MarketRegime::TrendingUp | MarketRegime::TrendingDown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MarketRegime::TrendingUp => "TRENDING_UP",
            MarketRegime::TrendingDown => "TRENDING_DOWN",
            MarketRegime::MeanReverting => "MEAN_REVERTING",
            MarketRegime::Sideways => "SIDEWAYS",
            MarketRegime::HighVolatility => "HIGH_VOLATILITY",
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short-horizon realized volatility relative to its longer-horizon norm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityRegime {
    Low,
    Normal,
    High,
}

impl fmt::Display for VolatilityRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VolatilityRegime::Low => "low",
            VolatilityRegime::Normal => "normal",
            VolatilityRegime::High => "high",
        })
    }
}
