//! TradingSignal: the materialized recommendation for one ticker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::confidence::ConfidenceBonus;
use crate::domain::{MarketRegime, SignalType, Ticker};
use crate::sizing::PriceLevels;
use crate::snapshot::IndicatorSnapshot;
use crate::strategy::StrategyKind;

/// Immutable once built; ownership passes to the caller.
///
/// Long signals satisfy `stop_loss < entry_price < target_price`, short
/// signals the mirror image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub ticker: Ticker,
    pub signal_type: SignalType,
    pub confidence: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub target_price: f64,
    pub regime: MarketRegime,
    pub strategy: StrategyKind,
    /// Satisfied condition descriptions, in checklist order.
    pub reasons: Vec<String>,
    pub bonuses: Vec<ConfidenceBonus>,
    pub indicators: IndicatorSnapshot,
    pub evaluated_at: DateTime<Utc>,
}

impl TradingSignal {
    pub fn levels(&self) -> PriceLevels {
        PriceLevels {
            entry: self.entry_price,
            stop_loss: self.stop_loss,
            target: self.target_price,
        }
    }

    pub fn risk_reward(&self) -> f64 {
        self.levels().risk_reward()
    }

    pub fn is_long(&self) -> bool {
        matches!(self.signal_type, SignalType::Buy | SignalType::StrongBuy)
    }

    /// True when stop and target sit on the correct sides of the entry.
    pub fn levels_are_ordered(&self) -> bool {
        if self.is_long() {
            self.stop_loss < self.entry_price && self.entry_price < self.target_price
        } else {
            self.target_price < self.entry_price && self.entry_price < self.stop_loss
        }
    }
}
