//! Portfolio-level signal summary.

use serde::{Deserialize, Serialize};

use regimelab_core::{Direction, MarketRegime, SignalType, TradingSignal};

/// One entry of the summary's top list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPick {
    pub ticker: String,
    pub signal_type: SignalType,
    pub confidence: f64,
    pub regime: MarketRegime,
    pub reasons: Vec<String>,
}

impl From<&TradingSignal> for TopPick {
    fn from(signal: &TradingSignal) -> Self {
        Self {
            ticker: signal.ticker.clone(),
            signal_type: signal.signal_type,
            confidence: signal.confidence,
            regime: signal.regime,
            reasons: signal.reasons.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSummary {
    pub total_signals: usize,
    /// BUY and STRONG_BUY.
    pub buy_signals: usize,
    /// SELL and STRONG_SELL.
    pub sell_signals: usize,
    /// Mean confidence, 0 when there are no signals.
    pub average_confidence: f64,
    pub top_picks: Vec<TopPick>,
}

impl SignalSummary {
    /// Summarize ranked signals. `top_n` takes the first entries as given,
    /// so pass the aggregator's sorted output.
    pub fn from_signals(signals: &[TradingSignal], top_n: usize) -> Self {
        let buy_signals = signals
            .iter()
            .filter(|s| s.signal_type.direction() == Direction::Long)
            .count();
        let average_confidence = if signals.is_empty() {
            0.0
        } else {
            signals.iter().map(|s| s.confidence).sum::<f64>() / signals.len() as f64
        };

        Self {
            total_signals: signals.len(),
            buy_signals,
            sell_signals: signals.len() - buy_signals,
            average_confidence,
            top_picks: signals.iter().take(top_n).map(TopPick::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::fixtures::signal;

    #[test]
    fn empty_summary() {
        let summary = SignalSummary::from_signals(&[], 3);
        assert_eq!(summary.total_signals, 0);
        assert_eq!(summary.average_confidence, 0.0);
        assert!(summary.top_picks.is_empty());
    }

    #[test]
    fn counts_directions_and_averages() {
        let signals = vec![
            signal("NVDA", SignalType::StrongBuy, 0.9),
            signal("TSLA", SignalType::Sell, 0.7),
            signal("AAPL", SignalType::Buy, 0.6),
            signal("XOM", SignalType::StrongSell, 0.6),
        ];
        let summary = SignalSummary::from_signals(&signals, 3);
        assert_eq!(summary.total_signals, 4);
        assert_eq!(summary.buy_signals, 2);
        assert_eq!(summary.sell_signals, 2);
        assert!((summary.average_confidence - 0.7).abs() < 1e-12);

        let top: Vec<_> = summary.top_picks.iter().map(|p| p.ticker.as_str()).collect();
        assert_eq!(top, ["NVDA", "TSLA", "AAPL"]);
        assert_eq!(summary.top_picks[0].reasons, ["NVDA reason"]);
    }

    #[test]
    fn top_n_larger_than_list() {
        let signals = vec![signal("SPY", SignalType::Buy, 0.8)];
        assert_eq!(SignalSummary::from_signals(&signals, 10).top_picks.len(), 1);
    }
}
