//! Signal ordering.

use std::cmp::Ordering;

use regimelab_core::TradingSignal;

/// Confidence descending, then ticker ascending.
///
/// `total_cmp` keeps the order total even for non-finite confidences,
/// which the engine never emits.
pub fn rank_order(a: &TradingSignal, b: &TradingSignal) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| a.ticker.cmp(&b.ticker))
}

pub fn rank_signals(signals: &mut [TradingSignal]) {
    signals.sort_by(rank_order);
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};
    use regimelab_core::{
        IndicatorSnapshot, MarketRegime, SignalType, StrategyKind, TradingSignal, VolatilityRegime,
    };

    pub fn snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            close: 100.0,
            volume: 1_000.0,
            rsi: 50.0,
            macd: 0.0,
            macd_signal: 0.0,
            macd_histogram: 0.0,
            bb_upper: 104.0,
            bb_middle: 100.0,
            bb_lower: 96.0,
            bb_position: 0.5,
            atr: 2.0,
            adx: 20.0,
            plus_di: 20.0,
            minus_di: 20.0,
            stoch_k: 50.0,
            stoch_d: 50.0,
            williams_r: -50.0,
            sma_short: 100.0,
            sma_long: 100.0,
            ema_fast: 100.0,
            ema_slow: 100.0,
            volume_sma: 1_000.0,
            volume_ratio: 1.0,
            momentum_score: 0.0,
            mean_reversion_score: 0.0,
            hurst: 0.5,
            trend_strength: 0.5,
            volatility_short: 0.2,
            volatility_long: 0.2,
            volatility_regime: VolatilityRegime::Normal,
            squeeze_on: false,
            squeeze_momentum: 0.0,
        }
    }

    pub fn signal(ticker: &str, signal_type: SignalType, confidence: f64) -> TradingSignal {
        let long = matches!(signal_type, SignalType::Buy | SignalType::StrongBuy);
        let (stop_loss, target_price) = if long { (96.0, 108.0) } else { (104.0, 92.0) };
        TradingSignal {
            ticker: ticker.to_string(),
            signal_type,
            confidence,
            entry_price: 100.0,
            stop_loss,
            target_price,
            regime: MarketRegime::Sideways,
            strategy: StrategyKind::MeanReversion,
            reasons: vec![format!("{ticker} reason")],
            bonuses: Vec::new(),
            indicators: snapshot(),
            evaluated_at: Utc.with_ymd_and_hms(2024, 6, 3, 21, 0, 0).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::signal;
    use super::*;
    use proptest::prelude::*;
    use regimelab_core::SignalType;

    #[test]
    fn confidence_first_then_ticker() {
        let mut signals = vec![
            signal("MSFT", SignalType::Buy, 0.7),
            signal("AAPL", SignalType::Sell, 0.7),
            signal("ZM", SignalType::StrongBuy, 0.9),
            signal("AMZN", SignalType::Buy, 0.6),
        ];
        rank_signals(&mut signals);
        let order: Vec<_> = signals.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(order, ["ZM", "AAPL", "MSFT", "AMZN"]);
    }

    #[test]
    fn ticker_order_is_bytewise() {
        let mut signals = vec![
            signal("b", SignalType::Buy, 0.8),
            signal("B", SignalType::Buy, 0.8),
            signal("BRK.A", SignalType::Buy, 0.8),
        ];
        rank_signals(&mut signals);
        let order: Vec<_> = signals.iter().map(|s| s.ticker.as_str()).collect();
        assert_eq!(order, ["B", "BRK.A", "b"]);
    }

    proptest! {
        #[test]
        fn ranking_is_a_total_order(
            entries in prop::collection::vec(("[A-Z]{1,4}", 5u32..=10), 0..30),
        ) {
            let mut signals: Vec<_> = entries
                .iter()
                .map(|(ticker, tenths)| signal(ticker, SignalType::Buy, f64::from(*tenths) / 10.0))
                .collect();
            rank_signals(&mut signals);
            for pair in signals.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(
                    a.confidence > b.confidence
                        || (a.confidence == b.confidence && a.ticker <= b.ticker)
                );
            }
        }
    }
}
