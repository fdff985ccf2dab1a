//! SignalEngine: per-ticker evaluation pipeline.
//!
//! snapshot → regime → strategy checklists → confidence gate → sizing.
//! Pure and synchronous; one engine can be shared across threads.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::confidence::{score_confidence, ConfidenceScore};
use crate::config::{ConfigError, EngineConfig};
use crate::domain::{MarketRegime, PriceSeries};
use crate::error::SignalError;
use crate::regime::classify_regime;
use crate::signal::TradingSignal;
use crate::sizing::PositionSizer;
use crate::snapshot::IndicatorSnapshot;
use crate::strategy::{evaluate_strategy, StrategyOutcome};

/// Everything the engine derives from one series, with or without a signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub snapshot: IndicatorSnapshot,
    pub regime: MarketRegime,
    pub outcome: StrategyOutcome,
    /// Present when the checklists produced a provisional signal.
    pub confidence: Option<ConfidenceScore>,
}

#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: EngineConfig,
    sizer: PositionSizer,
    required_history: usize,
}

impl SignalEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sizer: PositionSizer::new(config.volatility_factor),
            required_history: config.required_history(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Minimum number of bars accepted by `analyze` and `generate_signal`.
    pub fn required_history(&self) -> usize {
        self.required_history
    }

    fn check_history(&self, series: &PriceSeries) -> Result<(), SignalError> {
        if series.len() < self.required_history {
            return Err(SignalError::InsufficientData {
                bars: series.len(),
                required: self.required_history,
            });
        }
        Ok(())
    }

    pub fn snapshot(&self, series: &PriceSeries) -> Result<IndicatorSnapshot, SignalError> {
        self.check_history(series)?;
        Ok(IndicatorSnapshot::compute(
            series.bars(),
            &self.config.indicators,
            &self.config.regime,
        ))
    }

    pub fn classify(&self, snapshot: &IndicatorSnapshot) -> MarketRegime {
        classify_regime(&snapshot.regime_inputs(), &self.config.regime)
    }

    /// Snapshot, regime and checklist detail, without gating or sizing.
    pub fn analyze(&self, series: &PriceSeries) -> Result<Analysis, SignalError> {
        let snapshot = self.snapshot(series)?;
        let regime = self.classify(&snapshot);
        let outcome = evaluate_strategy(&snapshot, regime, &self.config.strategy);
        let confidence = outcome
            .signal
            .as_ref()
            .map(|signal| score_confidence(signal, regime, &snapshot));
        Ok(Analysis {
            snapshot,
            regime,
            outcome,
            confidence,
        })
    }

    /// Evaluate one ticker. `Ok(None)` means no recommendation.
    pub fn generate_signal(
        &self,
        ticker: &str,
        series: &PriceSeries,
        evaluated_at: DateTime<Utc>,
    ) -> Result<Option<TradingSignal>, SignalError> {
        let snapshot = self.snapshot(series)?;
        let regime = self.classify(&snapshot);
        self.evaluate_snapshot(ticker, snapshot, regime, evaluated_at)
    }

    /// Evaluate an already-computed snapshot under an already-classified regime.
    pub fn evaluate_snapshot(
        &self,
        ticker: &str,
        snapshot: IndicatorSnapshot,
        regime: MarketRegime,
        evaluated_at: DateTime<Utc>,
    ) -> Result<Option<TradingSignal>, SignalError> {
        let outcome = evaluate_strategy(&snapshot, regime, &self.config.strategy);
        debug!(
            ticker,
            regime = %regime,
            strategy = %outcome.strategy,
            long = outcome.long_count(),
            short = outcome.short_count(),
            "checklists evaluated"
        );

        let Some(provisional) = outcome.signal else {
            return Ok(None);
        };

        let confidence = score_confidence(&provisional, regime, &snapshot);
        if !confidence.clears(self.config.min_confidence) {
            debug!(
                ticker,
                signal_type = %provisional.signal_type,
                confidence = confidence.value(),
                min_confidence = self.config.min_confidence,
                "below confidence gate"
            );
            return Ok(None);
        }

        let levels = self
            .sizer
            .levels(provisional.direction(), snapshot.close, snapshot.atr)?;

        Ok(Some(TradingSignal {
            ticker: ticker.to_string(),
            signal_type: provisional.signal_type,
            confidence: confidence.value(),
            entry_price: levels.entry,
            stop_loss: levels.stop_loss,
            target_price: levels.target,
            regime,
            strategy: provisional.strategy,
            reasons: provisional.reasons(),
            bonuses: confidence.into_bonuses(),
            indicators: snapshot,
            evaluated_at,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::ConfidenceBonus;
    use crate::domain::SignalType;
    use crate::indicators::make_bars;
    use crate::strategy::fixtures::neutral_snapshot;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 21, 0, 0).unwrap()
    }

    fn engine() -> SignalEngine {
        SignalEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn invalid_config_fails_construction() {
        let config = EngineConfig::default().with_min_confidence(-0.1);
        assert!(matches!(
            SignalEngine::new(config),
            Err(ConfigError::MinConfidenceOutOfRange { .. })
        ));
    }

    #[test]
    fn short_series_is_insufficient() {
        let closes: Vec<f64> = (0..49).map(|i| 100.0 + i as f64).collect();
        let series = PriceSeries::new(make_bars(&closes)).unwrap();
        assert_eq!(
            engine().generate_signal("AAPL", &series, now()),
            Err(SignalError::InsufficientData {
                bars: 49,
                required: 50
            })
        );
        assert!(engine().analyze(&series).is_err());
    }

    #[test]
    fn neutral_snapshot_produces_nothing() {
        let result = engine()
            .evaluate_snapshot("SPY", neutral_snapshot(), MarketRegime::Sideways, now())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn gate_runs_before_sizing() {
        // A plain momentum BUY against the regime scores 0.5 and must be
        // dropped before the zero ATR is ever looked at.
        let snap = IndicatorSnapshot {
            close: 110.0,
            macd: 1.0,
            macd_signal: 0.5,
            rsi: 60.0,
            sma_short: 105.0,
            sma_long: 100.0,
            momentum_score: 35.0,
            atr: 0.0,
            ..neutral_snapshot()
        };
        let result = engine().evaluate_snapshot("X", snap, MarketRegime::TrendingDown, now());
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn degenerate_atr_after_gate_is_an_error() {
        let snap = IndicatorSnapshot {
            rsi: 25.0,
            bb_position: 0.05,
            stoch_k: 10.0,
            atr: 0.0,
            ..neutral_snapshot()
        };
        let result = engine().evaluate_snapshot("X", snap, MarketRegime::MeanReverting, now());
        assert_eq!(result, Err(SignalError::DegenerateVolatility { atr: 0.0 }));
    }

    #[test]
    fn mean_reversion_signal_carries_everything() {
        let snap = IndicatorSnapshot {
            close: 50.0,
            atr: 1.5,
            rsi: 28.0,
            bb_position: 0.05,
            stoch_k: 12.0,
            ..neutral_snapshot()
        };
        let signal = engine()
            .evaluate_snapshot("KO", snap.clone(), MarketRegime::MeanReverting, now())
            .unwrap()
            .unwrap();

        assert_eq!(signal.ticker, "KO");
        assert_eq!(signal.signal_type, SignalType::Buy);
        assert_eq!(signal.strategy.as_str(), "mean_reversion");
        // 50 + 20 alignment + 10 band extreme
        assert_eq!(signal.confidence, 0.8);
        assert_eq!(
            signal.bonuses,
            [ConfidenceBonus::RegimeAlignment, ConfidenceBonus::BandExtreme]
        );
        assert_eq!(signal.reasons.len(), 3);
        assert!(signal.reasons[0].starts_with("RSI oversold"));
        assert_eq!(signal.stop_loss, 47.0);
        assert_eq!(signal.target_price, 56.0);
        assert_eq!(signal.indicators, snap);
        assert_eq!(signal.evaluated_at, now());
        assert!(signal.levels_are_ordered());
    }

    #[test]
    fn analyze_reports_checklists_without_gating() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 0.5).collect();
        let series = PriceSeries::new(make_bars(&closes)).unwrap();
        let analysis = engine().analyze(&series).unwrap();
        let checklist_len = analysis.outcome.strategy.checklist(crate::domain::Direction::Long).len();
        assert_eq!(analysis.outcome.long.len(), checklist_len);
        assert_eq!(analysis.outcome.short.len(), checklist_len);
        assert_eq!(analysis.confidence.is_some(), analysis.outcome.signal.is_some());
        assert_eq!(analysis.regime, engine().classify(&analysis.snapshot));
    }
}
