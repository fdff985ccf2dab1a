//! Confidence scoring.
//!
//! Base 50 points plus independent bonuses, capped at 100, reported as a
//! fraction. Points are integers so that threshold comparisons are exact
//! (50 + 10 points is exactly 0.6).

use serde::{Deserialize, Serialize};

use crate::domain::{Direction, MarketRegime};
use crate::snapshot::IndicatorSnapshot;
use crate::strategy::momentum::{ADX_TRENDING, VOLUME_SURGE};
use crate::strategy::{ProvisionalSignal, StrategyKind};

pub const BASE_POINTS: u32 = 50;
pub const MAX_POINTS: u32 = 100;

/// Composite score magnitude that earns the conviction bonus.
pub const COMPOSITE_CONVICTION: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBonus {
    /// Long in TrendingUp, short in TrendingDown, or a mean-reversion
    /// signal in a mean-reversion regime.
    RegimeAlignment,
    /// ADX above 25.
    TrendingAdx,
    /// Volume ratio above 1.5.
    VolumeSurge,
    /// The strategy's composite score is beyond 50 in the signal direction.
    CompositeConviction,
    /// Bollinger position below 0.1 or above 0.9.
    BandExtreme,
    /// RSI below 25 or above 75.
    RsiExtreme,
    /// STRONG signal variant.
    StrongSignal,
}

impl ConfidenceBonus {
    pub fn points(self) -> u32 {
        match self {
            ConfidenceBonus::RegimeAlignment => 20,
            _ => 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceScore {
    points: u32,
    bonuses: Vec<ConfidenceBonus>,
}

impl ConfidenceScore {
    fn from_bonuses(bonuses: Vec<ConfidenceBonus>) -> Self {
        let raw = BASE_POINTS + bonuses.iter().map(|b| b.points()).sum::<u32>();
        Self {
            points: raw.min(MAX_POINTS),
            bonuses,
        }
    }

    /// Capped percentage points.
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Confidence in [0.5, 1.0].
    pub fn value(&self) -> f64 {
        f64::from(self.points) / 100.0
    }

    pub fn bonuses(&self) -> &[ConfidenceBonus] {
        &self.bonuses
    }

    /// Inclusive gate against a configured minimum.
    pub fn clears(&self, min_confidence: f64) -> bool {
        // Round the threshold onto the same integer grid as the score.
        f64::from(self.points) >= (min_confidence * 100.0 - 1e-9).ceil()
    }

    pub fn into_bonuses(self) -> Vec<ConfidenceBonus> {
        self.bonuses
    }
}

fn regime_aligned(signal: &ProvisionalSignal, regime: MarketRegime) -> bool {
    match signal.strategy {
        StrategyKind::Momentum => matches!(
            (signal.direction(), regime),
            (Direction::Long, MarketRegime::TrendingUp)
                | (Direction::Short, MarketRegime::TrendingDown)
        ),
        StrategyKind::MeanReversion => matches!(
            regime,
            MarketRegime::MeanReverting | MarketRegime::Sideways | MarketRegime::HighVolatility
        ),
    }
}

pub fn score_confidence(
    signal: &ProvisionalSignal,
    regime: MarketRegime,
    snapshot: &IndicatorSnapshot,
) -> ConfidenceScore {
    let composite = match signal.strategy {
        StrategyKind::Momentum => snapshot.momentum_score,
        StrategyKind::MeanReversion => snapshot.mean_reversion_score,
    };
    let directed = composite * signal.direction().sign();

    let checks = [
        (ConfidenceBonus::RegimeAlignment, regime_aligned(signal, regime)),
        (ConfidenceBonus::TrendingAdx, snapshot.adx > ADX_TRENDING),
        (ConfidenceBonus::VolumeSurge, snapshot.volume_ratio > VOLUME_SURGE),
        (ConfidenceBonus::CompositeConviction, directed > COMPOSITE_CONVICTION),
        (
            ConfidenceBonus::BandExtreme,
            snapshot.bb_position < 0.1 || snapshot.bb_position > 0.9,
        ),
        (
            ConfidenceBonus::RsiExtreme,
            snapshot.rsi < 25.0 || snapshot.rsi > 75.0,
        ),
        (ConfidenceBonus::StrongSignal, signal.signal_type.is_strong()),
    ];

    ConfidenceScore::from_bonuses(
        checks
            .into_iter()
            .filter_map(|(bonus, applies)| applies.then_some(bonus))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SignalType;
    use crate::strategy::fixtures::neutral_snapshot;

    fn provisional(signal_type: SignalType, strategy: StrategyKind) -> ProvisionalSignal {
        ProvisionalSignal {
            signal_type,
            strategy,
            satisfied: Vec::new(),
        }
    }

    #[test]
    fn base_is_half() {
        let score = score_confidence(
            &provisional(SignalType::Buy, StrategyKind::Momentum),
            MarketRegime::TrendingDown,
            &neutral_snapshot(),
        );
        assert_eq!(score.points(), 50);
        assert_eq!(score.value(), 0.5);
        assert!(score.bonuses().is_empty());
    }

    #[test]
    fn momentum_alignment_follows_direction() {
        let snap = neutral_snapshot();
        let long = provisional(SignalType::Buy, StrategyKind::Momentum);
        let short = provisional(SignalType::Sell, StrategyKind::Momentum);
        assert_eq!(score_confidence(&long, MarketRegime::TrendingUp, &snap).points(), 70);
        assert_eq!(score_confidence(&short, MarketRegime::TrendingUp, &snap).points(), 50);
        assert_eq!(score_confidence(&short, MarketRegime::TrendingDown, &snap).points(), 70);
    }

    #[test]
    fn mean_reversion_signals_always_align_in_their_regimes() {
        let snap = neutral_snapshot();
        for regime in [
            MarketRegime::MeanReverting,
            MarketRegime::Sideways,
            MarketRegime::HighVolatility,
        ] {
            for signal_type in [SignalType::Buy, SignalType::Sell] {
                let score = score_confidence(
                    &provisional(signal_type, StrategyKind::MeanReversion),
                    regime,
                    &snap,
                );
                assert_eq!(score.bonuses(), [ConfidenceBonus::RegimeAlignment]);
            }
        }
    }

    #[test]
    fn composite_bonus_is_directional() {
        let snap = IndicatorSnapshot {
            momentum_score: -55.0,
            ..neutral_snapshot()
        };
        let long = score_confidence(
            &provisional(SignalType::Buy, StrategyKind::Momentum),
            MarketRegime::Sideways,
            &snap,
        );
        assert!(!long.bonuses().contains(&ConfidenceBonus::CompositeConviction));

        let short = score_confidence(
            &provisional(SignalType::Sell, StrategyKind::Momentum),
            MarketRegime::Sideways,
            &snap,
        );
        assert_eq!(short.bonuses(), [ConfidenceBonus::CompositeConviction]);
    }

    #[test]
    fn composite_bonus_reads_the_strategy_score() {
        let snap = IndicatorSnapshot {
            momentum_score: 60.0,
            mean_reversion_score: 0.0,
            ..neutral_snapshot()
        };
        let score = score_confidence(
            &provisional(SignalType::Buy, StrategyKind::MeanReversion),
            MarketRegime::MeanReverting,
            &snap,
        );
        assert!(!score.bonuses().contains(&ConfidenceBonus::CompositeConviction));
    }

    #[test]
    fn everything_caps_at_one() {
        let snap = IndicatorSnapshot {
            adx: 40.0,
            volume_ratio: 3.0,
            mean_reversion_score: 60.0,
            bb_position: 0.02,
            rsi: 20.0,
            ..neutral_snapshot()
        };
        let score = score_confidence(
            &provisional(SignalType::StrongBuy, StrategyKind::MeanReversion),
            MarketRegime::MeanReverting,
            &snap,
        );
        // 50 + 20 + 6 * 10 = 130 → 100
        assert_eq!(score.bonuses().len(), 7);
        assert_eq!(score.points(), 100);
        assert_eq!(score.value(), 1.0);
    }

    #[test]
    fn gate_is_inclusive_and_exact() {
        let score = ConfidenceScore::from_bonuses(vec![ConfidenceBonus::TrendingAdx]);
        assert_eq!(score.value(), 0.6);
        assert!(score.clears(0.6));
        assert!(score.clears(0.55));
        assert!(!score.clears(0.61));
        assert!(!score.clears(0.7));
        assert!(ConfidenceScore::from_bonuses(Vec::new()).clears(0.0));
    }

    #[test]
    fn boundary_readings_earn_nothing() {
        let snap = IndicatorSnapshot {
            adx: 25.0,
            volume_ratio: 1.5,
            bb_position: 0.9,
            rsi: 75.0,
            momentum_score: 50.0,
            ..neutral_snapshot()
        };
        let score = score_confidence(
            &provisional(SignalType::Buy, StrategyKind::Momentum),
            MarketRegime::Sideways,
            &snap,
        );
        assert!(score.bonuses().is_empty());
    }
}
