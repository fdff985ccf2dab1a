//! Strategy selection and condition counting.
//!
//! The regime picks exactly one strategy. Both directions of that
//! strategy's checklist are evaluated. Confirmation conditions (the momentum
//! volume surge) count only for the direction strictly ahead on the rest.
//! The long side is checked first: it wins when it reaches the plain
//! threshold, otherwise the short side does. There is no fallback to the
//! other strategy.

pub mod condition;
pub mod mean_reversion;
pub mod momentum;

pub use condition::{evaluate_checklist, satisfied_count, Condition, ConditionResult};

use serde::{Deserialize, Serialize};

use crate::config::StrategyParams;
use crate::domain::{Direction, MarketRegime, SignalType};
use crate::snapshot::IndicatorSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Momentum,
    MeanReversion,
}

impl StrategyKind {
    pub fn for_regime(regime: MarketRegime) -> Self {
        match regime {
            MarketRegime::TrendingUp | MarketRegime::TrendingDown => StrategyKind::Momentum,
            MarketRegime::MeanReverting | MarketRegime::Sideways | MarketRegime::HighVolatility => {
                StrategyKind::MeanReversion
            }
        }
    }

    pub fn checklist(self, direction: Direction) -> &'static [Condition] {
        match (self, direction) {
            (StrategyKind::Momentum, Direction::Long) => momentum::BULLISH,
            (StrategyKind::Momentum, Direction::Short) => momentum::BEARISH,
            (StrategyKind::MeanReversion, Direction::Long) => mean_reversion::OVERSOLD,
            (StrategyKind::MeanReversion, Direction::Short) => mean_reversion::OVERBOUGHT,
        }
    }

    /// Condition names credited only to the direction already in the lead.
    pub fn confirmations(self) -> &'static [&'static str] {
        match self {
            StrategyKind::Momentum => momentum::CONFIRMATIONS,
            StrategyKind::MeanReversion => &[],
        }
    }

    /// Satisfied conditions needed for a plain signal.
    pub fn signal_threshold(self) -> usize {
        match self {
            StrategyKind::Momentum => 4,
            StrategyKind::MeanReversion => 3,
        }
    }

    /// Satisfied conditions needed for a STRONG signal.
    pub fn strong_threshold(self) -> usize {
        self.signal_threshold() + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Momentum => "momentum",
            StrategyKind::MeanReversion => "mean_reversion",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A direction chosen by the checklists, before confidence gating and sizing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvisionalSignal {
    pub signal_type: SignalType,
    pub strategy: StrategyKind,
    /// Satisfied conditions of the winning direction, in checklist order.
    pub satisfied: Vec<ConditionResult>,
}

impl ProvisionalSignal {
    pub fn direction(&self) -> Direction {
        self.signal_type.direction()
    }

    pub fn reasons(&self) -> Vec<String> {
        self.satisfied.iter().map(|c| c.reason.clone()).collect()
    }
}

/// Full checklist evaluation for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyOutcome {
    pub strategy: StrategyKind,
    pub long: Vec<ConditionResult>,
    pub short: Vec<ConditionResult>,
    pub signal: Option<ProvisionalSignal>,
}

impl StrategyOutcome {
    pub fn long_count(&self) -> usize {
        satisfied_count(&self.long)
    }

    pub fn short_count(&self) -> usize {
        satisfied_count(&self.short)
    }
}

pub fn evaluate_strategy(
    snapshot: &IndicatorSnapshot,
    regime: MarketRegime,
    params: &StrategyParams,
) -> StrategyOutcome {
    let strategy = StrategyKind::for_regime(regime);
    let mut long = evaluate_checklist(strategy.checklist(Direction::Long), snapshot, params);
    let mut short = evaluate_checklist(strategy.checklist(Direction::Short), snapshot, params);
    apply_confirmations(strategy.confirmations(), &mut long, &mut short);

    let (long_count, short_count) = (satisfied_count(&long), satisfied_count(&short));
    let threshold = strategy.signal_threshold();
    let winner = if long_count >= threshold {
        Some((Direction::Long, long_count, &long))
    } else if short_count >= threshold {
        Some((Direction::Short, short_count, &short))
    } else {
        None
    };

    let signal = winner.map(|(direction, count, results)| ProvisionalSignal {
        signal_type: SignalType::new(direction, count >= strategy.strong_threshold()),
        strategy,
        satisfied: results.iter().filter(|r| r.satisfied).cloned().collect(),
    });

    StrategyOutcome {
        strategy,
        long,
        short,
        signal,
    }
}

/// Keep a confirmation satisfied only on the side that leads without it.
fn apply_confirmations(
    confirmations: &[&str],
    long: &mut [ConditionResult],
    short: &mut [ConditionResult],
) {
    if confirmations.is_empty() {
        return;
    }
    let lead = |results: &[ConditionResult]| {
        results
            .iter()
            .filter(|r| r.satisfied && !confirmations.contains(&r.name))
            .count()
    };
    let (long_lead, short_lead) = (lead(long), lead(short));
    for r in long.iter_mut().filter(|r| confirmations.contains(&r.name)) {
        r.satisfied &= long_lead > short_lead;
    }
    for r in short.iter_mut().filter(|r| confirmations.contains(&r.name)) {
        r.satisfied &= short_lead > long_lead;
    }
}
