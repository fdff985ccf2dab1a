//! Mean-reversion checklists, used in mean-reverting, sideways and
//! high-volatility regimes.
//!
//! Five conditions per direction: four or more satisfied is a STRONG signal,
//! three is a plain one. The long side looks for oversold readings.

use super::condition::Condition;

pub static OVERSOLD: &[Condition] = &[
    Condition {
        name: "rsi_extreme",
        predicate: |s, _| s.rsi < 30.0,
        reason: |s| format!("RSI oversold ({:.1})", s.rsi),
    },
    Condition {
        name: "bollinger_extreme",
        predicate: |s, _| s.bb_position < 0.1,
        reason: |s| format!("Price near lower Bollinger Band (position {:.2})", s.bb_position),
    },
    Condition {
        name: "stochastic_extreme",
        predicate: |s, _| s.stoch_k < 20.0,
        reason: |s| format!("Stochastic oversold (%K {:.1})", s.stoch_k),
    },
    Condition {
        name: "williams_extreme",
        predicate: |s, _| s.williams_r < -80.0,
        reason: |s| format!("Williams %R oversold ({:.1})", s.williams_r),
    },
    Condition {
        name: "mean_reversion_score",
        predicate: |s, p| s.mean_reversion_score > p.mean_reversion_threshold,
        reason: |s| format!("Mean reversion score favors a bounce ({:.1})", s.mean_reversion_score),
    },
];

pub static OVERBOUGHT: &[Condition] = &[
    Condition {
        name: "rsi_extreme",
        predicate: |s, _| s.rsi > 70.0,
        reason: |s| format!("RSI overbought ({:.1})", s.rsi),
    },
    Condition {
        name: "bollinger_extreme",
        predicate: |s, _| s.bb_position > 0.9,
        reason: |s| format!("Price near upper Bollinger Band (position {:.2})", s.bb_position),
    },
    Condition {
        name: "stochastic_extreme",
        predicate: |s, _| s.stoch_k > 80.0,
        reason: |s| format!("Stochastic overbought (%K {:.1})", s.stoch_k),
    },
    Condition {
        name: "williams_extreme",
        predicate: |s, _| s.williams_r > -20.0,
        reason: |s| format!("Williams %R overbought ({:.1})", s.williams_r),
    },
    Condition {
        name: "mean_reversion_score",
        predicate: |s, p| s.mean_reversion_score < -p.mean_reversion_threshold,
        reason: |s| format!("Mean reversion score favors a pullback ({:.1})", s.mean_reversion_score),
    },
];
