//! Momentum checklists, used in trending regimes.
//!
//! Six conditions per direction: five or more satisfied is a STRONG signal,
//! four is a plain one.
//!
//! The RSI zones overlap between 45 and 55; a reading there counts for the
//! bullish side only. The volume surge is a confirmation: it is credited to
//! the direction already strictly ahead on the other five conditions, and to
//! neither on a tie.

use super::condition::Condition;
use crate::snapshot::IndicatorSnapshot;

pub const ADX_TRENDING: f64 = 25.0;
pub const VOLUME_SURGE: f64 = 1.5;

/// Conditions that only confirm a lead established by the rest of the checklist.
pub const CONFIRMATIONS: &[&str] = &["volume_surge"];

fn bullish_rsi(rsi: f64) -> bool {
    rsi > 45.0 && rsi < 75.0
}

fn volume_surge(s: &IndicatorSnapshot) -> bool {
    s.volume_ratio > VOLUME_SURGE
}

fn volume_reason(s: &IndicatorSnapshot) -> String {
    format!("Volume {:.2}x its average", s.volume_ratio)
}

pub static BULLISH: &[Condition] = &[
    Condition {
        name: "macd_crossover",
        predicate: |s, _| s.macd > s.macd_signal,
        reason: |s| format!("MACD above signal ({:.3} > {:.3})", s.macd, s.macd_signal),
    },
    Condition {
        name: "rsi_momentum",
        predicate: |s, _| bullish_rsi(s.rsi),
        reason: |s| format!("RSI in bullish momentum zone ({:.1})", s.rsi),
    },
    Condition {
        name: "ma_alignment",
        predicate: |s, _| s.close > s.sma_short && s.sma_short > s.sma_long,
        reason: |s| {
            format!(
                "Price above rising averages ({:.2} > {:.2} > {:.2})",
                s.close, s.sma_short, s.sma_long
            )
        },
    },
    Condition {
        name: "trend_strength",
        predicate: |s, _| s.adx > ADX_TRENDING && s.plus_di > s.minus_di,
        reason: |s| format!("Strong uptrend (ADX {:.1}, +DI {:.1} > -DI {:.1})", s.adx, s.plus_di, s.minus_di),
    },
    Condition {
        name: "volume_surge",
        predicate: |s, _| volume_surge(s),
        reason: volume_reason,
    },
    Condition {
        name: "composite_momentum",
        predicate: |s, p| s.momentum_score > p.momentum_threshold,
        reason: |s| format!("Composite momentum bullish ({:.1})", s.momentum_score),
    },
];

pub static BEARISH: &[Condition] = &[
    Condition {
        name: "macd_crossover",
        predicate: |s, _| s.macd < s.macd_signal,
        reason: |s| format!("MACD below signal ({:.3} < {:.3})", s.macd, s.macd_signal),
    },
    Condition {
        name: "rsi_momentum",
        predicate: |s, _| s.rsi > 25.0 && s.rsi < 55.0 && !bullish_rsi(s.rsi),
        reason: |s| format!("RSI in bearish momentum zone ({:.1})", s.rsi),
    },
    Condition {
        name: "ma_alignment",
        predicate: |s, _| s.close < s.sma_short && s.sma_short < s.sma_long,
        reason: |s| {
            format!(
                "Price below falling averages ({:.2} < {:.2} < {:.2})",
                s.close, s.sma_short, s.sma_long
            )
        },
    },
    Condition {
        name: "trend_strength",
        predicate: |s, _| s.adx > ADX_TRENDING && s.minus_di > s.plus_di,
        reason: |s| format!("Strong downtrend (ADX {:.1}, -DI {:.1} > +DI {:.1})", s.adx, s.minus_di, s.plus_di),
    },
    Condition {
        name: "volume_surge",
        predicate: |s, _| volume_surge(s),
        reason: volume_reason,
    },
    Condition {
        name: "composite_momentum",
        predicate: |s, p| s.momentum_score < -p.momentum_threshold,
        reason: |s| format!("Composite momentum bearish ({:.1})", s.momentum_score),
    },
];
