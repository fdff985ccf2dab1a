//! Indicator library.
//!
//! Every indicator is a pure function of the bar history: full series in,
//! same-length numeric series out, with `f64::NAN` during warm-up. The
//! snapshot builder reads the last element of each series.
//!
//! Multi-line indicators (MACD, Bollinger, ADX, Stochastic, Keltner, squeeze)
//! are exposed as separate named instances per line, keeping the
//! single-series `Indicator` trait unchanged.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod composite;
pub mod ema;
pub mod keltner;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod squeeze;
pub mod stochastic;
pub mod williams_r;

pub use adx::{Adx, AdxLine};
pub use atr::Atr;
pub use bollinger::{Bollinger, BollingerBand};
pub use composite::{CompositeMomentum, MeanReversionScore};
pub use ema::Ema;
pub use keltner::{Keltner, KeltnerBand};
pub use macd::{Macd, MacdLine};
pub use rsi::Rsi;
pub use sma::Sma;
pub use squeeze::{Squeeze, SqueezeLine};
pub use stochastic::{Stochastic, StochasticLine};
pub use williams_r::WilliamsR;

use crate::domain::PriceBar;

/// Trait for indicators.
///
/// Indicators take a full bar series and produce a numeric output series of
/// the same length. The first `lookback()` values are `f64::NAN` (warmup).
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "atr_14").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator produces valid output.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[PriceBar]) -> Vec<f64>;

    /// Value at the most recent bar, NaN if the series is empty or still warming up.
    fn latest(&self, bars: &[PriceBar]) -> f64 {
        self.compute(bars).last().copied().unwrap_or(f64::NAN)
    }
}

/// Extract closes from bars.
pub(crate) fn closes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Highest high over the trailing `period` bars, NaN during warm-up or when
/// the window holds a NaN.
pub(crate) fn rolling_max(bars: &[PriceBar], period: usize) -> Vec<f64> {
    rolling_extreme(bars, period, |b| b.high, f64::max)
}

/// Lowest low over the trailing `period` bars.
pub(crate) fn rolling_min(bars: &[PriceBar], period: usize) -> Vec<f64> {
    rolling_extreme(bars, period, |b| b.low, f64::min)
}

fn rolling_extreme(
    bars: &[PriceBar],
    period: usize,
    field: impl Fn(&PriceBar) -> f64,
    pick: impl Fn(f64, f64) -> f64,
) -> Vec<f64> {
    let mut result = vec![f64::NAN; bars.len()];
    if period == 0 {
        return result;
    }
    for end in (period - 1)..bars.len() {
        let window = &bars[end + 1 - period..=end];
        if window.iter().any(|b| field(b).is_nan()) {
            continue;
        }
        result[end] = window
            .iter()
            .map(&field)
            .fold(field(&window[0]), &pick);
    }
    result
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLCV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<PriceBar> {
    use chrono::{Duration, TimeZone, Utc};
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            PriceBar::new(base + Duration::days(i as i64), open, high, low, close, 1000.0)
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close) tuples for testing.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<PriceBar> {
    use chrono::{Duration, TimeZone, Utc};
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| {
            PriceBar::new(base + Duration::days(i as i64), open, high, low, close, 1000.0)
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
