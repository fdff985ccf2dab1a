//! Hurst exponent from the scaling of lagged price differences.
//!
//! For each lag in `2..max_lag`, tau = sqrt(std(p[t+lag] - p[t])). Since
//! std of the differences grows like lag^H, log(tau) is linear in log(lag)
//! with slope H/2.

use crate::stats::{linear_fit, std_dev};

/// Value reported when the series is too short or degenerate.
pub const NEUTRAL_HURST: f64 = 0.5;

/// Hurst exponent of the last `window` closes.
///
/// Returns 0.5 when fewer than `2 * max_lag` closes are available or fewer
/// than two lags yield a usable (finite, positive) tau.
pub fn hurst_exponent(closes: &[f64], window: usize, max_lag: usize) -> f64 {
    let prices = &closes[closes.len().saturating_sub(window)..];
    if prices.len() < 2 * max_lag {
        return NEUTRAL_HURST;
    }

    let mut log_lags = Vec::with_capacity(max_lag);
    let mut log_taus = Vec::with_capacity(max_lag);
    for lag in 2..max_lag {
        let diffs: Vec<f64> = prices
            .iter()
            .zip(&prices[lag..])
            .map(|(earlier, later)| later - earlier)
            .collect();
        let tau = std_dev(&diffs, 0).sqrt();
        if tau.is_finite() && tau > 0.0 {
            log_lags.push((lag as f64).ln());
            log_taus.push(tau.ln());
        }
    }

    if log_lags.len() < 2 {
        return NEUTRAL_HURST;
    }

    match linear_fit(&log_lags, &log_taus) {
        Some((slope, _)) if slope.is_finite() => 2.0 * slope,
        _ => NEUTRAL_HURST,
    }
}
