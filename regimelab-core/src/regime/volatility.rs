//! Realized-volatility regime: short-window versus long-window dispersion
//! of simple returns.

use crate::config::RegimeParams;
use crate::domain::VolatilityRegime;
use crate::stats::std_dev;

/// Trading days per year, used to annualize daily return dispersion.
pub const TRADING_DAYS: f64 = 252.0;

/// Annualized sample standard deviation of the last `window` simple returns.
///
/// NaN when fewer than `window` returns exist or any return in the window is
/// undefined (e.g. a zero previous close).
pub fn realized_volatility(closes: &[f64], window: usize) -> f64 {
    if window < 2 || closes.len() < window + 1 {
        return f64::NAN;
    }
    let tail = &closes[closes.len() - window - 1..];
    let returns: Vec<f64> = tail.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
    if returns.iter().any(|r| !r.is_finite()) {
        return f64::NAN;
    }
    std_dev(&returns, 1) * TRADING_DAYS.sqrt()
}

/// High when short > high_ratio * long, Low when short < low_ratio * long,
/// Normal otherwise or when either input is undefined.
pub fn classify_volatility(short: f64, long: f64, params: &RegimeParams) -> VolatilityRegime {
    if short.is_nan() || long.is_nan() {
        VolatilityRegime::Normal
    } else if short > long * params.high_volatility_ratio {
        VolatilityRegime::High
    } else if short < long * params.low_volatility_ratio {
        VolatilityRegime::Low
    } else {
        VolatilityRegime::Normal
    }
}
