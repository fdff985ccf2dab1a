//! ADX: Average Directional Index (Wilder), with its directional lines.
//!
//! Steps:
//! 1. Compute +DM and -DM from consecutive bars
//! 2. Smooth +DM, -DM, and TR using Wilder smoothing (alpha = 1/period)
//! 3. +DI = 100 * smoothed(+DM) / smoothed(TR)
//! 4. -DI = 100 * smoothed(-DM) / smoothed(TR)
//! 5. DX = 100 * |+DI - -DI| / (+DI + -DI)
//! 6. ADX = Wilder-smoothed DX
//!
//! Lookback: period for the DI lines, 2 * period - 1 for ADX.

use super::atr::{true_range, wilder_smooth};
use super::Indicator;
use crate::domain::PriceBar;

/// Which ADX output line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdxLine {
    Adx,
    PlusDi,
    MinusDi,
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    line: AdxLine,
    name: String,
}

impl Adx {
    fn with_line(period: usize, line: AdxLine, prefix: &str) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self {
            period,
            line,
            name: format!("{prefix}_{period}"),
        }
    }

    pub fn adx(period: usize) -> Self {
        Self::with_line(period, AdxLine::Adx, "adx")
    }

    pub fn plus_di(period: usize) -> Self {
        Self::with_line(period, AdxLine::PlusDi, "plus_di")
    }

    pub fn minus_di(period: usize) -> Self {
        Self::with_line(period, AdxLine::MinusDi, "minus_di")
    }
}

/// +DI, -DI and ADX series for one period.
pub(crate) struct DirectionalSeries {
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
    pub adx: Vec<f64>,
}

pub(crate) fn directional_series(bars: &[PriceBar], period: usize) -> DirectionalSeries {
    let n = bars.len();
    let mut plus_dm = vec![f64::NAN; n];
    let mut minus_dm = vec![f64::NAN; n];

    for (i, pair) in bars.windows(2).enumerate() {
        let (prev, bar) = (&pair[0], &pair[1]);
        if bar.high.is_nan() || bar.low.is_nan() || prev.high.is_nan() || prev.low.is_nan() {
            continue;
        }
        let up = bar.high - prev.high;
        let down = prev.low - bar.low;
        plus_dm[i + 1] = if up > down && up > 0.0 { up } else { 0.0 };
        minus_dm[i + 1] = if down > up && down > 0.0 { down } else { 0.0 };
    }

    let smooth_tr = wilder_smooth(&true_range(bars), period);
    let smooth_plus = wilder_smooth(&plus_dm, period);
    let smooth_minus = wilder_smooth(&minus_dm, period);

    let mut plus_di = vec![f64::NAN; n];
    let mut minus_di = vec![f64::NAN; n];
    let mut dx = vec![f64::NAN; n];
    for i in 0..n {
        let (tr, p, m) = (smooth_tr[i], smooth_plus[i], smooth_minus[i]);
        if tr.is_nan() || p.is_nan() || m.is_nan() || tr == 0.0 {
            continue;
        }
        let pdi = 100.0 * p / tr;
        let mdi = 100.0 * m / tr;
        plus_di[i] = pdi;
        minus_di[i] = mdi;
        let sum = pdi + mdi;
        dx[i] = if sum == 0.0 {
            0.0
        } else {
            100.0 * (pdi - mdi).abs() / sum
        };
    }

    DirectionalSeries {
        plus_di,
        minus_di,
        adx: wilder_smooth(&dx, period),
    }
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            AdxLine::Adx => 2 * self.period - 1,
            AdxLine::PlusDi | AdxLine::MinusDi => self.period,
        }
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let series = directional_series(bars, self.period);
        match self.line {
            AdxLine::Adx => series.adx,
            AdxLine::PlusDi => series.plus_di,
            AdxLine::MinusDi => series.minus_di,
        }
    }
}
