//! Williams %R.
//!
//! %R = -100 * (HH(n) - close) / (HH(n) - LL(n)), in [-100, 0].
//! A flat range reads -50.
//! Lookback: period - 1.

use super::{rolling_max, rolling_min, Indicator};
use crate::domain::PriceBar;

#[derive(Debug, Clone)]
pub struct WilliamsR {
    period: usize,
    name: String,
}

impl WilliamsR {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Williams %R period must be >= 1");
        Self {
            period,
            name: format!("williams_r_{period}"),
        }
    }
}

impl Indicator for WilliamsR {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let hh = rolling_max(bars, self.period);
        let ll = rolling_min(bars, self.period);
        bars.iter()
            .enumerate()
            .map(|(i, bar)| {
                let range = hh[i] - ll[i];
                if range.is_nan() || bar.close.is_nan() {
                    f64::NAN
                } else if range == 0.0 {
                    -50.0
                } else {
                    -100.0 * (hh[i] - bar.close) / range
                }
            })
            .collect()
    }
}
