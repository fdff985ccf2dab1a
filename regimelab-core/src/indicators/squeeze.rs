//! TTM-style squeeze.
//!
//! - On: 1.0 while the Bollinger Bands sit strictly inside the Keltner
//!   Channel, else 0.0.
//! - Momentum: close - (midpoint(HH, LL) + SMA(close)) / 2 over the Keltner period.
//!
//! Reported in the snapshot; no condition reads it.

use super::sma::sma_of_series;
use super::{closes, rolling_max, rolling_min, Bollinger, Indicator, Keltner};
use crate::domain::PriceBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqueezeLine {
    On,
    Momentum,
}

#[derive(Debug, Clone)]
pub struct Squeeze {
    bb_period: usize,
    bb_multiplier: f64,
    kc_period: usize,
    kc_multiplier: f64,
    line: SqueezeLine,
    name: String,
}

impl Squeeze {
    fn with_line(
        bb: (usize, f64),
        kc: (usize, f64),
        line: SqueezeLine,
        label: &str,
    ) -> Self {
        assert!(bb.0 >= 1 && kc.0 >= 1, "squeeze periods must be >= 1");
        Self {
            bb_period: bb.0,
            bb_multiplier: bb.1,
            kc_period: kc.0,
            kc_multiplier: kc.1,
            line,
            name: format!("squeeze_{label}_{}_{}", bb.0, kc.0),
        }
    }

    /// `bb` and `kc` are (period, multiplier) pairs.
    pub fn on(bb: (usize, f64), kc: (usize, f64)) -> Self {
        Self::with_line(bb, kc, SqueezeLine::On, "on")
    }

    pub fn momentum(bb: (usize, f64), kc: (usize, f64)) -> Self {
        Self::with_line(bb, kc, SqueezeLine::Momentum, "momentum")
    }
}

impl Indicator for Squeeze {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            SqueezeLine::On => (self.bb_period - 1).max(self.kc_period),
            SqueezeLine::Momentum => self.kc_period - 1,
        }
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        match self.line {
            SqueezeLine::On => {
                let bb_upper = Bollinger::upper(self.bb_period, self.bb_multiplier).compute(bars);
                let bb_lower = Bollinger::lower(self.bb_period, self.bb_multiplier).compute(bars);
                let kc_upper = Keltner::upper(self.kc_period, self.kc_multiplier).compute(bars);
                let kc_lower = Keltner::lower(self.kc_period, self.kc_multiplier).compute(bars);
                (0..bars.len())
                    .map(|i| {
                        let levels = [bb_upper[i], bb_lower[i], kc_upper[i], kc_lower[i]];
                        if levels.iter().any(|v| v.is_nan()) {
                            f64::NAN
                        } else if bb_lower[i] > kc_lower[i] && bb_upper[i] < kc_upper[i] {
                            1.0
                        } else {
                            0.0
                        }
                    })
                    .collect()
            }
            SqueezeLine::Momentum => {
                let hh = rolling_max(bars, self.kc_period);
                let ll = rolling_min(bars, self.kc_period);
                let closes = closes(bars);
                let sma = sma_of_series(&closes, self.kc_period);
                (0..bars.len())
                    .map(|i| closes[i] - ((hh[i] + ll[i]) / 2.0 + sma[i]) / 2.0)
                    .collect()
            }
        }
    }
}
