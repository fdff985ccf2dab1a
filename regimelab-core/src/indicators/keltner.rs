//! Keltner Channel: SMA +/- mean true range multiplier.
//!
//! Three bands (separate Indicator instances):
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * mean(TR, period)
//! - Lower: middle - mult * mean(TR, period)
//!
//! This is the channel the squeeze detector compares Bollinger Bands against.
//! Lookback: period.

use super::atr::true_range;
use super::sma::sma_of_series;
use super::{closes, Indicator};
use crate::domain::PriceBar;

/// Which band of the Keltner Channel to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeltnerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Keltner {
    period: usize,
    multiplier: f64,
    band: KeltnerBand,
    name: String,
}

impl Keltner {
    fn with_band(period: usize, multiplier: f64, band: KeltnerBand, label: &str) -> Self {
        assert!(period >= 1, "Keltner period must be >= 1");
        Self {
            period,
            multiplier,
            band,
            name: format!("keltner_{label}_{period}_{multiplier}"),
        }
    }

    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, KeltnerBand::Upper, "upper")
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, KeltnerBand::Middle, "middle")
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, KeltnerBand::Lower, "lower")
    }
}

impl Indicator for Keltner {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.band {
            KeltnerBand::Middle => self.period - 1,
            KeltnerBand::Upper | KeltnerBand::Lower => self.period,
        }
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let middle = sma_of_series(&closes(bars), self.period);
        if self.band == KeltnerBand::Middle {
            return middle;
        }

        let range = sma_of_series(&true_range(bars), self.period);
        let sign = match self.band {
            KeltnerBand::Upper => 1.0,
            _ => -1.0,
        };
        middle
            .iter()
            .zip(&range)
            .map(|(&mid, &tr)| mid + sign * self.multiplier * tr)
            .collect()
    }
}
