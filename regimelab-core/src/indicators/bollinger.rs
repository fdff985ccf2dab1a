//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! Four lines (separate Indicator instances):
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//! - Position: (close - lower) / (upper - lower), 0.5 when the band has no width
//!
//! Uses sample stddev (divide by N-1).
//! Lookback: period - 1.

use super::Indicator;
use crate::domain::PriceBar;

/// Band widths at or below this are treated as zero.
pub const MIN_BAND_WIDTH: f64 = 1e-10;

/// Which line of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
    Position,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    fn with_band(period: usize, multiplier: f64, band: BollingerBand, label: &str) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self {
            period,
            multiplier,
            band,
            name: format!("bollinger_{label}_{period}_{multiplier}"),
        }
    }

    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Upper, "upper")
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Middle, "middle")
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Lower, "lower")
    }

    /// Normalized position of the close within the bands.
    pub fn position(period: usize, multiplier: f64) -> Self {
        Self::with_band(period, multiplier, BollingerBand::Position, "position")
    }
}

/// Rolling sample standard deviation. Windows containing NaN yield NaN;
/// a period of 1 has no sample deviation and yields 0.
pub fn rolling_std(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        if period == 1 {
            result[i] = 0.0;
            continue;
        }
        let mean = window.iter().sum::<f64>() / period as f64;
        let ss: f64 = window.iter().map(|v| (v - mean) * (v - mean)).sum();
        result[i] = (ss / (period - 1) as f64).sqrt();
    }

    result
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let closes = super::closes(bars);
        let middle = super::sma::sma_of_series(&closes, self.period);
        if self.band == BollingerBand::Middle {
            return middle;
        }

        let std = rolling_std(&closes, self.period);
        middle
            .iter()
            .zip(&std)
            .zip(&closes)
            .map(|((&mid, &sd), &close)| {
                let upper = mid + self.multiplier * sd;
                let lower = mid - self.multiplier * sd;
                match self.band {
                    BollingerBand::Upper => upper,
                    BollingerBand::Lower => lower,
                    BollingerBand::Middle => mid,
                    BollingerBand::Position => {
                        let width = upper - lower;
                        if width.is_nan() || close.is_nan() {
                            f64::NAN
                        } else if width <= MIN_BAND_WIDTH {
                            0.5
                        } else {
                            (close - lower) / width
                        }
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn bollinger_middle_is_sma() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let result = Bollinger::middle(3, 2.0).compute(&bars);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_uses_sample_stddev() {
        // Window (10, 11, 12): sample variance = 1.0
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let upper = Bollinger::upper(3, 2.0).compute(&bars);
        let lower = Bollinger::lower(3, 2.0).compute(&bars);
        assert_approx(upper[2], 13.0, DEFAULT_EPSILON);
        assert_approx(lower[2], 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_bands_symmetric() {
        let bars = make_bars(&[10.0, 11.5, 12.0, 12.5, 14.0]);
        let upper = Bollinger::upper(3, 2.0).compute(&bars);
        let middle = Bollinger::middle(3, 2.0).compute(&bars);
        let lower = Bollinger::lower(3, 2.0).compute(&bars);

        for i in 2..5 {
            let half_width = upper[i] - middle[i];
            assert_approx(middle[i] - lower[i], half_width, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn position_of_close_within_band() {
        // close 12 against bands 9..13 → 0.75
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let pos = Bollinger::position(3, 2.0).compute(&bars);
        assert_approx(pos[2], 0.75, DEFAULT_EPSILON);
    }

    #[test]
    fn position_constant_price_is_midpoint() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0]);
        let upper = Bollinger::upper(3, 2.0).compute(&bars);
        let pos = Bollinger::position(3, 2.0).compute(&bars);
        assert_approx(upper[2], 100.0, DEFAULT_EPSILON);
        assert_approx(pos[3], 0.5, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_nan_propagation() {
        let mut bars = make_bars(&[10.0, 11.0, 12.0, 13.0]);
        bars[2].close = f64::NAN;
        let result = Bollinger::upper(3, 2.0).compute(&bars);
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
    }

    #[test]
    fn bollinger_lookback() {
        assert_eq!(Bollinger::upper(20, 2.0).lookback(), 19);
        assert_eq!(Bollinger::position(20, 2.0).name(), "bollinger_position_20_2");
    }
}
