//! Stochastic Oscillator.
//!
//! %K = 100 * (close - LL(k)) / (HH(k) - LL(k)), 50 when the range is flat.
//! %D = SMA(%K, d).
//! Lookback: k - 1 for %K, k + d - 2 for %D.

use super::sma::sma_of_series;
use super::{rolling_max, rolling_min, Indicator};
use crate::domain::PriceBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochasticLine {
    K,
    D,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
    line: StochasticLine,
    name: String,
}

impl Stochastic {
    pub fn k(k_period: usize, d_period: usize) -> Self {
        assert!(k_period >= 1 && d_period >= 1, "Stochastic periods must be >= 1");
        Self {
            k_period,
            d_period,
            line: StochasticLine::K,
            name: format!("stoch_k_{k_period}"),
        }
    }

    pub fn d(k_period: usize, d_period: usize) -> Self {
        assert!(k_period >= 1 && d_period >= 1, "Stochastic periods must be >= 1");
        Self {
            k_period,
            d_period,
            line: StochasticLine::D,
            name: format!("stoch_d_{k_period}_{d_period}"),
        }
    }
}

pub(crate) fn percent_k(bars: &[PriceBar], period: usize) -> Vec<f64> {
    let hh = rolling_max(bars, period);
    let ll = rolling_min(bars, period);
    bars.iter()
        .zip(hh.iter().zip(&ll))
        .map(|(bar, (&high, &low))| {
            let range = high - low;
            if range.is_nan() || bar.close.is_nan() {
                f64::NAN
            } else if range == 0.0 {
                50.0
            } else {
                100.0 * (bar.close - low) / range
            }
        })
        .collect()
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            StochasticLine::K => self.k_period - 1,
            StochasticLine::D => self.k_period + self.d_period - 2,
        }
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let k = percent_k(bars, self.k_period);
        match self.line {
            StochasticLine::K => k,
            StochasticLine::D => sma_of_series(&k, self.d_period),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_bars, DEFAULT_EPSILON};

    fn bars() -> Vec<PriceBar> {
        make_ohlc_bars(&[
            (10.0, 12.0, 8.0, 11.0),
            (11.0, 14.0, 10.0, 13.0),
            (13.0, 15.0, 12.0, 14.0),
            (14.0, 14.5, 9.0, 10.0),
            (10.0, 13.0, 10.0, 12.0),
        ])
    }

    #[test]
    fn percent_k_basic() {
        let k = Stochastic::k(3, 3).compute(&bars());
        assert!(k[1].is_nan());
        // [2]: HH 15, LL 8, close 14 → 600/7
        assert_approx(k[2], 600.0 / 7.0, DEFAULT_EPSILON);
        // [3]: HH 15, LL 9, close 10 → 100/6
        assert_approx(k[3], 100.0 / 6.0, DEFAULT_EPSILON);
        // [4]: HH 15, LL 9, close 12 → 50
        assert_approx(k[4], 50.0, DEFAULT_EPSILON);
    }

    #[test]
    fn percent_d_is_sma_of_k() {
        let d = Stochastic::d(3, 3).compute(&bars());
        assert!(d[3].is_nan());
        let expected = (600.0 / 7.0 + 100.0 / 6.0 + 50.0) / 3.0;
        assert_approx(d[4], expected, DEFAULT_EPSILON);
    }

    #[test]
    fn flat_range_is_fifty() {
        let flat = make_ohlc_bars(&[(10.0, 10.0, 10.0, 10.0); 4]);
        let k = Stochastic::k(3, 3).compute(&flat);
        assert_approx(k[3], 50.0, DEFAULT_EPSILON);
    }

    #[test]
    fn stochastic_lookback() {
        assert_eq!(Stochastic::k(14, 3).lookback(), 13);
        assert_eq!(Stochastic::d(14, 3).lookback(), 15);
    }
}
