//! MACD: Moving Average Convergence/Divergence.
//!
//! - Line: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(line, signal)
//! - Histogram: line - signal
//!
//! Lookback: slow - 1 for the line, slow + signal - 2 for signal and histogram.

use super::ema::ema_of_series;
use super::{closes, Indicator};
use crate::domain::PriceBar;

/// Which MACD output to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    fn with_line(fast: usize, slow: usize, signal: usize, line: MacdLine, label: &str) -> Self {
        assert!(
            fast >= 1 && slow >= 1 && signal >= 1,
            "MACD periods must be >= 1"
        );
        assert!(fast < slow, "MACD fast period must be shorter than slow");
        Self {
            fast,
            slow,
            signal,
            line,
            name: format!("macd_{label}_{fast}_{slow}_{signal}"),
        }
    }

    pub fn line(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_line(fast, slow, signal, MacdLine::Line, "line")
    }

    pub fn signal(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_line(fast, slow, signal, MacdLine::Signal, "signal")
    }

    pub fn histogram(fast: usize, slow: usize, signal: usize) -> Self {
        Self::with_line(fast, slow, signal, MacdLine::Histogram, "histogram")
    }
}

/// Line, signal and histogram in one pass.
pub(crate) fn macd_series(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let fast_ema = ema_of_series(closes, fast);
    let slow_ema = ema_of_series(closes, slow);
    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema_of_series(&line, signal);
    let histogram = line.iter().zip(&signal_line).map(|(l, s)| l - s).collect();
    (line, signal_line, histogram)
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            MacdLine::Line => self.slow - 1,
            MacdLine::Signal | MacdLine::Histogram => self.slow + self.signal - 2,
        }
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let (line, signal, histogram) =
            macd_series(&closes(bars), self.fast, self.slow, self.signal);
        match self.line {
            MacdLine::Line => line,
            MacdLine::Signal => signal,
            MacdLine::Histogram => histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, Ema, DEFAULT_EPSILON};

    fn ramp(n: usize) -> Vec<PriceBar> {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        make_bars(&closes)
    }

    #[test]
    fn macd_line_is_ema_difference() {
        let bars = make_bars(&[10.0, 12.0, 11.0, 13.0, 15.0, 14.0, 16.0, 18.0]);
        let line = Macd::line(2, 4, 3).compute(&bars);
        let fast = Ema::new(2).compute(&bars);
        let slow = Ema::new(4).compute(&bars);
        for i in 3..bars.len() {
            assert_approx(line[i], fast[i] - slow[i], DEFAULT_EPSILON);
        }
        assert!(line[2].is_nan());
    }

    #[test]
    fn warmup_matches_lookback() {
        let bars = ramp(20);
        for macd in [
            Macd::line(3, 6, 4),
            Macd::signal(3, 6, 4),
            Macd::histogram(3, 6, 4),
        ] {
            let values = macd.compute(&bars);
            let lb = macd.lookback();
            assert!(values[lb - 1].is_nan(), "{} valid too early", macd.name());
            assert!(!values[lb].is_nan(), "{} not valid at lookback", macd.name());
        }
    }

    #[test]
    fn linear_ramp_converges_to_constant_gap() {
        // On a linear ramp both EMAs lag by a fixed amount, so the line
        // converges and the histogram tends to zero.
        let bars = ramp(200);
        let line = Macd::line(12, 26, 9).latest(&bars);
        let hist = Macd::histogram(12, 26, 9).latest(&bars);
        // lag(EMA n) on slope 1 = (n - 1) / 2
        assert_approx(line, 12.5 - 5.5, 1e-6);
        assert_approx(hist, 0.0, 1e-6);
    }

    #[test]
    fn histogram_is_line_minus_signal() {
        let bars = make_bars(&[10.0, 12.0, 11.0, 13.0, 15.0, 14.0, 16.0, 18.0, 17.0, 19.0]);
        let line = Macd::line(2, 4, 3).compute(&bars);
        let signal = Macd::signal(2, 4, 3).compute(&bars);
        let hist = Macd::histogram(2, 4, 3).compute(&bars);
        for i in 5..bars.len() {
            assert_approx(hist[i], line[i] - signal[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    #[should_panic(expected = "shorter than slow")]
    fn fast_must_be_shorter() {
        Macd::line(26, 12, 9);
    }
}
