//! Composite scores built from the oscillators.
//!
//! Momentum (roughly -50..=50, positive = bullish):
//!   0.3 * (RSI - 50) + 0.3 * (+25 if MACD > signal else -25)
//!   + 0.2 * (%K - 50) + 0.2 * (%R + 50)
//!
//! Mean reversion (roughly -50..=50, positive = stretched to the downside,
//! i.e. a long reversion candidate):
//!   0.4 * (50 - 100 * BB position) + 0.4 * clip(-25 * z, ±50)
//!   + 0.2 * clip(2.5 * RSI excess, ±50)
//! where the RSI excess is (30 - RSI) when oversold, -(RSI - 70) when
//! overbought, and 0 otherwise.

use super::bollinger::rolling_std;
use super::macd::macd_series;
use super::rsi::rsi_of_series;
use super::sma::sma_of_series;
use super::stochastic::percent_k;
use super::{closes, Bollinger, Indicator, WilliamsR};
use crate::domain::PriceBar;

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;

/// Combine the latest oscillator readings into the momentum score.
pub fn momentum_score(rsi: f64, macd: f64, macd_signal: f64, stoch_k: f64, williams_r: f64) -> f64 {
    if [rsi, macd, macd_signal, stoch_k, williams_r]
        .iter()
        .any(|v| v.is_nan())
    {
        return f64::NAN;
    }
    let macd_vote = if macd > macd_signal { 25.0 } else { -25.0 };
    0.3 * (rsi - 50.0) + 0.3 * macd_vote + 0.2 * (stoch_k - 50.0) + 0.2 * (williams_r + 50.0)
}

/// Combine band position, z-score and RSI into the mean-reversion score.
pub fn mean_reversion_score(bb_position: f64, z_score: f64, rsi: f64) -> f64 {
    if bb_position.is_nan() || z_score.is_nan() || rsi.is_nan() {
        return f64::NAN;
    }
    let band = 50.0 - 100.0 * bb_position;
    let z = (-25.0 * z_score).clamp(-50.0, 50.0);
    let excess = if rsi < RSI_OVERSOLD {
        RSI_OVERSOLD - rsi
    } else if rsi > RSI_OVERBOUGHT {
        -(rsi - RSI_OVERBOUGHT)
    } else {
        0.0
    };
    0.4 * band + 0.4 * z + 0.2 * (2.5 * excess).clamp(-50.0, 50.0)
}

/// (close - mean) / std, 0 when the window has no dispersion.
pub fn z_score(close: f64, mean: f64, std: f64) -> f64 {
    if close.is_nan() || mean.is_nan() || std.is_nan() {
        f64::NAN
    } else if std == 0.0 {
        0.0
    } else {
        (close - mean) / std
    }
}

#[derive(Debug, Clone)]
pub struct CompositeMomentum {
    rsi_period: usize,
    macd: (usize, usize, usize),
    stoch_period: usize,
    williams_period: usize,
    name: String,
}

impl CompositeMomentum {
    pub fn new(
        rsi_period: usize,
        macd: (usize, usize, usize),
        stoch_period: usize,
        williams_period: usize,
    ) -> Self {
        assert!(
            rsi_period >= 1 && stoch_period >= 1 && williams_period >= 1,
            "composite momentum periods must be >= 1"
        );
        Self {
            rsi_period,
            macd,
            stoch_period,
            williams_period,
            name: "composite_momentum".to_string(),
        }
    }

    /// RSI 14, MACD 12/26/9, Stochastic 14, Williams 14.
    pub fn standard() -> Self {
        Self::new(14, (12, 26, 9), 14, 14)
    }
}

impl Indicator for CompositeMomentum {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        let (_, slow, signal) = self.macd;
        self.rsi_period
            .max(slow + signal - 2)
            .max(self.stoch_period - 1)
            .max(self.williams_period - 1)
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let closes = closes(bars);
        let (fast, slow, signal) = self.macd;
        let rsi = rsi_of_series(&closes, self.rsi_period);
        let (line, signal_line, _) = macd_series(&closes, fast, slow, signal);
        let k = percent_k(bars, self.stoch_period);
        let wr = WilliamsR::new(self.williams_period).compute(bars);
        (0..bars.len())
            .map(|i| momentum_score(rsi[i], line[i], signal_line[i], k[i], wr[i]))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct MeanReversionScore {
    bb_period: usize,
    bb_multiplier: f64,
    rsi_period: usize,
    name: String,
}

impl MeanReversionScore {
    pub fn new(bb_period: usize, bb_multiplier: f64, rsi_period: usize) -> Self {
        assert!(
            bb_period >= 2 && rsi_period >= 1,
            "mean reversion needs a band period >= 2 and RSI period >= 1"
        );
        Self {
            bb_period,
            bb_multiplier,
            rsi_period,
            name: "mean_reversion_score".to_string(),
        }
    }

    /// Bollinger 20/2, RSI 14.
    pub fn standard() -> Self {
        Self::new(20, 2.0, 14)
    }
}

impl Indicator for MeanReversionScore {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        (self.bb_period - 1).max(self.rsi_period)
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let closes = closes(bars);
        let position = Bollinger::position(self.bb_period, self.bb_multiplier).compute(bars);
        let mean = sma_of_series(&closes, self.bb_period);
        let std = rolling_std(&closes, self.bb_period);
        let rsi = rsi_of_series(&closes, self.rsi_period);
        (0..bars.len())
            .map(|i| {
                let z = z_score(closes[i], mean[i], std[i]);
                mean_reversion_score(position[i], z, rsi[i])
            })
            .collect()
    }
}
