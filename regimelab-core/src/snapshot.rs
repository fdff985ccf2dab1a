//! IndicatorSnapshot: the latest value of every indicator for one ticker.
//!
//! A fixed-field struct rather than a name → value map, so every consumer
//! (regime classifier, checklists, confidence scorer, sizer) reads typed
//! fields. Serializable so a persistence layer can store it alongside the
//! signal it produced.

use serde::{Deserialize, Serialize};

use crate::config::{IndicatorParams, RegimeParams};
use crate::domain::{PriceBar, VolatilityRegime};
use crate::indicators::adx::directional_series;
use crate::indicators::bollinger::rolling_std;
use crate::indicators::composite::{mean_reversion_score, momentum_score, z_score};
use crate::indicators::macd::macd_series;
use crate::indicators::{
    closes, Atr, Bollinger, Ema, Indicator, Rsi, Sma, Squeeze, Stochastic, WilliamsR,
};
use crate::regime::{
    classify_volatility, hurst_exponent, realized_volatility, trend_strength, RegimeInputs,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub volume: f64,

    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,

    pub bb_upper: f64,
    pub bb_middle: f64,
    pub bb_lower: f64,
    /// (close - lower) / (upper - lower); 0.5 for a zero-width band.
    pub bb_position: f64,

    pub atr: f64,
    pub adx: f64,
    pub plus_di: f64,
    pub minus_di: f64,

    pub stoch_k: f64,
    pub stoch_d: f64,
    pub williams_r: f64,

    pub sma_short: f64,
    pub sma_long: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,

    pub volume_sma: f64,
    /// Latest volume over its moving average; 1.0 when the average is zero.
    pub volume_ratio: f64,

    pub momentum_score: f64,
    pub mean_reversion_score: f64,

    pub hurst: f64,
    pub trend_strength: f64,
    pub volatility_short: f64,
    pub volatility_long: f64,
    pub volatility_regime: VolatilityRegime,

    pub squeeze_on: bool,
    pub squeeze_momentum: f64,
}

impl IndicatorSnapshot {
    /// Compute every indicator over `bars` and keep the last values.
    ///
    /// Length is not checked here; fields still in warm-up are NaN. The
    /// engine rejects short series before calling this.
    pub fn compute(
        bars: &[PriceBar],
        params: &IndicatorParams,
        regime: &RegimeParams,
    ) -> Self {
        let closes = closes(bars);
        let last = |values: Vec<f64>| values.last().copied().unwrap_or(f64::NAN);
        let (close, volume) = bars
            .last()
            .map(|b| (b.close, b.volume))
            .unwrap_or((f64::NAN, f64::NAN));

        let rsi = Rsi::new(params.rsi_period).latest(bars);

        let (line, signal, histogram) =
            macd_series(&closes, params.macd_fast, params.macd_slow, params.macd_signal);
        let (macd, macd_signal, macd_histogram) = (last(line), last(signal), last(histogram));

        let (bb_period, bb_std) = (params.bollinger_period, params.bollinger_std);
        let bb_upper = Bollinger::upper(bb_period, bb_std).latest(bars);
        let bb_middle = Bollinger::middle(bb_period, bb_std).latest(bars);
        let bb_lower = Bollinger::lower(bb_period, bb_std).latest(bars);
        let bb_position = Bollinger::position(bb_period, bb_std).latest(bars);
        let bb_sd = last(rolling_std(&closes, bb_period));

        let directional = directional_series(bars, params.adx_period);

        let stoch_k = Stochastic::k(params.stochastic_k, params.stochastic_d).latest(bars);
        let stoch_d = Stochastic::d(params.stochastic_k, params.stochastic_d).latest(bars);
        let williams_r = WilliamsR::new(params.williams_period).latest(bars);

        let volume_sma = Sma::volume(params.volume_sma_period).latest(bars);
        let volume_ratio = if volume_sma > 0.0 {
            volume / volume_sma
        } else if volume_sma == 0.0 {
            1.0
        } else {
            f64::NAN
        };

        let volatility_short = realized_volatility(&closes, params.volatility_short);
        let volatility_long = realized_volatility(&closes, params.volatility_long);

        let keltner = (bb_period, params.keltner_multiplier);
        let squeeze_on = Squeeze::on((bb_period, bb_std), keltner).latest(bars) == 1.0;
        let squeeze_momentum = Squeeze::momentum((bb_period, bb_std), keltner).latest(bars);

        Self {
            close,
            volume,
            rsi,
            macd,
            macd_signal,
            macd_histogram,
            bb_upper,
            bb_middle,
            bb_lower,
            bb_position,
            atr: Atr::new(params.atr_period).latest(bars),
            adx: last(directional.adx),
            plus_di: last(directional.plus_di),
            minus_di: last(directional.minus_di),
            stoch_k,
            stoch_d,
            williams_r,
            sma_short: Sma::new(params.sma_short).latest(bars),
            sma_long: Sma::new(params.sma_long).latest(bars),
            ema_fast: Ema::new(params.macd_fast).latest(bars),
            ema_slow: Ema::new(params.macd_slow).latest(bars),
            volume_sma,
            volume_ratio,
            momentum_score: momentum_score(rsi, macd, macd_signal, stoch_k, williams_r),
            mean_reversion_score: mean_reversion_score(
                bb_position,
                z_score(close, bb_middle, bb_sd),
                rsi,
            ),
            hurst: hurst_exponent(&closes, params.hurst_window, params.hurst_max_lag),
            trend_strength: trend_strength(&closes, params.trend_window),
            volatility_short,
            volatility_long,
            volatility_regime: classify_volatility(volatility_short, volatility_long, regime),
            squeeze_on,
            squeeze_momentum,
        }
    }

    pub fn regime_inputs(&self) -> RegimeInputs {
        RegimeInputs {
            hurst: self.hurst,
            trend_strength: self.trend_strength,
            sma_short: self.sma_short,
            sma_long: self.sma_long,
            volatility_regime: self.volatility_regime,
        }
    }
}
