//! Daily OHLCV bar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ticker's prices and volume for one session. The engine only reads bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceBar {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// True range against the previous bar's close. NaN when any input is NaN.
    pub fn true_range(&self, prev_close: f64) -> f64 {
        if self.high.is_nan() || self.low.is_nan() || prev_close.is_nan() {
            return f64::NAN;
        }
        (self.high - self.low)
            .max((self.high - prev_close).abs())
            .max((self.low - prev_close).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar(high: f64, low: f64, close: f64) -> PriceBar {
        let ts = Utc.with_ymd_and_hms(2024, 3, 4, 21, 0, 0).unwrap();
        PriceBar::new(ts, close, high, low, close, 12_000.0)
    }

    #[test]
    fn true_range_picks_the_widest_leg() {
        // inside day: plain high - low
        assert_eq!(bar(105.0, 98.0, 103.0).true_range(100.0), 7.0);
        // gap up over the previous close
        assert_eq!(bar(120.0, 115.0, 118.0).true_range(105.0), 15.0);
        // gap down under the previous close
        assert_eq!(bar(92.0, 90.0, 91.0).true_range(100.0), 10.0);
    }

    #[test]
    fn true_range_nan_inputs() {
        assert!(bar(105.0, 98.0, 103.0).true_range(f64::NAN).is_nan());
        assert!(bar(f64::NAN, 98.0, 103.0).true_range(100.0).is_nan());
    }

    #[test]
    fn serializes_with_rfc3339_timestamp() {
        let json = serde_json::to_string(&bar(105.0, 98.0, 103.0)).unwrap();
        assert!(json.contains("\"timestamp\":\"2024-03-04T21:00:00Z\""));
        let back: PriceBar = serde_json::from_str(&json).unwrap();
        assert_eq!(back.high, 105.0);
    }
}
