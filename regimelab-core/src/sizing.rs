//! ATR position sizer.
//!
//! # Formula
//! ```text
//! stop_distance = volatility_factor * ATR
//! long:  stop = entry - stop_distance, target = entry + 2 * stop_distance
//! short: stop = entry + stop_distance, target = entry - 2 * stop_distance
//! ```
//!
//! # Example
//! - Entry: 250, ATR: 10, factor: 2.0
//! - Long stop: 230, long target: 290

use serde::{Deserialize, Serialize};

use crate::domain::Direction;
use crate::error::SignalError;

/// Reward distance as a multiple of the stop distance.
pub const REWARD_MULTIPLE: f64 = 2.0;

/// Entry, stop and target for one trade idea.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevels {
    pub entry: f64,
    pub stop_loss: f64,
    pub target: f64,
}

impl PriceLevels {
    pub fn risk(&self) -> f64 {
        (self.entry - self.stop_loss).abs()
    }

    pub fn reward(&self) -> f64 {
        (self.target - self.entry).abs()
    }

    /// Reward over risk. Always `REWARD_MULTIPLE` for levels from the sizer.
    pub fn risk_reward(&self) -> f64 {
        self.reward() / self.risk()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSizer {
    volatility_factor: f64,
}

impl PositionSizer {
    /// `volatility_factor` is validated by `EngineConfig::validate`.
    pub fn new(volatility_factor: f64) -> Self {
        Self { volatility_factor }
    }

    pub fn volatility_factor(&self) -> f64 {
        self.volatility_factor
    }

    pub fn levels(
        &self,
        direction: Direction,
        entry: f64,
        atr: f64,
    ) -> Result<PriceLevels, SignalError> {
        if !entry.is_finite() || entry <= 0.0 {
            return Err(SignalError::InvalidEntryPrice { price: entry });
        }
        if !atr.is_finite() || atr <= 0.0 {
            return Err(SignalError::DegenerateVolatility { atr });
        }

        let distance = self.volatility_factor * atr;
        let sign = direction.sign();
        let levels = PriceLevels {
            entry,
            stop_loss: entry - sign * distance,
            target: entry + sign * REWARD_MULTIPLE * distance,
        };
        // ATR far below the entry's float resolution rounds back onto the entry.
        if !levels.stop_loss.is_finite()
            || !levels.target.is_finite()
            || levels.stop_loss == entry
            || levels.target == entry
        {
            return Err(SignalError::DegenerateVolatility { atr });
        }
        Ok(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_levels() {
        let levels = PositionSizer::new(2.0)
            .levels(Direction::Long, 250.0, 10.0)
            .unwrap();
        assert_eq!(levels.stop_loss, 230.0);
        assert_eq!(levels.target, 290.0);
        assert_eq!(levels.risk_reward(), 2.0);
    }

    #[test]
    fn short_levels_are_mirrored() {
        let levels = PositionSizer::new(2.0)
            .levels(Direction::Short, 250.0, 10.0)
            .unwrap();
        assert_eq!(levels.stop_loss, 270.0);
        assert_eq!(levels.target, 210.0);
        assert!(levels.target < levels.entry && levels.entry < levels.stop_loss);
    }

    #[test]
    fn fractional_factor() {
        let levels = PositionSizer::new(1.5)
            .levels(Direction::Long, 425.0, 8.5)
            .unwrap();
        assert!((levels.stop_loss - 412.25).abs() < 1e-9);
        assert!((levels.target - 450.5).abs() < 1e-9);
    }

    #[test]
    fn degenerate_atr_is_rejected() {
        let sizer = PositionSizer::new(2.0);
        for atr in [0.0, -1.0] {
            assert_eq!(
                sizer.levels(Direction::Long, 100.0, atr),
                Err(SignalError::DegenerateVolatility { atr })
            );
        }
        assert!(matches!(
            sizer.levels(Direction::Short, 100.0, f64::NAN),
            Err(SignalError::DegenerateVolatility { .. })
        ));
    }

    #[test]
    fn bad_entry_is_rejected() {
        let sizer = PositionSizer::new(2.0);
        assert!(matches!(
            sizer.levels(Direction::Long, f64::NAN, 1.0),
            Err(SignalError::InvalidEntryPrice { .. })
        ));
        assert_eq!(
            sizer.levels(Direction::Long, 0.0, 1.0),
            Err(SignalError::InvalidEntryPrice { price: 0.0 })
        );
    }

    #[test]
    fn atr_below_price_resolution_is_degenerate() {
        let sizer = PositionSizer::new(2.0);
        for direction in [Direction::Long, Direction::Short] {
            assert_eq!(
                sizer.levels(direction, 1e9, 1e-9),
                Err(SignalError::DegenerateVolatility { atr: 1e-9 })
            );
        }
        // small but representable distances still size
        let levels = sizer.levels(Direction::Long, 1e9, 1e-3).unwrap();
        assert!(levels.stop_loss < levels.entry && levels.entry < levels.target);
    }
}
