//! Directional signal labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction implied by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// +1.0 for long, -1.0 for short.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

/// Closed set of actionable signal types. "No signal" is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    Buy,
    Sell,
    StrongBuy,
    StrongSell,
}

impl SignalType {
    pub fn new(direction: Direction, strong: bool) -> Self {
        match (direction, strong) {
            (Direction::Long, false) => SignalType::Buy,
            (Direction::Long, true) => SignalType::StrongBuy,
            (Direction::Short, false) => SignalType::Sell,
            (Direction::Short, true) => SignalType::StrongSell,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            SignalType::Buy | SignalType::StrongBuy => Direction::Long,
            SignalType::Sell | SignalType::StrongSell => Direction::Short,
        }
    }

    pub fn is_strong(self) -> bool {
        matches!(self, SignalType::StrongBuy | SignalType::StrongSell)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignalType::Buy => "BUY",
            SignalType::Sell => "SELL",
            SignalType::StrongBuy => "STRONG_BUY",
            SignalType::StrongSell => "STRONG_SELL",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_round_trips_direction_and_strength() {
        for direction in [Direction::Long, Direction::Short] {
            for strong in [false, true] {
                let st = SignalType::new(direction, strong);
                assert_eq!(st.direction(), direction);
                assert_eq!(st.is_strong(), strong);
            }
        }
    }

    #[test]
    fn labels_match_wire_format() {
        assert_eq!(SignalType::StrongBuy.to_string(), "STRONG_BUY");
        let json = serde_json::to_string(&SignalType::StrongSell).unwrap();
        assert_eq!(json, "\"STRONG_SELL\"");
    }
}
