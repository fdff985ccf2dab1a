//! Per-ticker evaluation errors.
//!
//! All three are recoverable at the portfolio level: the aggregator logs
//! them and drops the ticker.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    #[error("insufficient data: {bars} bars < required {required}")]
    InsufficientData { bars: usize, required: usize },

    #[error("degenerate volatility: ATR is {atr}, cannot place stop and target")]
    DegenerateVolatility { atr: f64 },

    #[error("invalid entry price: {price}")]
    InvalidEntryPrice { price: f64 },
}

impl SignalError {
    /// Short machine-friendly label, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            SignalError::InsufficientData { .. } => "insufficient_data",
            SignalError::DegenerateVolatility { .. } => "degenerate_volatility",
            SignalError::InvalidEntryPrice { .. } => "invalid_entry_price",
        }
    }
}
