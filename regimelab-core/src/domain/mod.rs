//! Domain types for RegimeLab

pub mod bar;
pub mod regime;
pub mod series;
pub mod signal_type;

pub use bar::PriceBar;
pub use regime::{MarketRegime, VolatilityRegime};
pub use series::{PriceSeries, SeriesError};
pub use signal_type::{Direction, SignalType};

/// Ticker symbol alias
pub type Ticker = String;
