//! RegimeLab Runner: portfolio aggregation, ranking, summaries, run
//! configuration and CSV loading.
//!
//! This crate builds on `regimelab-core` to provide:
//! - Portfolio aggregator evaluating tickers in parallel with failure isolation
//! - Deterministic ranking (confidence descending, ticker ascending)
//! - Signal summary with top picks
//! - TOML run configuration
//! - CSV series loader for local OHLCV files

pub mod config;
pub mod data_loader;
pub mod portfolio;
pub mod ranking;
pub mod summary;

pub use config::{ConfigFileError, RunConfig, RunnerSettings};
pub use data_loader::{load_csv, load_dir, read_series, LoadError};
pub use portfolio::{generate_portfolio_signals, PortfolioAggregator, PortfolioRun, SkippedTicker};
pub use ranking::{rank_order, rank_signals};
pub use summary::{SignalSummary, TopPick};
