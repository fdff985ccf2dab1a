//! Portfolio aggregator: evaluate every ticker, keep the signals, rank them.
//!
//! Tickers are independent. Each one is evaluated on the rayon pool (or in
//! order when parallelism is off), the results are joined, and the surviving
//! signals are sorted by confidence descending with ties broken by ticker.
//! A ticker that fails evaluation is logged and left out; it never aborts
//! the batch.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use regimelab_core::{
    ConfigError, EngineConfig, PriceSeries, SignalEngine, SignalError, TradingSignal,
};

use crate::config::{RunConfig, RunnerSettings};
use crate::ranking::rank_signals;
use crate::summary::SignalSummary;

/// A ticker dropped from the batch, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: String,
    /// Machine label from `SignalError::kind`.
    pub kind: &'static str,
}

/// Outcome of one aggregator batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioRun {
    pub evaluated_at: DateTime<Utc>,
    /// Ranked signals.
    pub signals: Vec<TradingSignal>,
    /// Tickers whose evaluation failed, sorted by ticker.
    pub skipped: Vec<SkippedTicker>,
    /// Tickers that evaluated cleanly without a recommendation, sorted.
    pub no_signal: Vec<String>,
}

impl PortfolioRun {
    pub fn summary(&self, top_n: usize) -> SignalSummary {
        SignalSummary::from_signals(&self.signals, top_n)
    }

    /// Tickers seen in the batch.
    pub fn evaluated(&self) -> usize {
        self.signals.len() + self.skipped.len() + self.no_signal.len()
    }
}

enum TickerOutcome {
    Signal(TradingSignal),
    NoSignal(String),
    Skipped(SkippedTicker),
}

pub struct PortfolioAggregator {
    engine: SignalEngine,
    settings: RunnerSettings,
    pool: Option<rayon::ThreadPool>,
}

impl PortfolioAggregator {
    pub fn new(engine: SignalEngine) -> Self {
        Self {
            engine,
            settings: RunnerSettings::default(),
            pool: None,
        }
    }

    pub fn from_config(config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(SignalEngine::new(config)?))
    }

    /// Build from a run config, honouring its parallelism settings.
    pub fn from_run_config(config: &RunConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(SignalEngine::new(config.engine.clone())?).with_settings(config.runner.clone()))
    }

    /// Apply runner settings. A dedicated pool is built when a thread cap is
    /// set; if the pool cannot be built the global pool is used instead.
    pub fn with_settings(mut self, settings: RunnerSettings) -> Self {
        self.pool = match settings.threads {
            Some(threads) if settings.parallel && threads > 0 => {
                match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                    Ok(pool) => Some(pool),
                    Err(err) => {
                        warn!(threads, error = %err, "falling back to the global rayon pool");
                        None
                    }
                }
            }
            _ => None,
        };
        self.settings = settings;
        self
    }

    pub fn sequential(self) -> Self {
        let settings = RunnerSettings {
            parallel: false,
            ..self.settings.clone()
        };
        self.with_settings(settings)
    }

    pub fn engine(&self) -> &SignalEngine {
        &self.engine
    }

    pub fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    /// Ranked signals for every ticker that produced one.
    pub fn generate_portfolio_signals(
        &self,
        data: &HashMap<String, PriceSeries>,
    ) -> Vec<TradingSignal> {
        self.run_at(data, Utc::now()).signals
    }

    /// Evaluate the batch with one shared evaluation timestamp.
    pub fn run_at(
        &self,
        data: &HashMap<String, PriceSeries>,
        evaluated_at: DateTime<Utc>,
    ) -> PortfolioRun {
        let outcomes = self.evaluate_all(data, evaluated_at);

        let mut signals = Vec::new();
        let mut skipped = Vec::new();
        let mut no_signal = Vec::new();
        for outcome in outcomes {
            match outcome {
                TickerOutcome::Signal(signal) => signals.push(signal),
                TickerOutcome::NoSignal(ticker) => no_signal.push(ticker),
                TickerOutcome::Skipped(skip) => skipped.push(skip),
            }
        }

        rank_signals(&mut signals);
        skipped.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        no_signal.sort();

        info!(
            tickers = data.len(),
            signals = signals.len(),
            no_signal = no_signal.len(),
            skipped = skipped.len(),
            "portfolio evaluation complete"
        );

        PortfolioRun {
            evaluated_at,
            signals,
            skipped,
            no_signal,
        }
    }

    fn evaluate_all(
        &self,
        data: &HashMap<String, PriceSeries>,
        evaluated_at: DateTime<Utc>,
    ) -> Vec<TickerOutcome> {
        let tickers: Vec<(&String, &PriceSeries)> = data.iter().collect();
        let evaluate = |&(ticker, series): &(&String, &PriceSeries)| {
            self.evaluate_one(ticker, series, evaluated_at)
        };

        if !self.settings.parallel {
            return tickers.iter().map(evaluate).collect();
        }
        match &self.pool {
            Some(pool) => pool.install(|| tickers.par_iter().map(evaluate).collect()),
            None => tickers.par_iter().map(evaluate).collect(),
        }
    }

    fn evaluate_one(
        &self,
        ticker: &str,
        series: &PriceSeries,
        evaluated_at: DateTime<Utc>,
    ) -> TickerOutcome {
        match self.engine.generate_signal(ticker, series, evaluated_at) {
            Ok(Some(signal)) => TickerOutcome::Signal(signal),
            Ok(None) => TickerOutcome::NoSignal(ticker.to_string()),
            Err(err) => {
                warn!(ticker, reason = %err, kind = err.kind(), "skipping ticker");
                TickerOutcome::Skipped(skipped(ticker, &err))
            }
        }
    }
}

fn skipped(ticker: &str, err: &SignalError) -> SkippedTicker {
    SkippedTicker {
        ticker: ticker.to_string(),
        reason: err.to_string(),
        kind: err.kind(),
    }
}

/// Evaluate a batch with a default-settings aggregator.
pub fn generate_portfolio_signals(
    engine: SignalEngine,
    data: &HashMap<String, PriceSeries>,
) -> Vec<TradingSignal> {
    PortfolioAggregator::new(engine).generate_portfolio_signals(data)
}
