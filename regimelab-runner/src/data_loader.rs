//! CSV series loading.
//!
//! One file per ticker, header `timestamp,open,high,low,close,volume`. The
//! ticker is the upper-cased file stem (`spy.csv` → `SPY`). Timestamps are
//! RFC 3339 or a bare `YYYY-MM-DD` date, read as midnight UTC.
//!
//! Rows are sorted by timestamp before the series is built; duplicate
//! timestamps are an error.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use regimelab_core::{PriceBar, PriceSeries, SeriesError};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unparseable timestamp '{value}'")]
    Timestamp { row: usize, value: String },
    #[error("invalid series: {0}")]
    Series(#[from] SeriesError),
    #[error("cannot derive a ticker from {0}")]
    NoTicker(PathBuf),
    #[error("ticker {ticker} is provided by both {first} and {second}")]
    DuplicateTicker {
        ticker: String,
        first: PathBuf,
        second: PathBuf,
    },
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

/// Parse an RFC 3339 timestamp or a plain date.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Read a price series from any CSV source.
pub fn read_series<R: Read>(reader: R) -> Result<PriceSeries, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut bars = Vec::new();
    for (i, record) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = record?;
        let timestamp = parse_timestamp(&row.timestamp).ok_or_else(|| LoadError::Timestamp {
            row: i + 1,
            value: row.timestamp.clone(),
        })?;
        bars.push(PriceBar::new(
            timestamp, row.open, row.high, row.low, row.close, row.volume,
        ));
    }
    bars.sort_by_key(|bar| bar.timestamp);
    Ok(PriceSeries::new(bars)?)
}

/// Ticker for a CSV path: the upper-cased file stem.
pub fn ticker_for(path: &Path) -> Result<String, LoadError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_uppercase)
        .ok_or_else(|| LoadError::NoTicker(path.to_path_buf()))
}

/// Load one ticker's CSV file.
pub fn load_csv(path: &Path) -> Result<(String, PriceSeries), LoadError> {
    let ticker = ticker_for(path)?;
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let series = read_series(file)?;
    debug!(ticker = %ticker, bars = series.len(), "loaded series");
    Ok((ticker, series))
}

/// Load every `*.csv` file in a directory.
///
/// Fails on the first unreadable entry or file; the engine is never handed a
/// half-loaded directory. Two files naming the same ticker (`spy.csv` and
/// `SPY.CSV`) are rejected rather than one silently replacing the other.
pub fn load_dir(dir: &Path) -> Result<HashMap<String, PriceSeries>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut data = HashMap::with_capacity(paths.len());
    let mut sources: HashMap<String, PathBuf> = HashMap::with_capacity(paths.len());
    for path in paths {
        let (ticker, series) = load_csv(&path)?;
        if let Some(first) = sources.get(&ticker) {
            return Err(LoadError::DuplicateTicker {
                ticker,
                first: first.clone(),
                second: path,
            });
        }
        sources.insert(ticker.clone(), path);
        data.insert(ticker, series);
    }
    Ok(data)
}
