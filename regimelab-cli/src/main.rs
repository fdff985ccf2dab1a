//! RegimeLab CLI: rank regime-adaptive signals for local OHLCV files.
//!
//! Commands:
//! - `signals`: evaluate every CSV in a directory and print the ranked signals
//! - `summary`: the same batch, reduced to counts and top picks
//! - `analyze`: full regime and checklist breakdown for one CSV file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use regimelab_core::strategy::ConditionResult;
use regimelab_core::{Analysis, SignalEngine, TradingSignal};
use regimelab_runner::{load_csv, load_dir, PortfolioAggregator, PortfolioRun, RunConfig, SignalSummary};

#[derive(Parser)]
#[command(
    name = "regimelab",
    about = "RegimeLab CLI: regime-adaptive trading signals from local OHLCV files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every CSV in a directory and print the ranked signals.
    Signals(BatchArgs),
    /// Evaluate a directory and print signal counts and top picks.
    Summary {
        #[command(flatten)]
        batch: BatchArgs,

        /// Number of top picks. Defaults to the config's `top_picks`.
        #[arg(long)]
        top: Option<usize>,
    },
    /// Show indicators, regime and checklists for one CSV file.
    Analyze {
        /// CSV file (`timestamp,open,high,low,close,volume`).
        file: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct EngineArgs {
    /// TOML run configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured minimum confidence (0.0 to 1.0).
    #[arg(long)]
    min_confidence: Option<f64>,
}

#[derive(Args)]
struct BatchArgs {
    /// Directory of per-ticker CSV files. Defaults to ./data.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,

    /// Evaluate tickers one at a time instead of on the thread pool.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Signals(batch) => {
            let (run, _) = run_batch(&batch)?;
            match batch.format {
                OutputFormat::Table => print_signals(&run),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&run.signals)?),
            }
            Ok(())
        }
        Commands::Summary { batch, top } => {
            let (run, config) = run_batch(&batch)?;
            let summary = run.summary(top.unwrap_or(config.runner.top_picks));
            match batch.format {
                OutputFormat::Table => print_summary(&summary),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            }
            Ok(())
        }
        Commands::Analyze {
            file,
            engine,
            format,
        } => run_analyze(&file, &engine, format),
    }
}

fn load_config(args: &EngineArgs) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(min_confidence) = args.min_confidence {
        config.engine = config.engine.with_min_confidence(min_confidence);
        config.engine.validate()?;
    }
    Ok(config)
}

fn run_batch(args: &BatchArgs) -> Result<(PortfolioRun, RunConfig)> {
    let mut config = load_config(&args.engine)?;
    if args.sequential {
        config.runner.parallel = false;
    }

    let data = load_dir(&args.data_dir)
        .with_context(|| format!("failed to load data from {}", args.data_dir.display()))?;
    info!(tickers = data.len(), dir = %args.data_dir.display(), "loaded price data");
    let aggregator = PortfolioAggregator::from_run_config(&config)?;
    Ok((aggregator.run_at(&data, Utc::now()), config))
}

fn run_analyze(file: &Path, args: &EngineArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(args)?;
    let (ticker, series) =
        load_csv(file).with_context(|| format!("failed to load {}", file.display()))?;
    let engine = SignalEngine::new(config.engine)?;

    let analysis = engine.analyze(&series)?;
    let signal = engine.generate_signal(&ticker, &series, Utc::now())?;

    match format {
        OutputFormat::Table => print_analysis(&ticker, &analysis, signal.as_ref()),
        OutputFormat::Json => {
            let report = serde_json::json!({
                "ticker": ticker,
                "analysis": analysis,
                "signal": signal,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

// ─── Output ─────────────────────────────────────────────────────────

fn print_signals(run: &PortfolioRun) {
    println!();
    println!("=== Signals ({}) ===", run.evaluated_at.format("%Y-%m-%d %H:%M UTC"));
    if run.signals.is_empty() {
        println!("No signals.");
    } else {
        println!(
            "{:<8} {:<12} {:>5}  {:<15} {:<15} {:>10} {:>10} {:>10}",
            "Ticker", "Signal", "Conf", "Regime", "Strategy", "Entry", "Stop", "Target"
        );
        for signal in &run.signals {
            print_signal_row(signal);
        }
    }
    println!();
    println!(
        "Evaluated {} tickers: {} signals, {} without signal, {} skipped",
        run.evaluated(),
        run.signals.len(),
        run.no_signal.len(),
        run.skipped.len()
    );
    for skip in &run.skipped {
        println!("  skipped {}: {}", skip.ticker, skip.reason);
    }
}

fn print_signal_row(signal: &TradingSignal) {
    println!(
        "{:<8} {:<12} {:>4.0}%  {:<15} {:<15} {:>10.2} {:>10.2} {:>10.2}",
        signal.ticker,
        signal.signal_type.as_str(),
        signal.confidence * 100.0,
        signal.regime.as_str(),
        signal.strategy.as_str(),
        signal.entry_price,
        signal.stop_loss,
        signal.target_price
    );
}

fn print_summary(summary: &SignalSummary) {
    println!();
    println!("=== Signal Summary ===");
    println!("Total:          {}", summary.total_signals);
    println!("Buy:            {}", summary.buy_signals);
    println!("Sell:           {}", summary.sell_signals);
    println!("Avg Confidence: {:.1}%", summary.average_confidence * 100.0);
    if !summary.top_picks.is_empty() {
        println!();
        println!("--- Top Picks ---");
        for (rank, pick) in summary.top_picks.iter().enumerate() {
            println!(
                "{}. {:<8} {:<12} {:>4.0}%  {}",
                rank + 1,
                pick.ticker,
                pick.signal_type.as_str(),
                pick.confidence * 100.0,
                pick.regime.as_str()
            );
            for reason in &pick.reasons {
                println!("     - {reason}");
            }
        }
    }
}

fn print_checklist(label: &str, results: &[ConditionResult]) {
    println!("{label}:");
    for result in results {
        let mark = if result.satisfied { "x" } else { " " };
        println!("  [{mark}] {:<22} {}", result.name, result.reason);
    }
}

fn print_analysis(ticker: &str, analysis: &Analysis, signal: Option<&TradingSignal>) {
    let snap = &analysis.snapshot;
    println!();
    println!("=== {ticker} ===");
    println!("Close:          {:.2}", snap.close);
    println!("Regime:         {}", analysis.regime);
    println!(
        "Hurst:          {:.3}   Trend R²: {:.3}   Volatility: {} ({:.1}% / {:.1}%)",
        snap.hurst,
        snap.trend_strength,
        snap.volatility_regime,
        snap.volatility_short * 100.0,
        snap.volatility_long * 100.0
    );
    println!(
        "RSI:            {:.1}   MACD: {:.3} / {:.3}   ADX: {:.1}   ATR: {:.2}",
        snap.rsi, snap.macd, snap.macd_signal, snap.adx, snap.atr
    );
    println!(
        "Bollinger pos:  {:.2}   %K: {:.1}   %R: {:.1}   Volume x{:.2}   Squeeze: {}",
        snap.bb_position,
        snap.stoch_k,
        snap.williams_r,
        snap.volume_ratio,
        if snap.squeeze_on { "on" } else { "off" }
    );
    println!(
        "Composites:     momentum {:.1}   mean reversion {:.1}",
        snap.momentum_score, snap.mean_reversion_score
    );
    println!();
    println!("--- {} checklists ---", analysis.outcome.strategy);
    print_checklist("Long", &analysis.outcome.long);
    print_checklist("Short", &analysis.outcome.short);
    println!();
    match (&analysis.confidence, signal) {
        (_, Some(signal)) => {
            println!(
                "Signal:         {} at {:.0}% confidence",
                signal.signal_type,
                signal.confidence * 100.0
            );
            println!(
                "Entry / Stop / Target: {:.2} / {:.2} / {:.2}",
                signal.entry_price, signal.stop_loss, signal.target_price
            );
        }
        (Some(confidence), None) => println!(
            "Signal:         suppressed ({:.0}% confidence below the gate)",
            confidence.value() * 100.0
        ),
        (None, None) => println!("Signal:         none"),
    }
}
