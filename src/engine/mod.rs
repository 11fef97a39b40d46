//! Moving-average crossover backtest engine
//!
//! A pure, synchronous pipeline over an in-memory price series:
//!
//! 1. [`rolling::prepare_series`] annotates every point with short/long
//!    rolling averages.
//! 2. [`crossover::detect_signals`] diffs the bullish state pointwise and
//!    emits enter/exit events.
//! 3. [`simulator::simulate_trades`] replays the events through a
//!    single-position state machine; [`simulator::summarize`] folds the
//!    closed trades into a [`PerformanceSummary`].
//!
//! The engine performs no I/O and keeps no state across invocations, so it
//! is safe to run concurrently for independent inputs.

pub mod crossover;
pub mod rolling;
pub mod simulator;

pub use crossover::detect_signals;
pub use rolling::prepare_series;
pub use simulator::{simulate_trades, summarize, Position};

use crate::models::{PerformanceSummary, PricePoint};
use thiserror::Error;

/// Default short rolling-average window.
pub const DEFAULT_SHORT_WINDOW: usize = 10;
/// Default long rolling-average window.
pub const DEFAULT_LONG_WINDOW: usize = 50;
/// Notional capital base that total return is normalized against. This is
/// not derived from position sizing; pnl is per-share against a flat base.
pub const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;

/// Parameters for one backtest run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktestParams {
    pub short_window: usize,
    pub long_window: usize,
    pub initial_capital: f64,
}

impl Default for BacktestParams {
    fn default() -> Self {
        Self {
            short_window: DEFAULT_SHORT_WINDOW,
            long_window: DEFAULT_LONG_WINDOW,
            initial_capital: DEFAULT_INITIAL_CAPITAL,
        }
    }
}

impl BacktestParams {
    /// Descriptive label for the configuration, e.g.
    /// `"Moving Average Crossover (10/50)"`.
    pub fn strategy_name(&self) -> String {
        format!(
            "Moving Average Crossover ({}/{})",
            self.short_window, self.long_window
        )
    }
}

/// Result of a backtest run. An empty input series is a legitimate outcome,
/// not an error; callers must branch on it explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum BacktestOutcome {
    Summary(PerformanceSummary),
    NoData,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The input series violated the sorted-ascending, no-duplicates
    /// precondition. Sorting is the storage layer's responsibility; the
    /// engine fails fast instead of producing nonsensical metrics.
    #[error("price series timestamps are not strictly ascending")]
    NonMonotonicTimestamps,
    /// Window sizes must be at least 1.
    #[error("rolling window size must be at least 1")]
    ZeroWindow,
}

/// Run the full backtest pipeline over an ordered price series.
pub fn run_backtest(
    series: &[PricePoint],
    params: &BacktestParams,
) -> Result<BacktestOutcome, EngineError> {
    if series.is_empty() {
        return Ok(BacktestOutcome::NoData);
    }
    if params.short_window == 0 || params.long_window == 0 {
        return Err(EngineError::ZeroWindow);
    }
    if series
        .windows(2)
        .any(|pair| pair[1].timestamp <= pair[0].timestamp)
    {
        return Err(EngineError::NonMonotonicTimestamps);
    }

    let averaged = prepare_series(series, params.short_window, params.long_window);
    let signals = detect_signals(&averaged, params.short_window);
    let trades = simulate_trades(&signals);
    Ok(BacktestOutcome::Summary(summarize(&trades, params)))
}
