use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A price point annotated with both rolling averages.
///
/// Produced by the series preparator, one per input point. Both averages
/// are always defined (shrinking-window policy, minimum period 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AveragedPoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub short_avg: f64,
    pub long_avg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    EnterLong,
    ExitLong,
}

/// A crossover event: the bullish state changed at this point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: SignalKind,
    pub price: f64,
}

/// A completed enter/exit pair with realized profit-or-loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosedTrade {
    pub entry_price: f64,
    pub exit_price: f64,
    pub pnl: f64,
}

/// Aggregate result of a backtest run, the engine's sole external output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub strategy_name: String,
    pub total_return_percentage: f64,
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub win_rate: f64,
}
