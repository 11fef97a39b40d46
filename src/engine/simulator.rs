//! Trade simulator and aggregator: single-position replay of signal events

use super::BacktestParams;
use crate::models::{ClosedTrade, PerformanceSummary, SignalEvent, SignalKind};

/// Position held by the simulated account. The tagged variant keeps the
/// ignored-event branches explicit: an enter while already long and an exit
/// while flat are both no-ops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    Flat,
    Long { entry_price: f64 },
}

impl Position {
    /// Apply one signal event, emitting a closed trade on a long→flat
    /// transition.
    pub fn apply(&mut self, event: &SignalEvent) -> Option<ClosedTrade> {
        match (*self, event.kind) {
            (Position::Flat, SignalKind::EnterLong) => {
                *self = Position::Long {
                    entry_price: event.price,
                };
                None
            }
            (Position::Long { entry_price }, SignalKind::ExitLong) => {
                *self = Position::Flat;
                Some(ClosedTrade {
                    entry_price,
                    exit_price: event.price,
                    pnl: event.price - entry_price,
                })
            }
            // No pyramiding, and a stray exit while flat is ignored.
            (Position::Long { .. }, SignalKind::EnterLong)
            | (Position::Flat, SignalKind::ExitLong) => None,
        }
    }
}

/// Replay the ordered signal events through a single-position account and
/// collect the closed trades. The account starts flat; a position still open
/// after the last event is discarded, not force-closed.
pub fn simulate_trades(events: &[SignalEvent]) -> Vec<ClosedTrade> {
    let mut position = Position::Flat;
    let mut trades = Vec::new();

    for event in events {
        if let Some(trade) = position.apply(event) {
            trades.push(trade);
        }
    }

    trades
}

/// Fold the closed trades into the run's summary metrics.
///
/// A trade wins only on strictly positive pnl; zero pnl counts as losing.
/// Total return is total pnl normalized against the flat capital base from
/// `params`, not against shares actually traded. Both percentages are
/// rounded to 2 decimals, and both are 0 when no trades closed.
pub fn summarize(trades: &[ClosedTrade], params: &BacktestParams) -> PerformanceSummary {
    let total_trades = trades.len() as u32;
    let winning_trades = trades.iter().filter(|t| t.pnl > 0.0).count() as u32;
    let losing_trades = total_trades - winning_trades;
    let total_pnl: f64 = trades.iter().map(|t| t.pnl).sum();

    let win_rate = if total_trades > 0 {
        f64::from(winning_trades) / f64::from(total_trades) * 100.0
    } else {
        0.0
    };
    let total_return_percentage = total_pnl / params.initial_capital * 100.0;

    PerformanceSummary {
        strategy_name: params.strategy_name(),
        total_return_percentage: round2(total_return_percentage),
        total_trades,
        winning_trades,
        losing_trades,
        win_rate: round2(win_rate),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
