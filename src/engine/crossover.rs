//! Signal detector: crossover events from the averaged series

use crate::models::{AveragedPoint, SignalEvent, SignalKind};

/// Bullish state at one point: 1 when the short average is strictly above
/// the long average, 0 otherwise. Ties are non-bullish. Indices before
/// `short_window` are forced to 0 regardless of the averages — the short
/// average is not considered warmed up for crossover purposes there, even
/// though it is numerically defined from index 0.
fn bullish_state(point: &AveragedPoint, index: usize, short_window: usize) -> u8 {
    if index < short_window {
        0
    } else if point.short_avg > point.long_avg {
        1
    } else {
        0
    }
}

/// Scan the averaged series and emit a [`SignalEvent`] at every point where
/// the bullish state changes relative to the previous point. Index 0 never
/// emits (there is no prior state to diff against). A 0→1 transition emits
/// [`SignalKind::EnterLong`], 1→0 emits [`SignalKind::ExitLong`].
pub fn detect_signals(points: &[AveragedPoint], short_window: usize) -> Vec<SignalEvent> {
    let mut events = Vec::new();
    let mut prev_state = None;

    for (index, point) in points.iter().enumerate() {
        let state = bullish_state(point, index, short_window);
        if let Some(prev) = prev_state {
            match (prev, state) {
                (0, 1) => events.push(SignalEvent {
                    timestamp: point.timestamp,
                    kind: SignalKind::EnterLong,
                    price: point.close,
                }),
                (1, 0) => events.push(SignalEvent {
                    timestamp: point.timestamp,
                    kind: SignalKind::ExitLong,
                    price: point.close,
                }),
                _ => {}
            }
        }
        prev_state = Some(state);
    }

    events
}
