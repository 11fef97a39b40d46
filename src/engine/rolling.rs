//! Series preparator: rolling averages over the price series

use crate::models::{AveragedPoint, PricePoint};
use std::collections::VecDeque;

/// Incremental simple moving average with a shrinking window at the start:
/// until `window` values have been seen, the mean is taken over however many
/// are available (minimum period 1). Keeps a running sum so each push is
/// O(1) and the whole series stays O(n).
struct WindowedMean {
    window: usize,
    sum: f64,
    values: VecDeque<f64>,
}

impl WindowedMean {
    fn new(window: usize) -> Self {
        Self {
            window,
            sum: 0.0,
            values: VecDeque::with_capacity(window),
        }
    }

    fn push(&mut self, value: f64) -> f64 {
        self.values.push_back(value);
        self.sum += value;
        if self.values.len() > self.window {
            if let Some(evicted) = self.values.pop_front() {
                self.sum -= evicted;
            }
        }
        self.sum / self.values.len() as f64
    }
}

/// Annotate every price point with its short and long rolling averages.
///
/// Output is aligned to the input: one [`AveragedPoint`] per [`PricePoint`],
/// same order. Both averages are defined at every index; the first point's
/// averages both equal its own close.
pub fn prepare_series(
    series: &[PricePoint],
    short_window: usize,
    long_window: usize,
) -> Vec<AveragedPoint> {
    let mut short = WindowedMean::new(short_window);
    let mut long = WindowedMean::new(long_window);

    series
        .iter()
        .map(|point| AveragedPoint {
            timestamp: point.timestamp,
            close: point.close,
            short_avg: short.push(point.close),
            long_avg: long.push(point.close),
        })
        .collect()
}
