//! Shared data models spanning the engine layers.

pub mod performance;
pub mod ticker;

pub use performance::{
    AveragedPoint, ClosedTrade, PerformanceSummary, SignalEvent, SignalKind,
};
pub use ticker::{PricePoint, TickerRecord};
