//! Backtrix: a moving-average crossover backtesting service.
//!
//! The [`engine`] module is the heart of the crate: a pure, synchronous
//! pipeline that turns an ordered price series into aggregate trade
//! statistics. The remaining modules are the service shell around it —
//! Postgres storage for ticker data, an Axum HTTP API, and the usual
//! logging/metrics/config plumbing.

pub mod config;
pub mod core;
pub mod db;
pub mod engine;
pub mod logging;
pub mod metrics;
pub mod models;
