//! Database operations for ticker data

pub mod postgres;

pub use postgres::TickerDatabase;
