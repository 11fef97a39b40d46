//! Bulk ticker data importer
//!
//! Reads a CSV file with a `datetime,open,high,low,close,volume` header and
//! loads it into the ticker store in batches, skipping rows whose datetime
//! is already present.

use backtrix::db::TickerDatabase;
use backtrix::logging;
use backtrix::models::TickerRecord;
use chrono::{DateTime, NaiveDateTime, Utc};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use tracing::{info, warn};

const BATCH_SIZE: usize = 500;
const DEFAULT_FILE: &str = "ticker_data.csv";

#[derive(Debug, Deserialize)]
struct CsvRow {
    datetime: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: i64,
}

impl CsvRow {
    fn into_record(self) -> Result<TickerRecord, chrono::ParseError> {
        // Accept both "2024-01-01 10:00:00" and RFC 3339 timestamps
        let datetime = match NaiveDateTime::parse_from_str(&self.datetime, "%Y-%m-%d %H:%M:%S") {
            Ok(naive) => DateTime::from_naive_utc_and_offset(naive, Utc),
            Err(_) => DateTime::parse_from_rfc3339(&self.datetime)?.with_timezone(&Utc),
        };
        Ok(TickerRecord {
            datetime,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    logging::init_logging();

    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_FILE.to_string());
    info!(path = %path, "Reading CSV file");

    let mut reader = csv::Reader::from_path(&path)?;
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        match row.into_record() {
            Ok(record) => records.push(record),
            Err(e) => warn!(error = %e, "Skipping row with unparseable datetime"),
        }
    }
    info!(count = records.len(), "Parsed ticker records");

    info!("Connecting to database...");
    let db = TickerDatabase::new().await?;

    let mut total_inserted = 0;
    for (i, batch) in records.chunks(BATCH_SIZE).enumerate() {
        let inserted = db.insert_batch(batch).await?;
        total_inserted += inserted;
        info!(batch = i + 1, inserted = inserted, "Inserted batch");
    }

    info!(
        total = total_inserted,
        skipped = records.len() as u64 - total_inserted,
        "Data loading complete"
    );
    Ok(())
}
