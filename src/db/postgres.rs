//! Postgres storage for ticker data

use crate::config;
use crate::models::TickerRecord;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_postgres::{Client, NoTls};

type DbError = Box<dyn std::error::Error + Send + Sync>;

pub struct TickerDatabase {
    client: Arc<RwLock<Option<Client>>>,
}

impl TickerDatabase {
    pub async fn new() -> Result<Self, DbError> {
        let database_url = config::get_database_url();
        let (client, connection) = tokio_postgres::connect(&database_url, NoTls)
            .await
            .map_err(|e| {
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    format!("Failed to connect to Postgres: {}", e),
                )) as DbError
            })?;

        // Spawn connection task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "Postgres connection error");
            }
        });

        let db = Self {
            client: Arc::new(RwLock::new(Some(client))),
        };

        // Initialize schema
        db.init_schema().await?;

        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            // Unique datetime lets batch imports skip duplicate rows
            c.execute(
                "CREATE TABLE IF NOT EXISTS ticker_data (
                    datetime TIMESTAMP NOT NULL UNIQUE,
                    open DOUBLE PRECISION NOT NULL,
                    high DOUBLE PRECISION NOT NULL,
                    low DOUBLE PRECISION NOT NULL,
                    close DOUBLE PRECISION NOT NULL,
                    volume BIGINT NOT NULL
                )",
                &[],
            )
            .await
            .map_err(|e| {
                Box::new(std::io::Error::other(format!(
                    "Failed to create ticker_data table: {}",
                    e
                ))) as DbError
            })?;
        }

        Ok(())
    }

    /// Insert a single ticker record
    pub async fn insert_record(&self, record: &TickerRecord) -> Result<(), DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            let datetime_naive = record.datetime.naive_utc();

            c.execute(
                "INSERT INTO ticker_data (datetime, open, high, low, close, volume)
                 VALUES ($1, $2, $3, $4, $5, $6)",
                &[
                    &datetime_naive,
                    &record.open,
                    &record.high,
                    &record.low,
                    &record.close,
                    &record.volume,
                ],
            )
            .await
            .map_err(|e| {
                Box::new(std::io::Error::other(format!(
                    "Failed to insert ticker record: {}",
                    e
                ))) as DbError
            })?;
        }

        Ok(())
    }

    /// Insert a batch of ticker records, skipping rows whose datetime is
    /// already stored. Returns the number of rows actually inserted.
    pub async fn insert_batch(&self, records: &[TickerRecord]) -> Result<u64, DbError> {
        let client = self.client.read().await;
        let mut inserted = 0;
        if let Some(ref c) = *client {
            for record in records {
                let datetime_naive = record.datetime.naive_utc();
                inserted += c
                    .execute(
                        "INSERT INTO ticker_data (datetime, open, high, low, close, volume)
                         VALUES ($1, $2, $3, $4, $5, $6)
                         ON CONFLICT (datetime) DO NOTHING",
                        &[
                            &datetime_naive,
                            &record.open,
                            &record.high,
                            &record.low,
                            &record.close,
                            &record.volume,
                        ],
                    )
                    .await
                    .map_err(|e| {
                        Box::new(std::io::Error::other(format!(
                            "Failed to insert ticker batch row: {}",
                            e
                        ))) as DbError
                    })?;
            }
        }

        Ok(inserted)
    }

    /// Fetch all ticker records ordered ascending by datetime. The engine
    /// relies on this ordering; it does not sort its input.
    pub async fn fetch_all(&self) -> Result<Vec<TickerRecord>, DbError> {
        let client = self.client.read().await;
        if let Some(ref c) = *client {
            let rows = c
                .query(
                    "SELECT datetime, open, high, low, close, volume
                     FROM ticker_data
                     ORDER BY datetime ASC",
                    &[],
                )
                .await
                .map_err(|e| {
                    Box::new(std::io::Error::other(format!(
                        "Failed to query ticker data: {}",
                        e
                    ))) as DbError
                })?;

            let mut records = Vec::with_capacity(rows.len());
            for row in rows {
                let datetime_naive: chrono::NaiveDateTime = row.get(0);
                records.push(TickerRecord {
                    datetime: chrono::DateTime::from_naive_utc_and_offset(
                        datetime_naive,
                        chrono::Utc,
                    ),
                    open: row.get(1),
                    high: row.get(2),
                    low: row.get(3),
                    close: row.get(4),
                    volume: row.get(5),
                });
            }

            Ok(records)
        } else {
            Ok(Vec::new())
        }
    }

    /// Check if the database connection is available
    pub async fn is_available(&self) -> bool {
        let client = self.client.read().await;
        client.is_some()
    }
}
