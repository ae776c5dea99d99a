//! Time-series lookups for vitals the caller did not supply.

use async_trait::async_trait;
use aws_sdk_timestreamquery::Client as TimestreamClient;
use tracing::debug;

use crate::series::{parse_reading, NumericSeries};
use crate::{Error, Result};

/// Fetches the recent readings for one named series.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Readings in chronological order; empty when the backend has none.
    async fn fetch_latest(&self, series: &str) -> Result<NumericSeries>;

    /// Whether lookups can return data at all.
    ///
    /// An empty fetch from a live source means "no recent readings" and is
    /// reported as such; a disabled source says nothing about the series.
    fn is_live(&self) -> bool {
        true
    }
}

/// Source used while backend lookups are switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSeriesSource;

#[async_trait]
impl SeriesSource for DisabledSeriesSource {
    async fn fetch_latest(&self, _series: &str) -> Result<NumericSeries> {
        Ok(Vec::new())
    }

    fn is_live(&self) -> bool {
        false
    }
}

/// Reads `measure_value::double` rows from an Amazon Timestream table.
pub struct TimestreamSeriesSource {
    client: TimestreamClient,
    database: String,
    table: String,
    window_hours: u32,
}

impl TimestreamSeriesSource {
    pub fn new(client: TimestreamClient, database: String, table: String, window_hours: u32) -> Self {
        Self {
            client,
            database,
            table,
            window_hours,
        }
    }

    fn query_for(&self, series: &str) -> String {
        latest_readings_query(&self.database, &self.table, series, self.window_hours)
    }
}

#[async_trait]
impl SeriesSource for TimestreamSeriesSource {
    async fn fetch_latest(&self, series: &str) -> Result<NumericSeries> {
        let query = self.query_for(series);
        let mut readings = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let page = self
                .client
                .query()
                .query_string(&query)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| Error::Aws(format!("Timestream query for '{}' failed: {}", series, e)))?;

            readings.extend(
                page.rows()
                    .iter()
                    .filter_map(|row| row.data().first()?.scalar_value())
                    .filter_map(parse_reading),
            );

            match page.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        debug!(series, points = readings.len(), "Fetched series from Timestream");
        Ok(readings)
    }
}

/// Query returning one series' readings over the last `window_hours`, oldest first.
pub fn latest_readings_query(database: &str, table: &str, series: &str, window_hours: u32) -> String {
    format!(
        "SELECT measure_value::double AS val, time \
         FROM \"{}\".\"{}\" \
         WHERE measure_name = '{}' \
         AND time > ago({}h) \
         ORDER BY time ASC",
        database.replace('"', "\"\""),
        table.replace('"', "\"\""),
        series.replace('\'', "''"),
        window_hours
    )
}
