//! Row-by-row delivery of transformed records to the destination.
//!
//! One POST per record, strictly in file order, one request in flight
//! at a time. A failed record is logged with enough context to retry it
//! by hand and the loop moves on; the only fatal condition is a missing
//! source file, surfaced before any request is issued.

use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::LoadConfig;
use crate::error::{LoadResult, TransportError};
use crate::logs::{log_error, log_info, log_success, log_warning};
use crate::reader::{read_rows, RawRow};
use crate::transform::{transform_row, transform_rows};

/// Outcome of delivering one record.
#[derive(Debug)]
pub enum PostOutcome {
    /// The destination accepted the record.
    Delivered(reqwest::StatusCode),
    /// Delivery failed; the record is logged for manual retry.
    Failed(TransportError),
}

/// Summary of a completed load run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    /// Rows read from the source file.
    pub rows: usize,
    /// Records the destination accepted.
    pub posted: usize,
    /// Records that failed delivery.
    pub failed: usize,
}

/// Sequential loader: transforms rows and POSTs them one at a time.
pub struct Loader<'a> {
    config: &'a LoadConfig,
    client: reqwest::Client,
}

impl<'a> Loader<'a> {
    /// Build a loader with the configured request timeout.
    pub fn new(config: &'a LoadConfig) -> LoadResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    /// Load every row of `path` into the collection at `url`.
    ///
    /// Rows are delivered strictly in file order and a failed POST never
    /// blocks the rows after it. The report says how many made it.
    pub async fn load(&self, path: &str, url: &str) -> LoadResult<LoadReport> {
        let rows = read_rows(path)?;
        let mut report = LoadReport {
            rows: rows.len(),
            posted: 0,
            failed: 0,
        };

        if self.config.debug {
            log_info(format!("Rows: {}", rows.len()));
        }

        for (idx, row) in rows.iter().enumerate() {
            let transformed = transform_row(row, self.config);

            if self.config.debug {
                for note in &transformed.notes {
                    log_warning(format!("Row {}, field '{}': {}", idx, note.field, note.message));
                }
            }

            match self.post_record(url, &transformed.record).await {
                PostOutcome::Delivered(status) => {
                    report.posted += 1;
                    log_success(format!(
                        "Result: {} from {} posting: {}",
                        status,
                        url,
                        render_record(&transformed.record)
                    ));
                }
                PostOutcome::Failed(err) => {
                    report.failed += 1;
                    log_error(format!("{} (record: {})", err, render_record(&transformed.record)));
                }
            }
        }

        Ok(report)
    }

    /// POST one record as a JSON document with `content-type: application/json`.
    async fn post_record(&self, url: &str, record: &Map<String, Value>) -> PostOutcome {
        let response = match self.client.post(url).json(record).send().await {
            Ok(response) => response,
            Err(source) => {
                return PostOutcome::Failed(TransportError::Request {
                    url: url.to_string(),
                    source,
                })
            }
        };

        let status = response.status();
        if status.is_success() {
            PostOutcome::Delivered(status)
        } else {
            PostOutcome::Failed(TransportError::Status {
                url: url.to_string(),
                status,
            })
        }
    }

    /// Build the full ordered sequence of typed records for `path`
    /// without touching the network. Rendering is a separate step, see
    /// [`render_preview`].
    pub fn preview(&self, path: &str) -> LoadResult<Vec<Value>> {
        let rows = read_rows(path)?;

        if self.config.debug {
            log_info(format!("Rows: {}", rows.len()));
        }

        Ok(preview_records(&rows, self.config))
    }

    /// GET the collection endpoint and return its status and body, for
    /// checking what the destination holds after a load.
    pub async fn fetch(&self, url: &str) -> LoadResult<(reqwest::StatusCode, String)> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

/// Typed records for every row, in order. Pure: no I/O, no sink.
pub fn preview_records(rows: &[RawRow], config: &LoadConfig) -> Vec<Value> {
    transform_rows(rows, config)
        .into_iter()
        .map(|transformed| Value::Object(transformed.record))
        .collect()
}

/// Render previewed records as a pretty JSON array.
pub fn render_preview(records: &[Value]) -> LoadResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Compact JSON for log lines; a record of plain JSON values cannot
/// fail to serialize, but degrade to `{}` rather than panic if it does.
fn render_record(record: &Map<String, Value>) -> String {
    serde_json::to_string(record).unwrap_or_else(|_| String::from("{}"))
}
