//! File-backed record store.
//!
//! Records are stored as newline-delimited JSON (JSONL), one record per
//! line, in the order they were written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::domain::RemixRecord;

use super::ContentProvider;

/// JSONL record store used as a dynamic content source
pub struct RecordStore {
    /// Path to the records.jsonl file
    records_path: PathBuf,
}

impl RecordStore {
    /// Open a record store at the given path
    pub fn new(records_path: impl Into<PathBuf>) -> Self {
        Self {
            records_path: records_path.into(),
        }
    }

    /// Append a record to the file, creating it if needed
    pub async fn append(&self, record: &RemixRecord) -> Result<()> {
        if let Some(parent) = self.records_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.records_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to open records file: {}",
                    self.records_path.display()
                )
            })?;

        let json = serde_json::to_string(record).context("Failed to serialize record")?;
        file.write_all(format!("{}\n", json).as_bytes())
            .await
            .context("Failed to write record")?;
        file.flush().await.context("Failed to flush record")?;

        Ok(())
    }

    /// Read every record in file order.
    ///
    /// A missing file is an error, not an empty snapshot.
    pub async fn read_all(&self) -> Result<Vec<RemixRecord>> {
        let file = File::open(&self.records_path).await.with_context(|| {
            format!(
                "Failed to open records file: {}",
                self.records_path.display()
            )
        })?;

        let reader = BufReader::new(file);
        let mut lines = reader.lines();
        let mut records = Vec::new();
        let mut line_no = 0usize;

        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            let record: RemixRecord = serde_json::from_str(&line).with_context(|| {
                format!(
                    "Failed to parse record at {}:{}",
                    self.records_path.display(),
                    line_no
                )
            })?;
            records.push(record);
        }

        debug!(count = records.len(), path = %self.records_path.display(), "Read records");
        Ok(records)
    }
}

#[async_trait]
impl ContentProvider for RecordStore {
    fn name(&self) -> &str {
        "record-store"
    }

    async fn fetch_all(&self) -> Result<Vec<RemixRecord>> {
        self.read_all().await
    }
}
