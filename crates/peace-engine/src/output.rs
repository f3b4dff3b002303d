//! History Log
//!
//! Append-only JSONL log of resolved rounds, one `RoundRecord` per line.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use peace_model::RoundRecord;
use tracing::warn;

/// Writes round records to a JSONL file.
pub struct HistoryLog {
    writer: Option<BufWriter<File>>,
    record_count: u64,
}

impl HistoryLog {
    /// Create a log writing to the specified path, truncating any existing file
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            record_count: 0,
        })
    }

    /// Create a log that discards records
    pub fn null() -> Self {
        Self {
            writer: None,
            record_count: 0,
        }
    }

    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Append one round
    pub fn log(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        self.record_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = record.to_jsonl()?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for HistoryLog {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!(error = %e, "Failed to flush history log");
        }
    }
}

impl std::fmt::Debug for HistoryLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryLog")
            .field("enabled", &self.writer.is_some())
            .field("record_count", &self.record_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn record(round: u32) -> RoundRecord {
        RoundRecord {
            round,
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            actions: Vec::new(),
            global_summary: format!("Round {} Summary", round),
            private_summaries: BTreeMap::new(),
        }
    }

    #[test]
    fn test_null_log_counts_without_writing() {
        let mut log = HistoryLog::null();
        log.log(&record(1)).unwrap();
        log.log(&record(2)).unwrap();
        assert_eq!(log.record_count(), 2);
    }

    #[test]
    fn test_writes_one_line_per_round() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.jsonl");

        {
            let mut log = HistoryLog::new(&path).unwrap();
            log.log(&record(1)).unwrap();
            log.log(&record(2)).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let rounds: Vec<u32> = content
            .lines()
            .map(|line| RoundRecord::from_jsonl(line).unwrap().round)
            .collect();
        assert_eq!(rounds, vec![1, 2]);
    }
}
