// ============================================================
// Layer 6 — Pair Batch Log
// ============================================================
// Records one CSV row per sampled pair batch so a run can be
// inspected or plotted afterwards (class balance of anchors,
// positive/negative split).
//
// Columns:
//   batch        — 1-based batch number within the run
//   anchor_index — index of the anchor inside its split
//   anchor_class — class index of the anchor
//   anchor_name  — class name (from batches.meta.txt)
//   positives    — same-class rows
//   negatives    — other-class rows
//
// Output file: {out_dir}/pairs.csv
//
// Example CSV output:
//   batch,anchor_index,anchor_class,anchor_name,positives,negatives
//   1,31877,6,frog,25,103
//   2,4410,0,airplane,25,103
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    path::PathBuf,
};

use crate::domain::pair_batch::PairBatch;

/// Column names, in field order of BatchRecord.
pub const HEADER: [&str; 6] = [
    "batch", "anchor_index", "anchor_class", "anchor_name", "positives", "negatives",
];

/// One row of the pair log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub batch:        usize,
    pub anchor_index: usize,
    pub anchor_class: usize,
    pub anchor_name:  String,
    pub positives:    usize,
    pub negatives:    usize,
}

impl BatchRecord {
    /// Summarise a sampled batch.
    pub fn from_batch(batch_number: usize, batch: &PairBatch, label_names: &[String]) -> Self {
        let anchor_name = label_names
            .get(batch.anchor_class)
            .cloned()
            .unwrap_or_else(|| batch.anchor_class.to_string());

        Self {
            batch:        batch_number,
            anchor_index: batch.anchor_index,
            anchor_class: batch.anchor_class,
            anchor_name,
            positives:    batch.positives(),
            negatives:    batch.negatives(),
        }
    }
}

/// Writes BatchRecords to a CSV file as they are produced.
/// Fields are quoted by the csv writer when they need it.
pub struct PairLog {
    csv_path: PathBuf,
    writer:   csv::Writer<File>,
}

impl PairLog {
    /// Create a new log in `dir`, truncating any previous run.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;

        let csv_path = dir.join("pairs.csv");
        // Header is written explicitly so an empty run still has one
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writer.write_record(HEADER)?;
        writer.flush()?;
        tracing::debug!("Created pair log: '{}'", csv_path.display());

        Ok(Self { csv_path, writer })
    }

    /// Write one row and flush it to disk.
    pub fn log(&mut self, r: &BatchRecord) -> Result<()> {
        self.writer.serialize(r)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array4};

    fn batch() -> PairBatch {
        PairBatch {
            anchors:      Array4::zeros((3, 1, 1, 1)),
            partners:     Array4::zeros((3, 1, 1, 1)),
            labels:       array![1.0, 0.0, 0.0],
            anchor_index: 12,
            anchor_class: 1,
        }
    }

    #[test]
    fn test_record_uses_label_name() {
        let names = vec!["airplane".to_string(), "automobile".to_string()];
        let r     = BatchRecord::from_batch(4, &batch(), &names);
        assert_eq!(r.anchor_name, "automobile");
        assert_eq!((r.positives, r.negatives), (1, 2));

        let r = BatchRecord::from_batch(4, &batch(), &[]);
        assert_eq!(r.anchor_name, "1");
    }

    #[test]
    fn test_log_writes_header_and_rows() {
        let dir     = tempfile::tempdir().unwrap();
        let mut log = PairLog::create(dir.path()).unwrap();
        log.log(&BatchRecord::from_batch(1, &batch(), &[])).unwrap();
        log.log(&BatchRecord::from_batch(2, &batch(), &[])).unwrap();

        let text  = fs::read_to_string(log.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "batch,anchor_index,anchor_class,anchor_name,positives,negatives");
        assert_eq!(lines[1], "1,12,1,1,1,2");
    }

    #[test]
    fn test_empty_log_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let log = PairLog::create(dir.path()).unwrap();
        let text = fs::read_to_string(log.csv_path()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_name_with_comma_stays_one_field() {
        let dir     = tempfile::tempdir().unwrap();
        let names   = vec!["car".to_string(), "truck, \"pickup\"".to_string()];
        let record  = BatchRecord::from_batch(1, &batch(), &names);
        let mut log = PairLog::create(dir.path()).unwrap();
        log.log(&record).unwrap();

        let mut reader = csv::Reader::from_path(log.csv_path()).unwrap();
        assert_eq!(reader.headers().unwrap().len(), 6);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 6);
        assert_eq!(&rows[0][3], "truck, \"pickup\"");

        let mut reader = csv::Reader::from_path(log.csv_path()).unwrap();
        let back: BatchRecord = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(back, record);
    }
}
