// ============================================================
// Layer 6 — Encoding Report
// ============================================================
// Appends one CSV row per encoding run, so the effect of a
// policy or max_length change can be compared across runs.
//
// Output file: <output_dir>/encoding_report.csv
//
//   partition,policy,records,senses,batches,last_batch_size
//   train,example,1250,310,79,2
//   freq-dev,definition,120,120,8,8
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

pub const REPORT_FILE: &str = "encoding_report.csv";

const HEADER: &str = "partition,policy,records,senses,batches,last_batch_size";

/// Summary of one encoding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingStats {
    pub partition: String,
    pub policy: String,
    pub records: usize,
    pub senses: usize,
    /// Batches yielded while draining the BatchIterator
    pub batches: usize,
    /// 0 when there were no records
    pub last_batch_size: usize,
}

pub struct ReportLogger {
    csv_path: PathBuf,
}

impl ReportLogger {
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join(REPORT_FILE);
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created encoding report: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, s: &EncodingStats) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot append to '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{},{},{},{},{}",
            s.partition, s.policy, s.records, s.senses, s.batches, s.last_batch_size,
        )?;
        Ok(())
    }
}
