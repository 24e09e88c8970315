// ============================================================
// Layer 6 — Record Store
// ============================================================
// Persists the outputs of an encoding run.
//
// File layout:
//   <output_dir>/
//     encode_config.json  ← the EncodeConfig the run used
//     records.jsonl       ← one EncodedRecord per line
//     senses.json         ← per-sense summary (`senses` command)
//
// Saving the config next to the records means a later run can
// check it is reading records framed with the same max_length
// and marker ids.
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::record::EncodedRecord;

pub const CONFIG_FILE: &str = "encode_config.json";
pub const RECORDS_FILE: &str = "records.jsonl";

pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// Creates the output directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Pretty-printed JSON under `<dir>/<name>`.
    pub fn save_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json).with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Saved '{}'", path.display());
        Ok(path)
    }

    pub fn load_json<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.dir.join(name);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("Malformed JSON in '{}'", path.display()))
    }

    pub fn save_config<T: Serialize>(&self, config: &T) -> Result<PathBuf> {
        self.save_json(CONFIG_FILE, config)
    }

    pub fn save_records(&self, records: &[EncodedRecord]) -> Result<PathBuf> {
        let path = self.dir.join(RECORDS_FILE);
        let file = File::create(&path).with_context(|| format!("Cannot create '{}'", path.display()))?;

        let mut out = BufWriter::new(file);
        for record in records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;

        tracing::info!("Wrote {} records to '{}'", records.len(), path.display());
        Ok(path)
    }

    pub fn load_records(&self) -> Result<Vec<EncodedRecord>> {
        let path = self.dir.join(RECORDS_FILE);
        let file = File::open(&path)
            .with_context(|| format!("Cannot open '{}'. Have you run 'encode' first?", path.display()))?;

        let mut records = Vec::new();
        for (n, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(
                serde_json::from_str(&line)
                    .with_context(|| format!("Malformed record at {}:{}", path.display(), n + 1))?,
            );
        }
        Ok(records)
    }
}
