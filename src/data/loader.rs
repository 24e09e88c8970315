// ============================================================
// Layer 4 — Sheet Loader
// ============================================================
// Loads the annotated sense data exported from the spreadsheet
// as JSON Lines, one file per sheet:
//
//   <data_dir>/
//     senses.jsonl    ← one DefinitionRow per line
//     examples.jsonl  ← one ExampleRow per line
//
// Blank lines are skipped. A line that does not parse is a
// hard error naming the file and line number: a half-loaded
// sheet would shift every downstream count without notice.
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::domain::row::{DefinitionRow, ExampleRow};
use crate::domain::traits::RowSource;

pub const SENSES_FILE: &str = "senses.jsonl";
pub const EXAMPLES_FILE: &str = "examples.jsonl";

/// Reads both sheets from a directory of JSON Lines files.
/// Implements the RowSource trait from Layer 3.
pub struct JsonlLoader {
    dir: PathBuf,
}

impl JsonlLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl RowSource for JsonlLoader {
    fn load_definitions(&self) -> Result<Vec<DefinitionRow>> {
        let rows = read_jsonl(&self.dir.join(SENSES_FILE))?;
        tracing::debug!("Read {} sense rows", rows.len());
        Ok(rows)
    }

    fn load_examples(&self) -> Result<Vec<ExampleRow>> {
        let rows = read_jsonl(&self.dir.join(EXAMPLES_FILE))?;
        tracing::debug!("Read {} example rows", rows.len());
        Ok(rows)
    }
}

/// Parse every non-blank line of `path` as one `T`.
fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;

    let mut rows = Vec::new();
    for (n, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Cannot read '{}'", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str::<T>(&line)
            .with_context(|| format!("Malformed row at {}:{}", path.display(), n + 1))?;
        rows.push(row);
    }
    Ok(rows)
}
