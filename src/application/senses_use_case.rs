// ============================================================
// Layer 2 — SensesUseCase
// ============================================================
// Reads the records a previous `encode` run saved, groups them
// per sense the way evaluation consumes them, and writes a
// summary of each group to senses.json:
//
//   [
//     { "sense_id": "s1", "lemma": "chat", "supersense": "animal",
//       "hypersenses": ["animate_entity"],
//       "has_definition": true, "has_definition_only": true,
//       "examples": 2 },
//     ...
//   ]
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use burn::backend::NdArray;
use serde::{Deserialize, Serialize};

use crate::data::grouper::PerSenseGrouper;
use crate::domain::record::{EncodedRecord, RecordOrigin};
use crate::infra::record_store::RecordStore;

pub const SENSES_FILE: &str = "senses.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenseSummary {
    pub sense_id: String,
    pub lemma: String,
    pub supersense: String,
    pub hypersenses: Vec<String>,
    pub has_definition: bool,
    pub has_definition_only: bool,
    pub examples: usize,
}

pub struct SensesUseCase {
    output_dir: String,
}

impl SensesUseCase {
    pub fn new(output_dir: impl Into<String>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn execute(&self) -> Result<Vec<SenseSummary>> {
        let store   = RecordStore::new(&self.output_dir)?;
        let records = store.load_records()?;

        let (definitions, examples): (Vec<EncodedRecord>, Vec<EncodedRecord>) = records
            .into_iter()
            .partition(|r| r.origin == RecordOrigin::Definition);

        let summaries: Vec<SenseSummary> =
            PerSenseGrouper::<NdArray>::new(&definitions, &examples, Default::default())
                .map(|group| SenseSummary {
                    sense_id: group.sense_id,
                    lemma: group.lemma,
                    supersense: group.label.name().to_string(),
                    hypersenses: group.label.hypersenses().iter().map(|h| h.name().to_string()).collect(),
                    has_definition: group.definition.is_some(),
                    has_definition_only: group.definition_only.is_some(),
                    examples: group.examples.len(),
                })
                .collect();

        tracing::info!("Summarised {} senses", summaries.len());
        store.save_json(SENSES_FILE, &summaries)?;
        Ok(summaries)
    }
}
