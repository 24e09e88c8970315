use std::collections::BTreeMap;

use burn::data::dataset::Dataset;

use crate::domain::record::EncodedRecord;
use crate::domain::supersense::Hypersense;

/// All encoded records of one partition.
pub struct EncodedDataset {
    records: Vec<EncodedRecord>,
}

impl EncodedDataset {
    pub fn new(records: Vec<EncodedRecord>) -> Self { Self { records } }

    pub fn records(&self) -> &[EncodedRecord] { &self.records }

    /// Number of distinct sense ids.
    pub fn sense_count(&self) -> usize {
        let mut ids: Vec<&str> = self.records.iter().map(|r| r.sense_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }

    /// Compound supersenses count once towards each of their groups.
    pub fn hypersense_counts(&self) -> BTreeMap<Hypersense, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.records {
            for h in r.label.hypersenses() {
                *counts.entry(*h).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl Dataset<EncodedRecord> for EncodedDataset {
    fn get(&self, index: usize) -> Option<EncodedRecord> {
        self.records.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
