// ============================================================
// Layer 3 — EncodedRecord
// ============================================================
// The output of an encoding policy for one source row:
//
//   [<s>] window of sub-tokens [<pad>]... [</s>]
//
// token_ids always has exactly `max_length` entries, and
// target_index points at the target sub-token inside it
// (0 — the leading marker — for definitions, which have no
// target word).
//
// Records are never mutated after encoding. Shuffling moves
// them around and batching groups them; neither touches the
// content.

use serde::{Deserialize, Serialize};

use crate::domain::supersense::Supersense;

/// Which sheet a record was encoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    Definition,
    Example,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedRecord {
    /// Wrapped, padded sub-token window — length `max_length`
    pub token_ids: Vec<u32>,

    /// Position of the target sub-token within token_ids
    pub target_index: usize,

    pub label: Supersense,

    pub sense_id: String,

    /// Lemma with underscores already replaced by spaces
    pub lemma: String,

    pub origin: RecordOrigin,

    /// Definitions only: the same definition encoded without the
    /// "<lemma> :" prefix, shaped identically to token_ids
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_only: Option<Vec<u32>>,
}

impl EncodedRecord {
    /// Class id fed to the classifier.
    pub fn label_id(&self) -> usize {
        self.label.index()
    }

    /// The sub-token id the target index points at.
    pub fn target_token(&self) -> Option<u32> {
        self.token_ids.get(self.target_index).copied()
    }

    pub fn len(&self) -> usize {
        self.token_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }
}
