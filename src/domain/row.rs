// ============================================================
// Layer 3 — Tabular Rows
// ============================================================
// One struct per spreadsheet sheet, as exported to JSON Lines.
// Fields keep their raw annotation form (supersense as text,
// word rank as a signed integer with -1 meaning "no target");
// validation happens in the row filter and again at the
// encoder boundary.

use serde::{Deserialize, Serialize};

/// A row of the `senses` sheet: one dictionary sense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionRow {
    pub sense_id: String,

    /// Multi-word lemmas are written with underscores
    pub lemma: String,

    #[serde(default)]
    pub definition: Option<String>,

    pub supersense: String,

    /// Dataset partition: train, freq-dev, rand-dev, freq-test, rand-test
    #[serde(rename = "set")]
    pub partition: String,

    #[serde(default)]
    pub ann_stage: Option<String>,
}

/// A row of the `examples` sheet: one usage sentence of a sense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleRow {
    pub sense_id: String,

    pub lemma: String,

    /// Words joined by single spaces; `##` joins the parts of a
    /// multi-word expression that counts as one word
    #[serde(default)]
    pub example: Option<String>,

    /// 0-based index of the target word, -1 when unannotated
    pub word_rank: i64,

    pub supersense: String,

    #[serde(rename = "set")]
    pub partition: String,

    #[serde(default, alias = "ann")]
    pub ann_stage: Option<String>,
}

/// Both sheets restricted to one partition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionRows {
    pub definitions: Vec<DefinitionRow>,
    pub examples:    Vec<ExampleRow>,
}

impl PartitionRows {
    pub fn new(definitions: Vec<DefinitionRow>, examples: Vec<ExampleRow>) -> Self {
        Self { definitions, examples }
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.examples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_row_accepts_ann_column() {
        let json = r#"{"sense_id":"s1","lemma":"chat","example":"le chat dort",
                       "word_rank":1,"supersense":"animal","set":"train","ann":"2"}"#;
        let row: ExampleRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.partition, "train");
        assert_eq!(row.ann_stage.as_deref(), Some("2"));
    }

    #[test]
    fn test_missing_definition_deserialises_as_none() {
        let json = r#"{"sense_id":"s1","lemma":"chat","supersense":"animal","set":"train"}"#;
        let row: DefinitionRow = serde_json::from_str(json).unwrap();
        assert!(row.definition.is_none());
        assert!(row.ann_stage.is_none());
    }
}
