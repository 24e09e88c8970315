// ============================================================
// Layer 4 — Row Filter
// ============================================================
// Keeps only rows the encoders are allowed to see:
//
//   1. supersense is one of the 24 controlled labels
//   2. text field (definition / example) is present and non-blank
//   3. examples: word_rank >= 0 (-1 marks "no target")
//   4. partition ("set" column) matches the requested one
//   5. optional sub-corpus restriction on the sense id
//   6. optional annotation-stage restriction
//
// Every dropped row is counted and the totals are logged, so a
// run that silently loses half its data is visible in the logs.

use serde::{Deserialize, Serialize};

use crate::domain::row::{DefinitionRow, ExampleRow, PartitionRows};
use crate::domain::supersense::Supersense;

/// Sense ids from the FrSemCor corpus contain this marker.
pub const FRSEMCOR_MARKER: &str = "frsemcor";

/// Which origin of senses to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubCorpus {
    /// Wiktionary senses (sense id without the FrSemCor marker)
    Wiki,
    /// FrSemCor senses
    Frsemcor,
}

impl SubCorpus {
    pub fn contains(self, sense_id: &str) -> bool {
        let from_frsemcor = sense_id.contains(FRSEMCOR_MARKER);
        match self {
            SubCorpus::Wiki     => !from_frsemcor,
            SubCorpus::Frsemcor => from_frsemcor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    pub partition: String,
    pub sub_corpus: Option<SubCorpus>,
    pub ann_stage: Option<String>,
}

/// How many rows each rule removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropCounts {
    pub unknown_label: usize,
    pub empty_text: usize,
    pub no_target: usize,
    pub other_partition: usize,
    pub other_sub_corpus: usize,
    pub other_ann_stage: usize,
}

impl DropCounts {
    pub fn total(&self) -> usize {
        self.unknown_label
            + self.empty_text
            + self.no_target
            + self.other_partition
            + self.other_sub_corpus
            + self.other_ann_stage
    }
}

fn has_text(text: &Option<String>) -> bool {
    text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

impl RowFilter {
    pub fn new(partition: impl Into<String>) -> Self {
        Self { partition: partition.into(), sub_corpus: None, ann_stage: None }
    }

    pub fn with_sub_corpus(mut self, sub_corpus: Option<SubCorpus>) -> Self {
        self.sub_corpus = sub_corpus;
        self
    }

    pub fn with_ann_stage(mut self, ann_stage: Option<String>) -> Self {
        self.ann_stage = ann_stage;
        self
    }

    /// Shared checks for both sheets; counts the first rule that fails.
    fn check_common(
        &self,
        supersense: &str,
        partition: &str,
        sense_id: &str,
        ann_stage: Option<&str>,
        counts: &mut DropCounts,
    ) -> bool {
        if Supersense::from_name(supersense).is_none() {
            counts.unknown_label += 1;
            return false;
        }
        if partition != self.partition {
            counts.other_partition += 1;
            return false;
        }
        if let Some(sub) = self.sub_corpus {
            if !sub.contains(sense_id) {
                counts.other_sub_corpus += 1;
                return false;
            }
        }
        if let Some(stage) = &self.ann_stage {
            if ann_stage != Some(stage.as_str()) {
                counts.other_ann_stage += 1;
                return false;
            }
        }
        true
    }

    pub fn definitions(&self, rows: Vec<DefinitionRow>) -> (Vec<DefinitionRow>, DropCounts) {
        let mut counts = DropCounts::default();
        let kept = rows
            .into_iter()
            .filter(|r| {
                if !self.check_common(&r.supersense, &r.partition, &r.sense_id, r.ann_stage.as_deref(), &mut counts) {
                    return false;
                }
                if !has_text(&r.definition) {
                    counts.empty_text += 1;
                    return false;
                }
                true
            })
            .collect();
        (kept, counts)
    }

    pub fn examples(&self, rows: Vec<ExampleRow>) -> (Vec<ExampleRow>, DropCounts) {
        let mut counts = DropCounts::default();
        let kept = rows
            .into_iter()
            .filter(|r| {
                if !self.check_common(&r.supersense, &r.partition, &r.sense_id, r.ann_stage.as_deref(), &mut counts) {
                    return false;
                }
                if !has_text(&r.example) {
                    counts.empty_text += 1;
                    return false;
                }
                if r.word_rank < 0 {
                    counts.no_target += 1;
                    return false;
                }
                true
            })
            .collect();
        (kept, counts)
    }

    /// Filter both sheets and log what was dropped.
    pub fn apply(&self, rows: PartitionRows) -> PartitionRows {
        let (definitions, def_drops) = self.definitions(rows.definitions);
        let (examples, ex_drops)     = self.examples(rows.examples);

        tracing::info!(
            "Partition '{}': kept {} definitions ({} dropped), {} examples ({} dropped)",
            self.partition,
            definitions.len(),
            def_drops.total(),
            examples.len(),
            ex_drops.total(),
        );
        for (sheet, drops) in [("senses", def_drops), ("examples", ex_drops)] {
            if drops.unknown_label + drops.empty_text + drops.no_target > 0 {
                tracing::warn!(
                    "{}: dropped {} unknown labels, {} empty texts, {} without target",
                    sheet,
                    drops.unknown_label,
                    drops.empty_text,
                    drops.no_target,
                );
            }
        }

        PartitionRows::new(definitions, examples)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn def(sense_id: &str, supersense: &str, definition: Option<&str>, set: &str) -> DefinitionRow {
        DefinitionRow {
            sense_id:   sense_id.to_string(),
            lemma:      "chat".to_string(),
            definition: definition.map(str::to_string),
            supersense: supersense.to_string(),
            partition:  set.to_string(),
            ann_stage:  None,
        }
    }

    fn ex(sense_id: &str, rank: i64, example: Option<&str>) -> ExampleRow {
        ExampleRow {
            sense_id:   sense_id.to_string(),
            lemma:      "chat".to_string(),
            example:    example.map(str::to_string),
            word_rank:  rank,
            supersense: "animal".to_string(),
            partition:  "train".to_string(),
            ann_stage:  Some("1".to_string()),
        }
    }

    #[test]
    fn test_definition_rules() {
        let rows = vec![
            def("s1", "animal", Some("félin"), "train"),
            def("s2", "dog", Some("canidé"), "train"),
            def("s3", "animal", Some("   "), "train"),
            def("s4", "animal", None, "train"),
            def("s5", "animal", Some("félin"), "freq-dev"),
        ];
        let (kept, drops) = RowFilter::new("train").definitions(rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].sense_id, "s1");
        assert_eq!(drops.unknown_label, 1);
        assert_eq!(drops.empty_text, 2);
        assert_eq!(drops.other_partition, 1);
        assert_eq!(drops.total(), 4);
    }

    #[test]
    fn test_negative_rank_is_dropped() {
        let rows = vec![ex("s1", 0, Some("chat")), ex("s1", -1, Some("chat")), ex("s1", 2, None)];
        let (kept, drops) = RowFilter::new("train").examples(rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(drops.no_target, 1);
        assert_eq!(drops.empty_text, 1);
    }

    #[test]
    fn test_sub_corpus_restriction() {
        let rows = vec![ex("wiki_1", 0, Some("a")), ex("frsemcor_2", 0, Some("b"))];

        let wiki = RowFilter::new("train").with_sub_corpus(Some(SubCorpus::Wiki));
        let (kept, _) = wiki.examples(rows.clone());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].sense_id, "wiki_1");

        let frsemcor = RowFilter::new("train").with_sub_corpus(Some(SubCorpus::Frsemcor));
        let (kept, drops) = frsemcor.examples(rows);
        assert_eq!(kept[0].sense_id, "frsemcor_2");
        assert_eq!(drops.other_sub_corpus, 1);
    }

    #[test]
    fn test_ann_stage_restriction() {
        let rows = vec![ex("s1", 0, Some("a"))];
        let (kept, _) = RowFilter::new("train").with_ann_stage(Some("2".into())).examples(rows.clone());
        assert!(kept.is_empty());
        let (kept, _) = RowFilter::new("train").with_ann_stage(Some("1".into())).examples(rows);
        assert_eq!(kept.len(), 1);
    }
}
