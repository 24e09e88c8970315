// ============================================================
// Layer 4 — Record Encoders
// ============================================================
// One policy per dataset shape, all built from the same
// stateless primitives (alignment + window):
//
//   DefinitionPolicy — "<lemma> : <definition>" and the bare
//                      definition, no target (index 0)
//   ExamplePolicy    — word-segmented sentence, target word
//                      mapped to its first sub-token, then
//                      Flatten → Truncate → Pad → Wrap
//   CombinedPolicy   — definitions followed by examples, one
//                      record collection
//
// Rows are validated as they are encoded. The first bad row
// aborts the whole partition with a PipelineError; a policy
// returns either every record or none.

use serde::{Deserialize, Serialize};

use crate::data::alignment::{flatten, target_offset};
use crate::data::preprocessor::Preprocessor;
use crate::data::window::frame;
use crate::domain::config::EncoderConfig;
use crate::domain::error::PipelineError;
use crate::domain::record::{EncodedRecord, RecordOrigin};
use crate::domain::row::{DefinitionRow, ExampleRow, PartitionRows};
use crate::domain::supersense::Supersense;
use crate::domain::traits::SubTokenizer;

// ─── EncodingPolicy ───────────────────────────────────────────────────────────
/// Turns the rows of one partition into encoded records.
pub trait EncodingPolicy {
    fn name(&self) -> &'static str;

    fn encode(&self, rows: &PartitionRows) -> Result<Vec<EncodedRecord>, PipelineError>;
}

/// Selects a policy by name (CLI / config).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    Definition,
    Example,
    Combined,
}

impl PolicyKind {
    pub fn build<'t>(
        self,
        tokenizer: &'t dyn SubTokenizer,
        config: EncoderConfig,
    ) -> Result<Box<dyn EncodingPolicy + 't>, PipelineError> {
        Ok(match self {
            PolicyKind::Definition => Box::new(DefinitionPolicy::new(tokenizer, config)?),
            PolicyKind::Example    => Box::new(ExamplePolicy::new(tokenizer, config)?),
            PolicyKind::Combined   => Box::new(CombinedPolicy::new(tokenizer, config)?),
        })
    }
}

// ─── Shared helpers ───────────────────────────────────────────────────────────
fn parse_label(supersense: &str) -> Result<Supersense, PipelineError> {
    supersense.parse()
}

fn require_text<'r>(
    text: &'r Option<String>,
    sense_id: &str,
    field: &'static str,
) -> Result<&'r str, PipelineError> {
    match text.as_deref() {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(PipelineError::EmptyText { sense_id: sense_id.to_string(), field }),
    }
}

/// [`frame`] every sequence of a collection. Returns the framed
/// sequences and the wrapped target indices.
fn frame_all(
    sequences: &[Vec<u32>],
    targets: Option<&[usize]>,
    cfg: &EncoderConfig,
) -> (Vec<Vec<u32>>, Vec<usize>) {
    let capacity  = cfg.capacity();
    let truncated = sequences.iter().filter(|s| s.len() > capacity).count();
    if truncated > 0 {
        tracing::debug!("Truncated {} of {} sequences to {} sub-tokens", truncated, sequences.len(), capacity);
    }

    sequences
        .iter()
        .enumerate()
        .map(|(i, sequence)| {
            let target = targets.map(|t| t.get(i).copied().unwrap_or(0));
            let (ids, target) = frame(sequence, target, cfg);
            // Definitions point at the leading marker
            (ids, target.unwrap_or(0))
        })
        .unzip()
}

// ─── DefinitionPolicy ─────────────────────────────────────────────────────────
pub struct DefinitionPolicy<'t> {
    tokenizer: &'t dyn SubTokenizer,
    config: EncoderConfig,
    prep: Preprocessor,
}

impl<'t> DefinitionPolicy<'t> {
    pub fn new(tokenizer: &'t dyn SubTokenizer, config: EncoderConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { tokenizer, config, prep: Preprocessor::new() })
    }

    pub fn encode_rows(&self, rows: &[DefinitionRow]) -> Result<Vec<EncodedRecord>, PipelineError> {
        let mut labels      = Vec::with_capacity(rows.len());
        let mut lemmas      = Vec::with_capacity(rows.len());
        let mut with_lemma  = Vec::with_capacity(rows.len());
        let mut bare        = Vec::with_capacity(rows.len());

        for row in rows {
            let label      = parse_label(&row.supersense)?;
            let definition = self.prep.clean(require_text(&row.definition, &row.sense_id, "definition")?);
            let lemma      = self.prep.lemma(&row.lemma);

            with_lemma.push(self.tokenizer.encode_text(&format!("{lemma} : {definition}"), false)?);
            bare.push(self.tokenizer.encode_text(&definition, false)?);
            labels.push(label);
            lemmas.push(lemma);
        }

        let (with_lemma, _) = frame_all(&with_lemma, None, &self.config);
        let (bare, _)       = frame_all(&bare, None, &self.config);

        Ok(rows
            .iter()
            .zip(labels)
            .zip(lemmas)
            .zip(with_lemma.into_iter().zip(bare))
            .map(|(((row, label), lemma), (token_ids, definition_only))| EncodedRecord {
                token_ids,
                target_index: 0,
                label,
                sense_id: row.sense_id.clone(),
                lemma,
                origin: RecordOrigin::Definition,
                definition_only: Some(definition_only),
            })
            .collect())
    }
}

impl EncodingPolicy for DefinitionPolicy<'_> {
    fn name(&self) -> &'static str {
        "definition"
    }

    fn encode(&self, rows: &PartitionRows) -> Result<Vec<EncodedRecord>, PipelineError> {
        self.encode_rows(&rows.definitions)
    }
}

// ─── ExamplePolicy ────────────────────────────────────────────────────────────
pub struct ExamplePolicy<'t> {
    tokenizer: &'t dyn SubTokenizer,
    config: EncoderConfig,
    prep: Preprocessor,
}

impl<'t> ExamplePolicy<'t> {
    pub fn new(tokenizer: &'t dyn SubTokenizer, config: EncoderConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { tokenizer, config, prep: Preprocessor::new() })
    }

    /// Flat sub-token sequence of one example and the offset of
    /// its target word.
    fn align(&self, row: &ExampleRow) -> Result<(Vec<u32>, usize), PipelineError> {
        let text = require_text(&row.example, &row.sense_id, "example")?;
        let rank = usize::try_from(row.word_rank).map_err(|_| PipelineError::NegativeWordRank {
            sense_id: row.sense_id.clone(),
            rank:     row.word_rank,
        })?;

        let groups = self
            .prep
            .segment(text)
            .iter()
            .map(|word| self.tokenizer.encode_word(word))
            .collect::<Result<Vec<_>, _>>()?;

        let offset = target_offset(&groups, rank)?;
        Ok((flatten(&groups), offset))
    }

    pub fn encode_rows(&self, rows: &[ExampleRow]) -> Result<Vec<EncodedRecord>, PipelineError> {
        let mut labels  = Vec::with_capacity(rows.len());
        let mut flats   = Vec::with_capacity(rows.len());
        let mut offsets = Vec::with_capacity(rows.len());

        for row in rows {
            labels.push(parse_label(&row.supersense)?);
            let (flat, offset) = self.align(row)?;
            flats.push(flat);
            offsets.push(offset);
        }

        let (framed, targets) = frame_all(&flats, Some(&offsets), &self.config);

        Ok(rows
            .iter()
            .zip(labels)
            .zip(framed.into_iter().zip(targets))
            .map(|((row, label), (token_ids, target_index))| EncodedRecord {
                token_ids,
                target_index,
                label,
                sense_id: row.sense_id.clone(),
                lemma: self.prep.lemma(&row.lemma),
                origin: RecordOrigin::Example,
                definition_only: None,
            })
            .collect())
    }
}

impl EncodingPolicy for ExamplePolicy<'_> {
    fn name(&self) -> &'static str {
        "example"
    }

    fn encode(&self, rows: &PartitionRows) -> Result<Vec<EncodedRecord>, PipelineError> {
        self.encode_rows(&rows.examples)
    }
}

// ─── CombinedPolicy ───────────────────────────────────────────────────────────
pub struct CombinedPolicy<'t> {
    definitions: DefinitionPolicy<'t>,
    examples: ExamplePolicy<'t>,
}

impl<'t> CombinedPolicy<'t> {
    pub fn new(tokenizer: &'t dyn SubTokenizer, config: EncoderConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            definitions: DefinitionPolicy::new(tokenizer, config)?,
            examples:    ExamplePolicy::new(tokenizer, config)?,
        })
    }
}

impl EncodingPolicy for CombinedPolicy<'_> {
    fn name(&self) -> &'static str {
        "combined"
    }

    fn encode(&self, rows: &PartitionRows) -> Result<Vec<EncodedRecord>, PipelineError> {
        let mut records: Vec<EncodedRecord> = self
            .definitions
            .encode_rows(&rows.definitions)?
            .into_iter()
            .map(|r| EncodedRecord { definition_only: None, ..r })
            .collect();
        records.extend(self.examples.encode_rows(&rows.examples)?);
        Ok(records)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::{definition, example, id, CharTokenizer};

    fn cfg(max_length: usize) -> EncoderConfig {
        EncoderConfig { max_length, ..EncoderConfig::default() }
    }

    #[test]
    fn test_example_target_points_at_first_sub_token() {
        let tok    = CharTokenizer;
        let policy = ExamplePolicy::new(&tok, cfg(8)).unwrap();
        let rows   = [example("s1", "chat", "le chat dort", 1, "animal")];

        let records = policy.encode_rows(&rows).unwrap();
        let r = &records[0];

        // flat = l e c h a t d o r t, window = first 6
        assert_eq!(
            r.token_ids,
            vec![0, id('l'), id('e'), id('c'), id('h'), id('a'), id('t'), 1]
        );
        assert_eq!(r.target_index, 3);
        assert_eq!(r.target_token(), Some(id('c')));
        assert_eq!(r.label, Supersense::Animal);
        assert_eq!(r.origin, RecordOrigin::Example);
    }

    #[test]
    fn test_example_window_follows_late_target() {
        let tok    = CharTokenizer;
        let policy = ExamplePolicy::new(&tok, cfg(8)).unwrap();
        let rows   = [example("s1", "dormir", "le chat dort", 2, "act")];

        let r = &policy.encode_rows(&rows).unwrap()[0];
        assert_eq!(r.len(), 8);
        assert_eq!(r.target_token(), Some(id('d')));
        assert_eq!(r.target_index, 4);
    }

    #[test]
    fn test_short_example_is_padded_before_trailing_marker() {
        let tok    = CharTokenizer;
        let policy = ExamplePolicy::new(&tok, cfg(10)).unwrap();
        let rows   = [example("s1", "il", "il a", 0, "person")];

        let r = &policy.encode_rows(&rows).unwrap()[0];
        assert_eq!(r.token_ids, vec![0, id('i'), id('l'), id('a'), 2, 2, 2, 2, 2, 1]);
        assert_eq!(r.target_index, 1);
    }

    #[test]
    fn test_merged_word_counts_as_one_rank() {
        let tok    = CharTokenizer;
        let policy = ExamplePolicy::new(&tok, cfg(40)).unwrap();
        let rows   = [example("s1", "pomme_de_terre", "une pomme##de##terre cuite", 2, "food")];

        let r = &policy.encode_rows(&rows).unwrap()[0];
        assert_eq!(r.target_token(), Some(id('c')));
        assert_eq!(r.lemma, "pomme de terre");
    }

    #[test]
    fn test_definition_pair() {
        let tok    = CharTokenizer;
        let policy = DefinitionPolicy::new(&tok, cfg(8)).unwrap();
        let rows   = [definition("s1", "chat", "félin", "animal")];

        let r = &policy.encode_rows(&rows).unwrap()[0];
        // "chat : félin" → c h a t : f é l i n, truncated to 6 from the start
        assert_eq!(
            r.token_ids,
            vec![0, id('c'), id('h'), id('a'), id('t'), id(':'), id('f'), 1]
        );
        assert_eq!(r.target_index, 0);
        assert_eq!(
            r.definition_only.as_deref(),
            Some(&[0, id('f'), id('é'), id('l'), id('i'), id('n'), 2, 1][..])
        );
        assert_eq!(r.origin, RecordOrigin::Definition);
    }

    #[test]
    fn test_combined_puts_definitions_first() {
        let tok    = CharTokenizer;
        let policy = CombinedPolicy::new(&tok, cfg(12)).unwrap();
        let rows   = PartitionRows::new(
            vec![definition("s1", "chat", "félin", "animal")],
            vec![
                example("s1", "chat", "le chat dort", 1, "animal"),
                example("s1", "chat", "un chat", 1, "animal"),
            ],
        );

        let records = policy.encode(&rows).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].origin, RecordOrigin::Definition);
        assert_eq!(records[0].target_index, 0);
        assert!(records[0].definition_only.is_none());
        assert!(records.iter().all(|r| r.len() == 12));
        assert!(records[1..].iter().all(|r| r.target_token() == Some(id('c'))));
    }

    #[test]
    fn test_policy_kind_dispatch() {
        let tok  = CharTokenizer;
        let rows = PartitionRows::new(
            vec![definition("s1", "chat", "félin", "animal")],
            vec![example("s1", "chat", "le chat", 1, "animal")],
        );
        for (kind, expected) in [
            (PolicyKind::Definition, 1),
            (PolicyKind::Example, 1),
            (PolicyKind::Combined, 2),
        ] {
            let policy = kind.build(&tok, cfg(20)).unwrap();
            assert_eq!(policy.encode(&rows).unwrap().len(), expected, "{}", policy.name());
        }
    }

    #[test]
    fn test_invalid_rows_fail_fast() {
        let tok    = CharTokenizer;
        let policy = ExamplePolicy::new(&tok, cfg(20)).unwrap();

        let unknown = [example("s1", "chat", "le chat", 1, "feline")];
        assert_eq!(
            policy.encode_rows(&unknown),
            Err(PipelineError::UnknownSupersense("feline".into()))
        );

        let negative = [example("s1", "chat", "le chat", -1, "animal")];
        assert!(matches!(policy.encode_rows(&negative), Err(PipelineError::NegativeWordRank { rank: -1, .. })));

        let past_end = [example("s1", "chat", "le chat", 2, "animal")];
        assert!(matches!(policy.encode_rows(&past_end), Err(PipelineError::WordRankOutOfRange { .. })));

        // Double space: word 1 is empty
        let empty_target = [example("s1", "chat", "le  chat", 1, "animal")];
        assert_eq!(
            policy.encode_rows(&empty_target),
            Err(PipelineError::EmptyTargetWord { rank: 1 })
        );

        let mut blank = example("s1", "chat", "x", 0, "animal");
        blank.example = Some("  ".into());
        assert!(matches!(policy.encode_rows(&[blank]), Err(PipelineError::EmptyText { .. })));
    }

    #[test]
    fn test_one_bad_row_discards_the_partition() {
        let tok    = CharTokenizer;
        let policy = DefinitionPolicy::new(&tok, cfg(20)).unwrap();
        let mut rows = vec![definition("s1", "chat", "félin", "animal")];
        let mut bad  = definition("s2", "chien", "canidé", "animal");
        bad.definition = None;
        rows.push(bad);

        assert!(policy.encode_rows(&rows).is_err());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let tok = CharTokenizer;
        assert!(matches!(
            ExamplePolicy::new(&tok, cfg(2)),
            Err(PipelineError::InvalidConfig(_))
        ));
    }
}
