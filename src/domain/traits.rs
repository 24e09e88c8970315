// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The two external collaborators the pipeline depends on,
// expressed as traits so the encoder never sees a concrete
// file format or tokenizer library:
//
//   RowSource    — supplies the annotated rows
//                  (JsonlLoader reads the spreadsheet export)
//   SubTokenizer — maps a word or a text to sub-token ids
//                  (HfSubTokenizer wraps a HuggingFace tokenizer;
//                  tests use a small deterministic fake)
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::error::PipelineError;
use crate::domain::row::{DefinitionRow, ExampleRow};

// ─── RowSource ────────────────────────────────────────────────────────────────
/// Any component that can load the two annotation sheets.
pub trait RowSource {
    /// All rows of the senses sheet, unfiltered.
    fn load_definitions(&self) -> Result<Vec<DefinitionRow>>;

    /// All rows of the examples sheet, unfiltered.
    fn load_examples(&self) -> Result<Vec<ExampleRow>>;
}

// ─── SubTokenizer ─────────────────────────────────────────────────────────────
/// Black-box sub-word tokenizer.
///
/// `encode_word` tokenizes one word in isolation and never adds
/// boundary markers; an unknown word may come back empty.
pub trait SubTokenizer {
    fn encode_word(&self, word: &str) -> Result<Vec<u32>, PipelineError>;

    fn encode_text(&self, text: &str, with_markers: bool) -> Result<Vec<u32>, PipelineError>;
}
