// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Malformed rows are supposed to be filtered out before they
// reach an encoder. When one slips through anyway, encoding
// stops on it immediately: no partial record collection and
// no degraded batches are ever produced.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown supersense label '{0}'")]
    UnknownSupersense(String),

    #[error("sense '{sense_id}' has an empty {field}")]
    EmptyText { sense_id: String, field: &'static str },

    #[error("example of sense '{sense_id}' has negative word rank {rank}")]
    NegativeWordRank { sense_id: String, rank: i64 },

    #[error("word rank {rank} is out of range for a sentence of {words} words")]
    WordRankOutOfRange { rank: usize, words: usize },

    #[error("target word at rank {rank} produced no sub-tokens")]
    EmptyTargetWord { rank: usize },

    #[error("records have mixed lengths ({expected} and {found}); pad them before batching")]
    RaggedRecords { expected: usize, found: usize },

    #[error("target index {index} lies outside a record of length {len}")]
    TargetOutsideRecord { index: usize, len: usize },

    #[error("tokenizer failed on '{input}': {reason}")]
    Tokenizer { input: String, reason: String },
}
