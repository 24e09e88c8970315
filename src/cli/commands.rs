// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `encode` and `senses`, and all
// their configurable flags.
//
// Policy and sub-corpus choices are clap ValueEnums here and
// are converted to the data-layer enums at the boundary, so
// nothing below Layer 1 depends on clap.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::encode_use_case::EncodeConfig;
use crate::data::encoder::PolicyKind;
use crate::data::filter::SubCorpus;
use crate::domain::config::EncoderConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode one partition of the annotated senses into
    /// fixed-length records
    Encode(EncodeArgs),

    /// Summarise a previous encode run per sense
    Senses(SensesArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyArg {
    /// "<lemma> : <definition>" records, no target word
    Definition,
    /// Example sentences with the target word located
    Example,
    /// Definitions followed by examples
    Combined,
}

impl From<PolicyArg> for PolicyKind {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Definition => PolicyKind::Definition,
            PolicyArg::Example    => PolicyKind::Example,
            PolicyArg::Combined   => PolicyKind::Combined,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubCorpusArg {
    Wiki,
    Frsemcor,
}

impl From<SubCorpusArg> for SubCorpus {
    fn from(s: SubCorpusArg) -> Self {
        match s {
            SubCorpusArg::Wiki     => SubCorpus::Wiki,
            SubCorpusArg::Frsemcor => SubCorpus::Frsemcor,
        }
    }
}

/// All arguments for the `encode` command.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Directory containing senses.jsonl and examples.jsonl
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    /// Where records, config and report are written
    #[arg(long, default_value = "encoded")]
    pub output_dir: String,

    /// Where tokenizer.json is loaded from, or built into
    #[arg(long, default_value = "tokenizer")]
    pub tokenizer_dir: String,

    /// train, freq-dev, rand-dev, freq-test or rand-test
    #[arg(long, default_value = "train")]
    pub partition: String,

    #[arg(long, value_enum, default_value_t = PolicyArg::Example)]
    pub policy: PolicyArg,

    /// Restrict to one origin of senses
    #[arg(long, value_enum)]
    pub sub_corpus: Option<SubCorpusArg>,

    /// Keep only rows from this annotation stage
    #[arg(long)]
    pub ann_stage: Option<String>,

    /// Keep at most this many rows per sheet after filtering
    #[arg(long)]
    pub sample_size: Option<usize>,

    #[arg(long, default_value_t = 16)]
    pub batch_size: usize,

    /// Shuffle records before cutting batches
    #[arg(long, default_value_t = false)]
    pub shuffle: bool,

    /// Seed for sampling and shuffling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Vocabulary size when a new tokenizer is built
    #[arg(long, default_value_t = 30000)]
    pub vocab_size: usize,

    /// Total record length including both boundary markers
    #[arg(long, default_value_t = 100)]
    pub max_length: usize,

    #[arg(long, default_value_t = 2)]
    pub pad_id: u32,

    #[arg(long, default_value_t = 0)]
    pub leading_marker_id: u32,

    #[arg(long, default_value_t = 1)]
    pub trailing_marker_id: u32,
}

/// Boundary between Layer 1 and Layer 2: the application layer
/// never sees clap types.
impl From<EncodeArgs> for EncodeConfig {
    fn from(a: EncodeArgs) -> Self {
        EncodeConfig {
            data_dir:      a.data_dir,
            output_dir:    a.output_dir,
            tokenizer_dir: a.tokenizer_dir,
            partition:     a.partition,
            policy:        a.policy.into(),
            sub_corpus:    a.sub_corpus.map(Into::into),
            ann_stage:     a.ann_stage,
            sample_size:   a.sample_size,
            batch_size:    a.batch_size,
            shuffle:       a.shuffle,
            seed:          a.seed,
            vocab_size:    a.vocab_size,
            encoder: EncoderConfig {
                max_length:         a.max_length,
                pad_id:             a.pad_id,
                leading_marker_id:  a.leading_marker_id,
                trailing_marker_id: a.trailing_marker_id,
            },
        }
    }
}

/// All arguments for the `senses` command
#[derive(Args, Debug)]
pub struct SensesArgs {
    /// Output directory of a previous encode run
    #[arg(long, default_value = "encoded")]
    pub output_dir: String,
}
