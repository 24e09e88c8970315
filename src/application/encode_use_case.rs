// ============================================================
// Layer 2 — EncodeUseCase
// ============================================================
// Orchestrates one encoding run over a single partition:
//
//   Step 1: Load both sheets            (Layer 4 - data)
//   Step 2: Filter to the partition     (Layer 4 - data)
//   Step 3: Optional subsample          (Layer 4 - data)
//   Step 4: Build / load tokenizer      (Layer 6 - infra)
//   Step 5: Encode with the policy      (Layer 4 - data)
//   Step 6: Drain the batch iterator    (Layer 4 - data)
//   Step 7: Save config + records       (Layer 6 - infra)
//   Step 8: Append to the report        (Layer 6 - infra)
//
// Batches are materialised on the NdArray backend; nothing is
// trained here, the drain only proves every batch stacks.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §4 (Batcher)

use anyhow::{Context, Result};
use burn::backend::NdArray;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::{
    batcher::{BatchIterator, SupersenseBatcher},
    dataset::EncodedDataset,
    encoder::PolicyKind,
    filter::{RowFilter, SubCorpus},
    loader::JsonlLoader,
    preprocessor::Preprocessor,
    sampler::sample,
};
use crate::domain::{
    config::EncoderConfig,
    error::PipelineError,
    row::PartitionRows,
    traits::RowSource,
};
use crate::infra::{
    record_store::RecordStore,
    report::{EncodingStats, ReportLogger},
    tokenizer_store::{HfSubTokenizer, TokenizerStore},
};

type EncodeBackend = NdArray;

// ─── Encode Configuration ─────────────────────────────────────────────────────
// Everything one run needs. Saved as encode_config.json next to
// the records it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeConfig {
    pub data_dir:      String,
    pub output_dir:    String,
    pub tokenizer_dir: String,
    pub partition:     String,
    pub policy:        PolicyKind,
    pub sub_corpus:    Option<SubCorpus>,
    pub ann_stage:     Option<String>,
    pub sample_size:   Option<usize>,
    pub batch_size:    usize,
    pub shuffle:       bool,
    pub seed:          Option<u64>,
    pub vocab_size:    usize,
    pub encoder:       EncoderConfig,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            data_dir:      "data".to_string(),
            output_dir:    "encoded".to_string(),
            tokenizer_dir: "tokenizer".to_string(),
            partition:     "train".to_string(),
            policy:        PolicyKind::Example,
            sub_corpus:    None,
            ann_stage:     None,
            sample_size:   None,
            batch_size:    16,
            shuffle:       false,
            seed:          None,
            vocab_size:    30000,
            encoder:       EncoderConfig::default(),
        }
    }
}

impl EncodeConfig {
    /// Checked before any file is read.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.encoder.validate()?;
        if self.batch_size == 0 {
            return Err(PipelineError::InvalidConfig("batch_size must be greater than 0".into()));
        }
        Ok(())
    }
}

// ─── EncodeUseCase ────────────────────────────────────────────────────────────
pub struct EncodeUseCase {
    config: EncodeConfig,
}

impl EncodeUseCase {
    pub fn new(config: EncodeConfig) -> Self {
        Self { config }
    }

    /// Run against the JSON Lines sheets in `data_dir`.
    pub fn execute(&self) -> Result<EncodingStats> {
        let loader = JsonlLoader::new(&self.config.data_dir);
        self.execute_with(&loader)
    }

    pub fn execute_with(&self, source: &dyn RowSource) -> Result<EncodingStats> {
        let cfg = &self.config;
        cfg.validate()?;

        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };

        // ── Step 1: Load both sheets ──────────────────────────────────────────
        tracing::info!("Loading sheets from '{}'", cfg.data_dir);
        let rows = PartitionRows::new(source.load_definitions()?, source.load_examples()?);

        // ── Step 2: Filter to the requested partition ─────────────────────────
        let filter = RowFilter::new(cfg.partition.clone())
            .with_sub_corpus(cfg.sub_corpus)
            .with_ann_stage(cfg.ann_stage.clone());
        let mut rows = filter.apply(rows);

        // ── Step 3: Optional subsample ────────────────────────────────────────
        if let Some(size) = cfg.sample_size {
            rows = PartitionRows::new(
                sample(rows.definitions, size, &mut rng),
                sample(rows.examples, size, &mut rng),
            );
        }

        if rows.is_empty() {
            tracing::warn!("No rows left for partition '{}'", cfg.partition);
        }

        // ── Step 4: Build / load tokenizer ────────────────────────────────────
        let tokenizer = TokenizerStore::new(&cfg.tokenizer_dir)
            .load_or_build(&corpus_texts(&rows), cfg.vocab_size)?;
        let sub_tokenizer = HfSubTokenizer::new(tokenizer, &cfg.encoder);
        tracing::debug!("Tokenizer vocabulary holds {} entries", sub_tokenizer.vocab_size());

        // ── Step 5: Encode ────────────────────────────────────────────────────
        let policy  = cfg.policy.build(&sub_tokenizer, cfg.encoder)?;
        let records = policy
            .encode(&rows)
            .with_context(|| format!("Encoding partition '{}' failed", cfg.partition))?;
        let dataset = EncodedDataset::new(records);
        tracing::info!(
            "Encoded {} records over {} senses with the {} policy",
            dataset.records().len(),
            dataset.sense_count(),
            policy.name(),
        );
        for (hypersense, count) in dataset.hypersense_counts() {
            tracing::debug!("  {:<22} {}", hypersense.name(), count);
        }

        // ── Step 6: Drain the batch iterator ──────────────────────────────────
        let batcher = SupersenseBatcher::<EncodeBackend>::new(Default::default());
        let mut batches = BatchIterator::new(dataset.records(), cfg.batch_size, batcher)?;
        if cfg.shuffle {
            batches = batches.shuffled(&mut rng);
        }
        let (batch_count, last_batch_size) = batches
            .fold((0, 0), |(count, _), batch| (count + 1, batch.len()));
        tracing::info!("Built {} batches (last one holds {})", batch_count, last_batch_size);

        // ── Step 7: Save config + records ─────────────────────────────────────
        let store = RecordStore::new(&cfg.output_dir)?;
        store.save_config(cfg)?;
        store.save_records(dataset.records())?;

        // ── Step 8: Append to the report ──────────────────────────────────────
        let stats = EncodingStats {
            partition:       cfg.partition.clone(),
            policy:          policy.name().to_string(),
            records:         dataset.records().len(),
            senses:          dataset.sense_count(),
            batches:         batch_count,
            last_batch_size,
        };
        ReportLogger::new(&cfg.output_dir)?.log(&stats)?;

        Ok(stats)
    }
}

/// Texts the tokenizer vocabulary is built from, in the form the
/// encoders will tokenize them.
fn corpus_texts(rows: &PartitionRows) -> Vec<String> {
    let prep = Preprocessor::new();
    let mut texts = Vec::with_capacity(rows.definitions.len() + rows.examples.len());

    // Same "<lemma> : <definition>" text the definition policy
    // encodes; it covers the bare definition's words too
    for d in &rows.definitions {
        if let Some(definition) = &d.definition {
            texts.push(format!("{} : {}", prep.lemma(&d.lemma), prep.clean(definition)));
        }
    }
    for e in &rows.examples {
        if let Some(example) = &e.example {
            texts.push(prep.segment(example).join(" "));
        }
    }
    texts
}
