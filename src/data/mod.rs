// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the annotation sheets and the numeric
// batches the classifier consumes.
//
//   senses.jsonl / examples.jsonl
//       │
//       ▼
//   JsonlLoader       → reads the exported sheets
//       │
//       ▼
//   RowFilter         → keeps valid rows of one partition
//       │               (sampler optionally subsamples them)
//       ▼
//   Preprocessor      → lemma display form, word segmentation
//       │
//       ▼
//   EncodingPolicy    → definition / example / combined
//       │               uses alignment (token rank, flatten)
//       │               and window (truncate, pad, wrap)
//       ▼
//   EncodedDataset    → burn Dataset over EncodedRecords
//       │
//       ├──► BatchIterator   → fixed-size SupersenseBatches
//       └──► PerSenseGrouper → one SenseGroup per sense id
//
// Each module does one step and is tested on its own.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads the annotation sheets from JSON Lines files
pub mod loader;

/// Drops invalid rows and restricts to one partition
pub mod filter;

/// Random subsampling of filtered rows
pub mod sampler;

/// Lemma and example-text normalisation
pub mod preprocessor;

/// Word-to-sub-token alignment and flattening
pub mod alignment;

/// Target-preserving truncation, padding and marker wrapping
pub mod window;

/// The three record encoding policies
pub mod encoder;

/// Implements Burn's Dataset trait for encoded records
pub mod dataset;

/// Tensor batches and the fixed-size batch iterator
pub mod batcher;

/// Per-sense grouping for inference
pub mod grouper;

#[cfg(test)]
pub(crate) mod testing;
