// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust types and traits describing what the pipeline
// works on. Nothing in here touches burn, the filesystem or
// a concrete tokenizer.
//
//   supersense.rs — the controlled label set (24 supersenses)
//                   and its coarse hypersense grouping
//   row.rs        — rows as exported from the annotated
//                   spreadsheet (senses sheet, examples sheet)
//   record.rs     — EncodedRecord, the fixed-length output of
//                   an encoding policy
//   config.rs     — EncoderConfig (max length, pad and marker ids)
//   error.rs      — PipelineError, raised at the encoder boundary
//   traits.rs     — RowSource and SubTokenizer abstractions
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

pub mod config;

pub mod error;

pub mod record;

pub mod row;

pub mod supersense;

pub mod traits;
