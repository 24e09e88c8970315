// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Persistence shared by the use cases:
//
//   tokenizer_store.rs — Tokenizer persistence
//                        Loads tokenizer.json, or builds a
//                        word-level one from the corpus with
//                        the marker ids reserved. Also adapts
//                        it to the SubTokenizer trait.
//
//   record_store.rs    — Encoding outputs
//                        Saves the run config as JSON and the
//                        encoded records as JSON Lines.
//
//   report.rs          — Encoding report
//                        Appends per-run counts (records,
//                        batches, truncations) to a CSV file.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Tokenizer building, saving, and loading
pub mod tokenizer_store;

/// Encoded record and config persistence
pub mod record_store;

/// Encoding report CSV logger
pub mod report;
