// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// run of a command.
//
// Rules for this layer:
//   - No windowing or tokenization logic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - No direct file formats (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Load → filter → encode → batch → save, for one partition
pub mod encode_use_case;

// Per-sense summary of a saved encoding run
pub mod senses_use_case;
