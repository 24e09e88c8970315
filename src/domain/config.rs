// ============================================================
// Layer 3 — Encoder Configuration
// ============================================================
// One value shared by every stage of the windowing pipeline.
// It is passed explicitly to each component rather than read
// from module-level constants.
//
// Defaults match the FlauBERT vocabulary the data was built
// for: <s> = 0, </s> = 1, <pad> = 2, 100 positions.

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;

/// Two positions are always reserved for the boundary markers.
pub const RESERVED_MARKER_SLOTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Final sequence length, boundary markers included
    pub max_length: usize,

    /// Id appended on the right until a window reaches capacity
    pub pad_id: u32,

    /// Id placed before the content (classifier token)
    pub leading_marker_id: u32,

    /// Id placed after the padded content (separator token)
    pub trailing_marker_id: u32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_length:         100,
            pad_id:             2,
            leading_marker_id:  0,
            trailing_marker_id: 1,
        }
    }
}

impl EncoderConfig {
    /// Room left for real sub-tokens once both markers are placed.
    pub fn capacity(&self) -> usize {
        self.max_length.saturating_sub(RESERVED_MARKER_SLOTS)
    }

    /// A window must hold at least the target sub-token.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.capacity() == 0 {
            return Err(PipelineError::InvalidConfig(format!(
                "max_length must be at least {}, got {}",
                RESERVED_MARKER_SLOTS + 1,
                self.max_length
            )));
        }
        Ok(())
    }
}
