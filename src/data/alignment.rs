// ============================================================
// Layer 4 — Word / Sub-token Alignment
// ============================================================
// Annotations index words; the classifier sees sub-tokens.
// Each word is tokenized on its own, which gives one group of
// sub-token ids per word:
//
//   words:   le      chat        dort
//   groups:  [17]    [412, 9]    [88]
//   flat:    [17, 412, 9, 88]
//
// The target word "chat" (word rank 1) starts at sub-token
// offset 1 = len(groups[0]). In general the offset of word k is
// the summed length of the groups before it.

use crate::domain::error::PipelineError;

/// Sub-token offset of the first sub-token of `word_index`.
///
/// Pure: sums the group lengths before `word_index`. If the word
/// at `word_index` has an empty group the result points at the
/// next word's first sub-token; callers that care use
/// [`target_offset`].
pub fn token_rank(groups: &[Vec<u32>], word_index: usize) -> usize {
    groups.iter().take(word_index).map(Vec::len).sum()
}

/// Concatenate per-word groups in word order.
pub fn flatten(groups: &[Vec<u32>]) -> Vec<u32> {
    groups.concat()
}

/// Checked version of [`token_rank`] used at the encoder
/// boundary: the rank must name an existing word and that word
/// must have produced at least one sub-token.
pub fn target_offset(groups: &[Vec<u32>], word_index: usize) -> Result<usize, PipelineError> {
    match groups.get(word_index) {
        None => Err(PipelineError::WordRankOutOfRange {
            rank:  word_index,
            words: groups.len(),
        }),
        Some(group) if group.is_empty() => Err(PipelineError::EmptyTargetWord { rank: word_index }),
        Some(_) => Ok(token_rank(groups, word_index)),
    }
}
