// ============================================================
// Layer 4 — Target Window
// ============================================================
// Bounds a flat sub-token sequence to `max_length` positions
// without losing the annotated target. Three steps, always in
// this order:
//
//   1. truncate — keep a window of at most C = max_length - 2
//                 sub-tokens, centred on the target when possible
//   2. pad      — right-pad the window to exactly C
//   3. wrap     — [<s>] window [</s>], target index + 1
//
// Wrapping before padding would leave </s> in the middle of the
// sequence with pads after it, so pad always comes first.
//
// Window placement for a sequence longer than C:
//
//   half  = C / 2
//   start = clamp(target - half, 0, len - C)
//   end   = start + C
//
// Example with C = 6, len = 9, target = 2:
//   start = clamp(-1, 0, 3) = 0   → window [0..6), target stays 2
// and with target = 8:
//   start = clamp(5, 0, 3)  = 3   → window [3..9), target becomes 5
//
// The clamp on `start` keeps the window inside the sequence at
// both ends; a second clamp keeps the remapped index inside the
// window even for a target that was out of bounds to begin with.

use crate::domain::config::EncoderConfig;

/// Keep at most `capacity` sub-tokens around `target_index`.
///
/// Returns the window and the target index relative to it.
/// Sequences that already fit are returned unchanged, index
/// included.
pub fn truncate(sequence: &[u32], target_index: usize, capacity: usize) -> (Vec<u32>, usize) {
    if sequence.len() <= capacity {
        return (sequence.to_vec(), target_index);
    }

    let half  = capacity / 2;
    let start = target_index.saturating_sub(half).min(sequence.len() - capacity);
    let end   = start + capacity;

    let index = target_index
        .saturating_sub(start)
        .min(capacity.saturating_sub(1));

    (sequence[start..end].to_vec(), index)
}

/// Right-pad to `capacity` with `pad_id`. No-op when already full.
pub fn pad(mut sequence: Vec<u32>, capacity: usize, pad_id: u32) -> Vec<u32> {
    if sequence.len() < capacity {
        sequence.resize(capacity, pad_id);
    }
    sequence
}

/// Surround with boundary markers.
///
/// The leading marker shifts every position by one; the trailing
/// marker sits after all content and shifts nothing.
pub fn wrap(
    sequence: Vec<u32>,
    target_index: Option<usize>,
    leading_marker_id: u32,
    trailing_marker_id: u32,
) -> (Vec<u32>, Option<usize>) {
    let mut wrapped = Vec::with_capacity(sequence.len() + 2);
    wrapped.push(leading_marker_id);
    wrapped.extend(sequence);
    wrapped.push(trailing_marker_id);

    (wrapped, target_index.map(|i| i + 1))
}

/// Truncate → pad → wrap with the index threaded through.
///
/// Definitions carry no target; pass `None` and the window is
/// placed as if the target were 0, so long definitions keep their
/// beginning. The returned index is `None` as well.
pub fn frame(sequence: &[u32], target_index: Option<usize>, cfg: &EncoderConfig) -> (Vec<u32>, Option<usize>) {
    let capacity = cfg.capacity();
    let (window, index) = truncate(sequence, target_index.unwrap_or(0), capacity);
    let padded = pad(window, capacity, cfg.pad_id);
    wrap(
        padded,
        target_index.map(|_| index),
        cfg.leading_marker_id,
        cfg.trailing_marker_id,
    )
}
