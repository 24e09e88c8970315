// ============================================================
// Layer 4 — Row Sampler
// ============================================================
// Draws a random subset of rows for quick runs on a slice of a
// partition (e.g. 32 senses and 32 examples).
//
// Uses Fisher-Yates via rand::seq::SliceRandom, then keeps the
// first `size` rows. Asking for more rows than exist returns
// all of them in shuffled order.
//
// Reference: rand crate documentation

use rand::{seq::SliceRandom, Rng};

/// Shuffle `rows` with `rng` and keep at most `size` of them.
pub fn sample<T, R: Rng + ?Sized>(mut rows: Vec<T>, size: usize, rng: &mut R) -> Vec<T> {
    let total = rows.len();
    rows.shuffle(rng);
    rows.truncate(size);

    tracing::debug!("Sampled {} of {} rows", rows.len(), total);
    rows
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_sample_size() {
        let mut rng = StdRng::seed_from_u64(7);
        let rows: Vec<usize> = (0..100).collect();
        assert_eq!(sample(rows, 32, &mut rng).len(), 32);
    }

    #[test]
    fn test_sample_is_a_subset_without_repeats() {
        let mut rng   = StdRng::seed_from_u64(7);
        let rows: Vec<usize> = (0..50).collect();
        let mut drawn = sample(rows, 20, &mut rng);
        drawn.sort_unstable();
        drawn.dedup();
        assert_eq!(drawn.len(), 20);
        assert!(drawn.iter().all(|&x| x < 50));
    }

    #[test]
    fn test_oversized_request_keeps_everything() {
        let mut rng = StdRng::seed_from_u64(7);
        let rows: Vec<usize> = (0..10).collect();
        let mut drawn = sample(rows, 32, &mut rng);
        drawn.sort_unstable();
        assert_eq!(drawn, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_rows() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(sample(Vec::<usize>::new(), 5, &mut rng).is_empty());
    }
}
