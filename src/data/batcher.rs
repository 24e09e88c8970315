// ============================================================
// Layer 4 — Supersense Batcher
// ============================================================
// Turns encoded records into numeric batches for the
// classifier.
//
//   SupersenseBatcher — implements Burn's Batcher trait: stacks
//                       N records into tensors of shape [N, L]
//                       (token ids) and [N] (targets, labels)
//   BatchIterator     — walks a record collection in slices of
//                       `batch_size`, optionally shuffled first,
//                       building each batch only when asked for
//
// Stacking is a plain flatten + reshape because every record
// was already padded to the same max_length. BatchIterator
// checks that once up front instead of on every batch.
//
// With N records and batch size B the iterator yields
// ceil(N / B) batches: all of size B except the last, which
// holds N mod B records (B when N divides evenly).
//
// Reference: Burn Book §4 (Batcher)

use burn::{data::dataloader::batcher::Batcher, prelude::*};
use rand::{seq::SliceRandom, Rng};

use crate::domain::error::PipelineError;
use crate::domain::record::EncodedRecord;

// ─── SupersenseBatch ──────────────────────────────────────────────────────────
/// A batch ready for the classifier forward pass.
#[derive(Debug, Clone)]
pub struct SupersenseBatch<B: Backend> {
    /// Token ids — shape: [batch_size, max_length]
    pub token_ids: Tensor<B, 2, Int>,

    /// Target sub-token position per row — shape: [batch_size]
    pub target_indices: Tensor<B, 1, Int>,

    /// Supersense class ids — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,

    /// Bare definitions — shape: [batch_size, max_length].
    /// Only present when every record of the batch has one.
    pub definition_only: Option<Tensor<B, 2, Int>>,

    pub sense_ids: Vec<String>,

    pub lemmas: Vec<String>,
}

impl<B: Backend> SupersenseBatch<B> {
    pub fn len(&self) -> usize {
        self.sense_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sense_ids.is_empty()
    }
}

// ─── SupersenseBatcher ────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct SupersenseBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SupersenseBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    fn matrix(&self, rows: &[&[u32]]) -> Tensor<B, 2, Int> {
        let seq_len = rows.first().map_or(0, |r| r.len());
        // i64 holds every u32 id; the backend converts to its own
        // int element type
        let flat: Vec<i64> = rows
            .iter()
            .flat_map(|r| r.iter().map(|&x| i64::from(x)))
            .collect();

        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([rows.len(), seq_len])
    }

    fn vector(&self, values: &[i64]) -> Tensor<B, 1, Int> {
        Tensor::<B, 1, Int>::from_ints(values, &self.device)
    }

    /// Stack records into a batch. Records must pass
    /// [`check_records`] first: same length, target inside it.
    pub fn stack(&self, items: &[&EncodedRecord]) -> SupersenseBatch<B> {
        let token_rows: Vec<&[u32]> = items.iter().map(|r| r.token_ids.as_slice()).collect();

        // Both are bounded by a Vec length (target) or by
        // Supersense::COUNT (label), so the casts are lossless
        let targets: Vec<i64> = items.iter().map(|r| r.target_index as i64).collect();
        let labels: Vec<i64>  = items.iter().map(|r| r.label_id() as i64).collect();

        let definition_only = items
            .iter()
            .map(|r| r.definition_only.as_deref())
            .collect::<Option<Vec<&[u32]>>>()
            .filter(|rows| !rows.is_empty())
            .map(|rows| self.matrix(&rows));

        SupersenseBatch {
            token_ids: self.matrix(&token_rows),
            target_indices: self.vector(&targets),
            labels: self.vector(&labels),
            definition_only,
            sense_ids: items.iter().map(|r| r.sense_id.clone()).collect(),
            lemmas: items.iter().map(|r| r.lemma.clone()).collect(),
        }
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
// Lets a downstream trainer feed an EncodedDataset through
// Burn's DataLoader.
impl<B: Backend> Batcher<EncodedRecord, SupersenseBatch<B>> for SupersenseBatcher<B> {
    fn batch(&self, items: Vec<EncodedRecord>) -> SupersenseBatch<B> {
        let refs: Vec<&EncodedRecord> = items.iter().collect();
        self.stack(&refs)
    }
}

/// Every record must share the first record's length and point
/// inside it.
pub fn check_records(records: &[EncodedRecord]) -> Result<(), PipelineError> {
    let Some(first) = records.first() else {
        return Ok(());
    };
    let expected = first.token_ids.len();
    for r in records {
        if r.target_index >= r.token_ids.len() {
            return Err(PipelineError::TargetOutsideRecord {
                index: r.target_index,
                len:   r.token_ids.len(),
            });
        }
        let lengths = std::iter::once(r.token_ids.len()).chain(r.definition_only.as_ref().map(Vec::len));
        for found in lengths {
            if found != expected {
                return Err(PipelineError::RaggedRecords { expected, found });
            }
        }
    }
    Ok(())
}

// ─── BatchIterator ────────────────────────────────────────────────────────────
/// Lazy, finite sequence of batches over a record collection.
///
/// Holds an index permutation and a cursor; records themselves
/// are only borrowed. Build a new iterator to go over the data
/// again.
pub struct BatchIterator<'a, B: Backend> {
    records: &'a [EncodedRecord],
    order: Vec<usize>,
    cursor: usize,
    batch_size: usize,
    batcher: SupersenseBatcher<B>,
}

impl<'a, B: Backend> BatchIterator<'a, B> {
    pub fn new(
        records: &'a [EncodedRecord],
        batch_size: usize,
        batcher: SupersenseBatcher<B>,
    ) -> Result<Self, PipelineError> {
        if batch_size == 0 {
            return Err(PipelineError::InvalidConfig("batch_size must be greater than 0".into()));
        }
        check_records(records)?;

        Ok(Self {
            records,
            order: (0..records.len()).collect(),
            cursor: 0,
            batch_size,
            batcher,
        })
    }

    /// Permute the record order before any batch is cut.
    /// All fields of a record move together.
    pub fn shuffled<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.order.shuffle(rng);
        self
    }

    pub fn num_batches(&self) -> usize {
        self.records.len().div_ceil(self.batch_size)
    }
}

impl<B: Backend> Iterator for BatchIterator<'_, B> {
    type Item = SupersenseBatch<B>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.order.len() {
            return None;
        }

        let records = self.records;
        let end     = (self.cursor + self.batch_size).min(self.order.len());
        let items: Vec<&EncodedRecord> = self.order[self.cursor..end]
            .iter()
            .map(|&i| &records[i])
            .collect();
        self.cursor = end;

        Some(self.batcher.stack(&items))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.order.len().saturating_sub(self.cursor).div_ceil(self.batch_size);
        (remaining, Some(remaining))
    }
}

impl<B: Backend> ExactSizeIterator for BatchIterator<'_, B> {}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RecordOrigin;
    use crate::domain::supersense::Supersense;
    use burn::backend::NdArray;
    use rand::{rngs::StdRng, SeedableRng};

    type TestBackend = NdArray;

    fn record(i: usize) -> EncodedRecord {
        EncodedRecord {
            token_ids:       vec![0, 100 + i as u32, 2, 1],
            target_index:    1,
            label:           Supersense::from_index(i % Supersense::COUNT).unwrap(),
            sense_id:        format!("s{i}"),
            lemma:           format!("lemma{i}"),
            origin:          RecordOrigin::Example,
            definition_only: None,
        }
    }

    fn records(n: usize) -> Vec<EncodedRecord> {
        (0..n).map(record).collect()
    }

    fn batcher() -> SupersenseBatcher<TestBackend> {
        SupersenseBatcher::new(Default::default())
    }

    fn ints<const D: usize>(t: Tensor<TestBackend, D, Int>) -> Vec<i64> {
        t.into_data().iter::<i64>().collect()
    }

    #[test]
    fn test_batch_shapes() {
        let recs  = records(3);
        let iter  = BatchIterator::new(&recs, 2, batcher()).unwrap();
        let sizes: Vec<[usize; 2]> = iter.map(|b| b.token_ids.dims()).collect();
        assert_eq!(sizes, vec![[2, 4], [1, 4]]);
    }

    #[test]
    fn test_batch_contents() {
        let recs  = records(2);
        let batch = BatchIterator::new(&recs, 4, batcher()).unwrap().next().unwrap();

        assert_eq!(ints(batch.token_ids), vec![0, 100, 2, 1, 0, 101, 2, 1]);
        assert_eq!(ints(batch.target_indices), vec![1, 1]);
        assert_eq!(ints(batch.labels), vec![0, 1]);
        assert_eq!(batch.sense_ids, vec!["s0", "s1"]);
        assert_eq!(batch.lemmas, vec!["lemma0", "lemma1"]);
        assert!(batch.definition_only.is_none());
    }

    #[test]
    fn test_partial_last_batch() {
        let recs = records(25);
        let iter = BatchIterator::new(&recs, 16, batcher()).unwrap();
        assert_eq!(iter.num_batches(), 2);
        assert_eq!(iter.len(), 2);
        let sizes: Vec<usize> = iter.map(|b| b.len()).collect();
        assert_eq!(sizes, vec![16, 9]);
    }

    #[test]
    fn test_even_division_has_full_last_batch() {
        let recs  = records(32);
        let sizes: Vec<usize> = BatchIterator::new(&recs, 16, batcher()).unwrap().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![16, 16]);
    }

    #[test]
    fn test_coverage_without_repeats() {
        for n in [0usize, 1, 7, 16, 33] {
            for bs in [1usize, 3, 16, 40] {
                let recs = records(n);
                let iter = BatchIterator::new(&recs, bs, batcher()).unwrap();
                let expected_batches = n.div_ceil(bs);
                let batches: Vec<_> = iter.collect();
                assert_eq!(batches.len(), expected_batches);

                let seen: Vec<String> = batches.into_iter().flat_map(|b| b.sense_ids).collect();
                let want: Vec<String> = recs.iter().map(|r| r.sense_id.clone()).collect();
                assert_eq!(seen, want);
            }
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let recs    = records(40);
        let mut rng = StdRng::seed_from_u64(3);
        let iter    = BatchIterator::new(&recs, 16, batcher()).unwrap().shuffled(&mut rng);

        let mut seen = Vec::new();
        for batch in iter {
            // Fields of one record stay aligned after shuffling
            let tokens = ints(batch.token_ids);
            for (row, sense_id) in batch.sense_ids.iter().enumerate() {
                let i: i64 = sense_id[1..].parse().unwrap();
                assert_eq!(tokens[row * 4 + 1], 100 + i);
            }
            seen.extend(batch.sense_ids);
        }

        let original: Vec<String> = recs.iter().map(|r| r.sense_id.clone()).collect();
        assert_ne!(seen, original);
        seen.sort();
        let mut sorted = original;
        sorted.sort();
        assert_eq!(seen, sorted);
    }

    #[test]
    fn test_definition_only_tensor() {
        let mut recs = records(2);
        for r in &mut recs {
            r.origin = RecordOrigin::Definition;
            r.definition_only = Some(vec![0, 7, 2, 1]);
        }
        let batch = BatchIterator::new(&recs, 2, batcher()).unwrap().next().unwrap();
        let defs  = batch.definition_only.unwrap();
        assert_eq!(defs.dims(), [2, 4]);
        assert_eq!(ints(defs), vec![0, 7, 2, 1, 0, 7, 2, 1]);
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let recs = records(3);
        assert!(matches!(
            BatchIterator::new(&recs, 0, batcher()),
            Err(PipelineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_ragged_records_are_rejected() {
        let mut recs = records(3);
        recs[2].token_ids.push(9);
        assert_eq!(
            BatchIterator::new(&recs, 2, batcher()).err(),
            Some(PipelineError::RaggedRecords { expected: 4, found: 5 })
        );
    }

    #[test]
    fn test_large_token_ids_keep_their_value() {
        let mut recs = records(1);
        recs[0].token_ids[1] = u32::MAX;
        let batch = BatchIterator::new(&recs, 1, batcher()).unwrap().next().unwrap();
        assert_eq!(ints(batch.token_ids)[1], i64::from(u32::MAX));
    }

    #[test]
    fn test_target_outside_record_is_rejected() {
        let mut recs = records(2);
        recs[1].target_index = 4;
        assert_eq!(
            BatchIterator::new(&recs, 2, batcher()).err(),
            Some(PipelineError::TargetOutsideRecord { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_burn_batcher_trait() {
        let batch: SupersenseBatch<TestBackend> = batcher().batch(records(3));
        assert_eq!(batch.token_ids.dims(), [3, 4]);
        assert_eq!(batch.labels.dims(), [3]);
    }
}
