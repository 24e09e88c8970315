// ============================================================
// Layer 4 — Per-Sense Grouper
// ============================================================
// Groups encoded records by sense id for evaluation, where the
// classifier looks at one sense at a time:
//
//   SenseGroup
//     definition      → [1, L] tensor, when the sense has one
//     definition_only → [1, L] tensor of the same definition
//                       without the "<lemma> :" prefix
//     examples        → one [1, L] tensor + target index per example
//
// Senses come out in definition order, followed by senses that
// only have examples, in order of first appearance. Groups are
// built lazily, one per `next()`.

use burn::prelude::*;

use crate::domain::record::{EncodedRecord, RecordOrigin};
use crate::domain::supersense::Supersense;

pub struct SenseExample<B: Backend> {
    /// shape: [1, max_length]
    pub tokens: Tensor<B, 2, Int>,
    pub target_index: usize,
}

pub struct SenseGroup<B: Backend> {
    pub sense_id: String,
    pub lemma: String,
    pub label: Supersense,
    /// shape: [1, max_length]
    pub definition: Option<Tensor<B, 2, Int>>,
    /// shape: [1, max_length]
    pub definition_only: Option<Tensor<B, 2, Int>>,
    pub examples: Vec<SenseExample<B>>,
}

struct PendingSense<'a> {
    definition: Option<&'a EncodedRecord>,
    examples: Vec<&'a EncodedRecord>,
}

impl PendingSense<'_> {
    fn head(&self) -> Option<&EncodedRecord> {
        self.definition.or_else(|| self.examples.first().copied())
    }
}

pub struct PerSenseGrouper<'a, B: Backend> {
    senses: std::vec::IntoIter<PendingSense<'a>>,
    device: B::Device,
}

impl<'a, B: Backend> PerSenseGrouper<'a, B> {
    pub fn new(
        definitions: &'a [EncodedRecord],
        examples: &'a [EncodedRecord],
        device: B::Device,
    ) -> Self {
        let mut order: Vec<PendingSense<'a>> = Vec::new();
        let mut slot_of: std::collections::HashMap<&'a str, usize> = Default::default();

        for d in definitions {
            let slot = *slot_of.entry(d.sense_id.as_str()).or_insert_with(|| {
                order.push(PendingSense { definition: None, examples: Vec::new() });
                order.len() - 1
            });
            order[slot].definition.get_or_insert(d);
        }

        // A combined record list may be passed as `examples`;
        // only example-origin records count there.
        for e in examples.iter().filter(|r| r.origin == RecordOrigin::Example) {
            let slot = *slot_of.entry(e.sense_id.as_str()).or_insert_with(|| {
                order.push(PendingSense { definition: None, examples: Vec::new() });
                order.len() - 1
            });
            order[slot].examples.push(e);
        }

        tracing::debug!("Grouped records into {} senses", order.len());

        Self { senses: order.into_iter(), device }
    }

    fn row(&self, ids: &[u32]) -> Tensor<B, 2, Int> {
        let ints: Vec<i64> = ids.iter().map(|&x| i64::from(x)).collect();
        Tensor::<B, 1, Int>::from_ints(ints.as_slice(), &self.device).reshape([1, ids.len()])
    }
}

impl<B: Backend> Iterator for PerSenseGrouper<'_, B> {
    type Item = SenseGroup<B>;

    fn next(&mut self) -> Option<Self::Item> {
        let pending = self.senses.next()?;
        let head    = pending.head()?;

        Some(SenseGroup {
            sense_id: head.sense_id.clone(),
            lemma: head.lemma.clone(),
            label: head.label,
            definition: pending.definition.map(|d| self.row(&d.token_ids)),
            definition_only: pending
                .definition
                .and_then(|d| d.definition_only.as_deref())
                .map(|ids| self.row(ids)),
            examples: pending
                .examples
                .iter()
                .map(|e| SenseExample {
                    tokens: self.row(&e.token_ids),
                    target_index: e.target_index,
                })
                .collect(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.senses.size_hint()
    }
}

impl<B: Backend> ExactSizeIterator for PerSenseGrouper<'_, B> {}
