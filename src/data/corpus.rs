// ============================================================
// Layer 4: Sorted Corpus
// ============================================================
// Owns the accepted sentence pairs and the order in which
// batches read them.
//
// Storage vs order:
//   `pairs` is written once at construction and never moved.
//   `order` is a permutation of 0..pair_count; position p of
//   the epoch reads pairs[order[p]]. Sorting and shuffling
//   only rewrite `order`, so source/target alignment can never
//   break and no sequence is reallocated.
//
// Lifecycle:
//   new()             → order sorted by source length (stable)
//   shuffle_windows() → order permuted inside windows
//   batch_range()     → positions of batch i in the current order
//
// Pairs that break the length rules are dropped on the way in,
// whatever PairSource produced them. Through Burn's Dataset
// trait, item i is the pair at position i of the current order.
//
// Padding statistics are computed here too, straight from
// sequence lengths, so they can be checked without a tensor
// backend.

use std::ops::Range;

use burn::data::dataset::Dataset;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::shuffler::shuffle_within_windows;
use crate::domain::error::DataError;
use crate::domain::pair::SentencePair;

#[derive(Debug, Clone)]
pub struct Corpus {
    pairs: Vec<SentencePair>,
    order: Vec<usize>,
}

impl Corpus {
    /// Build a corpus and sort it by ascending source length.
    /// Pairs outside the trainable length range are dropped.
    pub fn new(mut pairs: Vec<SentencePair>) -> Self {
        let offered = pairs.len();
        pairs.retain(SentencePair::is_trainable);
        if pairs.len() < offered {
            tracing::debug!("Dropped {} untrainable pairs", offered - pairs.len());
        }

        let mut order: Vec<usize> = (0..pairs.len()).collect();
        // sort_by_key is stable: equal lengths keep file order
        order.sort_by_key(|&i| pairs[i].source.len());

        Self { pairs, order }
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in the current reading order.
    pub fn ordered(&self) -> impl Iterator<Item = &SentencePair> + '_ {
        self.order.iter().map(move |&i| &self.pairs[i])
    }

    /// Look up pairs by storage index, i.e. entries taken from `order`.
    fn resolve(&self, indices: &[usize]) -> Vec<&SentencePair> {
        indices.iter().map(|&i| &self.pairs[i]).collect()
    }

    /// Shuffle the reading order inside windows of `window` positions.
    /// The previous order is discarded.
    pub fn shuffle_windows<R: Rng + ?Sized>(&mut self, window: usize, rng: &mut R) -> Result<(), DataError> {
        shuffle_within_windows(&mut self.order, window, rng)
    }

    /// Number of batches of `batch_size`, the last one possibly short.
    pub fn batch_count(&self, batch_size: usize) -> usize {
        self.pairs.len().div_ceil(batch_size)
    }

    /// Order positions covered by batch `index`.
    pub fn batch_range(&self, batch_size: usize, index: usize) -> Result<Range<usize>, DataError> {
        let len = self.batch_count(batch_size);
        if index >= len {
            return Err(DataError::Index { index, len });
        }
        let start = index * batch_size;
        let end   = (start + batch_size).min(self.pairs.len());
        Ok(start..end)
    }

    /// Token and slot counts for every batch of the current order.
    pub fn padding_stats(&self, batch_size: usize) -> PaddingStats {
        let mut stats = PaddingStats::default();

        for indices in self.order.chunks(batch_size) {
            let batch   = self.resolve(indices);
            let rows    = batch.len();
            let src_max = batch.iter().map(|p| p.source.len()).max().unwrap_or(0);
            let tgt_max = batch.iter().map(|p| p.target.len()).max().unwrap_or(0);

            stats.batches       += 1;
            stats.pairs         += rows;
            stats.source_tokens += batch.iter().map(|p| p.source.len()).sum::<usize>();
            stats.target_tokens += batch.iter().map(|p| p.target.len()).sum::<usize>();
            stats.source_slots  += rows * src_max;
            stats.target_slots  += rows * tgt_max;
        }

        stats
    }
}

impl Dataset<SentencePair> for Corpus {
    fn get(&self, position: usize) -> Option<SentencePair> {
        self.order.get(position).map(|&i| self.pairs[i].clone())
    }

    fn len(&self) -> usize {
        self.pairs.len()
    }
}

// ─── PaddingStats ─────────────────────────────────────────────────────────────
/// How much of the padded batch area holds real tokens.
///
/// `*_tokens` counts real ids; `*_slots` counts every cell of the
/// padded `[rows, max_len]` matrices, so `slots - tokens` is padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddingStats {
    pub batches:       usize,
    pub pairs:         usize,
    pub source_tokens: usize,
    pub source_slots:  usize,
    pub target_tokens: usize,
    pub target_slots:  usize,
}

impl PaddingStats {
    pub fn source_efficiency(&self) -> f64 {
        ratio(self.source_tokens, self.source_slots)
    }

    pub fn target_efficiency(&self) -> f64 {
        ratio(self.target_tokens, self.target_slots)
    }

    /// Real tokens over padded slots, both sides together.
    pub fn efficiency(&self) -> f64 {
        ratio(
            self.source_tokens + self.target_tokens,
            self.source_slots + self.target_slots,
        )
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 { 1.0 } else { part as f64 / whole as f64 }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pair::MAX_WORDPIECE_LEN;
    use rand::{rngs::StdRng, SeedableRng};

    /// A pair whose source has `src_len` ids, all equal to `tag`.
    fn pair(tag: u32, src_len: usize) -> SentencePair {
        SentencePair::new(vec![tag; src_len], vec![tag; 4])
    }

    fn lengths(corpus: &Corpus) -> Vec<usize> {
        corpus.ordered().map(|p| p.source.len()).collect()
    }

    #[test]
    fn test_sorted_by_source_length() {
        let corpus = Corpus::new(vec![pair(1, 9), pair(2, 3), pair(3, 7), pair(4, 2)]);
        assert_eq!(lengths(&corpus), vec![2, 3, 7, 9]);
    }

    #[test]
    fn test_sort_is_stable() {
        let corpus = Corpus::new(vec![pair(1, 5), pair(2, 3), pair(3, 5), pair(4, 3)]);
        let tags: Vec<u32> = corpus.ordered().map(|p| p.source[0]).collect();
        assert_eq!(tags, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_alignment_survives_sort() {
        let pairs = vec![
            SentencePair::new(vec![1, 1, 1], vec![10, 10, 10, 10]),
            SentencePair::new(vec![2, 2],    vec![20, 20, 20, 20]),
        ];
        let corpus = Corpus::new(pairs);
        assert_eq!(corpus.get(0).unwrap().target[0], 20);
        assert_eq!(corpus.get(1).unwrap().target[0], 10);
        assert!(corpus.get(2).is_none());
    }

    #[test]
    fn test_dataset_follows_shuffled_order() {
        let mut corpus = Corpus::new((0..20).map(|i| pair(i, 2 + i as usize)).collect());
        corpus.shuffle_windows(20, &mut StdRng::seed_from_u64(3)).unwrap();

        let via_dataset: Vec<SentencePair> = corpus.iter().collect();
        let via_order:   Vec<SentencePair> = corpus.ordered().cloned().collect();
        assert_eq!(Dataset::len(&corpus), 20);
        assert_eq!(via_dataset, via_order);
    }

    #[test]
    fn test_untrainable_pairs_are_dropped() {
        let corpus = Corpus::new(vec![
            pair(1, 3),
            SentencePair::new(vec![2], vec![2; 4]),
            SentencePair::new(vec![3; 3], vec![3; 3]),
            SentencePair::new(vec![4; MAX_WORDPIECE_LEN + 1], vec![4; 4]),
            pair(5, 2),
        ]);

        assert_eq!(corpus.pair_count(), 2);
        assert!(corpus.ordered().all(SentencePair::is_trainable));
        assert_eq!(corpus.batch_count(1), 2);
        assert_eq!(corpus.padding_stats(1).pairs, 2);
    }

    #[test]
    fn test_batch_ranges() {
        let corpus = Corpus::new((0..5).map(|i| pair(i, 2)).collect());
        assert_eq!(corpus.batch_count(2), 3);
        assert_eq!(corpus.batch_range(2, 0).unwrap(), 0..2);
        assert_eq!(corpus.batch_range(2, 2).unwrap(), 4..5);
        assert!(matches!(
            corpus.batch_range(2, 3),
            Err(DataError::Index { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_empty_corpus_has_no_batches() {
        let corpus = Corpus::new(Vec::new());
        assert_eq!(corpus.batch_count(8), 0);
        assert!(corpus.batch_range(8, 0).is_err());
        assert_eq!(corpus.padding_stats(8), PaddingStats::default());
    }

    #[test]
    fn test_shuffle_keeps_window_membership() {
        let mut corpus = Corpus::new((0..50).map(|i| pair(i, 2 + (i as usize % 13))).collect());
        let before     = corpus.order.clone();
        corpus.shuffle_windows(8, &mut StdRng::seed_from_u64(11)).unwrap();
        let after      = corpus.order.clone();

        for (old, new) in before.chunks(8).zip(after.chunks(8)) {
            let mut old = old.to_vec();
            let mut new = new.to_vec();
            old.sort_unstable();
            new.sort_unstable();
            assert_eq!(old, new);
        }
    }

    #[test]
    fn test_padding_stats() {
        // sorted lengths 2, 3 | 6 with batch_size 2
        let corpus = Corpus::new(vec![pair(1, 6), pair(2, 2), pair(3, 3)]);
        let stats  = corpus.padding_stats(2);
        assert_eq!(stats.batches, 2);
        assert_eq!(stats.pairs, 3);
        assert_eq!(stats.source_tokens, 11);
        assert_eq!(stats.source_slots, 2 * 3 + 6);
        assert_eq!(stats.target_tokens, 12);
        assert_eq!(stats.target_slots, 12);
        assert!((stats.source_efficiency() - 11.0 / 12.0).abs() < 1e-12);
        assert!((stats.target_efficiency() - 1.0).abs() < 1e-12);
    }
}
