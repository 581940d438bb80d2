// ============================================================
// Layer 4: Pair Batcher
// ============================================================
// Turns a slice of sentence pairs into two Burn Int tensors.
//
// Dynamic padding:
//   Sequences in a batch have different lengths. Each side is
//   padded on the right with 0 up to the longest sequence of
//   THAT side in THAT batch (not a global maximum), so a batch
//   of short sentences stays small.
//
//   source rows        padded [3, 4]
//   [5 6]              [5 6 0 0]
//   [7 8 9]      →     [7 8 9 0]
//   [1 2 3 4]          [1 2 3 4]
//
//   The target side is padded independently with its own max.
//
// The padding itself (`pad_rows`) is a pure function over
// plain vectors; the batcher only flattens and reshapes the
// result into a tensor on its device.
//
// Reference: Burn Book §4 (Batcher)

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::domain::pair::{SentencePair, TokenId};

/// Padding sentinel written after the end of every shorter row.
pub const PAD_ID: i64 = 0;

// ─── PairBatch ────────────────────────────────────────────────────────────────
/// One materialised batch. Both tensors have the batch size as
/// their first dimension; the second is the side's batch-local max.
#[derive(Debug, Clone)]
pub struct PairBatch<B: Backend> {
    /// Source ids, shape [batch, max_source_len]
    pub source: Tensor<B, 2, Int>,

    /// Target ids, shape [batch, max_target_len]
    pub target: Tensor<B, 2, Int>,
}

impl<B: Backend> PairBatch<B> {
    /// Number of pairs in this batch.
    pub fn pair_count(&self) -> usize {
        self.source.dims()[0]
    }
}

// ─── PairBatcher ──────────────────────────────────────────────────────────────
/// Stateless: the device arrives with each call, so one batcher
/// serves any backend.
#[derive(Clone, Debug, Default)]
pub struct PairBatcher;

impl<B: Backend> Batcher<B, SentencePair, PairBatch<B>> for PairBatcher {
    /// Pad and stack both sides of `items`.
    fn batch(&self, items: Vec<SentencePair>, device: &B::Device) -> PairBatch<B> {
        let sources: Vec<&[TokenId]> = items.iter().map(|p| p.source.as_slice()).collect();
        let targets: Vec<&[TokenId]> = items.iter().map(|p| p.target.as_slice()).collect();

        PairBatch {
            source: wrap(&sources, device),
            target: wrap(&targets, device),
        }
    }
}

fn wrap<B: Backend>(rows: &[&[TokenId]], device: &B::Device) -> Tensor<B, 2, Int> {
    let (flat, shape) = pad_rows(rows);

    // from_ints builds a 1D tensor; reshape gives [rows, max_len]
    Tensor::<B, 1, Int>::from_ints(flat.as_slice(), device).reshape(shape)
}

/// Right-pad `rows` with [`PAD_ID`] to their longest length and
/// flatten them row-major. Returns the flat buffer and its shape.
pub fn pad_rows(rows: &[&[TokenId]]) -> (Vec<i64>, [usize; 2]) {
    let width    = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut flat = Vec::with_capacity(rows.len() * width);

    for row in rows {
        flat.extend(row.iter().map(|&id| id as i64));
        flat.extend(std::iter::repeat(PAD_ID).take(width - row.len()));
    }

    (flat, [rows.len(), width])
}
