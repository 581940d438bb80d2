// ============================================================
// Layer 4: Windowed Shuffler
// ============================================================
// Shuffles a sequence inside fixed-size contiguous windows.
//
// Why not a plain shuffle?
//   The corpus is sorted by source length so that each batch
//   holds sequences of similar length and wastes little space
//   on padding. A full shuffle would throw that away.
//   Shuffling only inside windows keeps neighbours of similar
//   length together while still changing which pairs share a
//   batch from one epoch to the next.
//
// Example with window = 3 over positions 0..8:
//
//   before:  [0 1 2 | 3 4 5 | 6 7]
//   after:   [2 0 1 | 5 3 4 | 7 6]    (one possible outcome)
//
// Each window is permuted with Fisher-Yates via
// rand::seq::SliceRandom; the final window holds the
// remainder. Nothing ever crosses a window boundary.

use rand::{seq::SliceRandom, Rng};

use crate::domain::error::DataError;

/// Permute `items` uniformly at random inside each window of `window` elements.
pub fn shuffle_within_windows<T, R>(items: &mut [T], window: usize, rng: &mut R) -> Result<(), DataError>
where
    R: Rng + ?Sized,
{
    if window == 0 {
        return Err(DataError::Config("shuffle window must be positive".into()));
    }

    for chunk in items.chunks_mut(window) {
        chunk.shuffle(rng);
    }

    tracing::debug!(
        "Shuffled {} items in {} windows of {}",
        items.len(),
        items.len().div_ceil(window),
        window,
    );
    Ok(())
}
