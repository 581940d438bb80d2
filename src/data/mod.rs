// ============================================================
// Layer 4: Data Pipeline
// ============================================================
// Everything from two token-id files on disk to padded
// tensor batches.
//
//   train.de.id + train.en.id
//       │
//       ▼
//   IdFileSource      → reads both files in lock-step, filters by length
//       │
//       ▼
//   Corpus            → stores pairs, keeps an order sorted by source length
//       │
//       ▼
//   shuffler          → (each epoch) shuffles the order within windows
//       │
//       ▼
//   PairBatcher       → pads one slice of the order into two Int tensors
//       │
//       ▼
//   PairLoader        → len / get(i) / iter / shuffle for the caller
//
// Each module is responsible for exactly one step and is
// tested on its own.

/// Reads aligned `.id` files into sentence pairs
pub mod loader;

/// Pair storage plus the sorted / shuffled reading order
pub mod corpus;

/// Shuffles a sequence inside fixed-size windows
pub mod shuffler;

/// Pads a slice of pairs into Burn Int tensors
pub mod batcher;

/// Ties corpus, shuffler and batcher together
pub mod dataloader;
