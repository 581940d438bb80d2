// ============================================================
// Layer 3: Core Traits (Abstractions)
// ============================================================
// The corpus is built from whatever implements PairSource.
// The data layer provides IdFileSource (two aligned .id files);
// tests provide small in-memory sources so the sorting,
// shuffling and batching logic can be checked without disk.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::error::DataError;
use crate::domain::pair::SentencePair;

// ─── PairSource ───────────────────────────────────────────────────────────────
/// Any component that can produce aligned sentence pairs.
///
/// Implementations:
///   - IdFileSource → two line-aligned token-id files
pub trait PairSource {
    /// Load every accepted pair, in source order.
    ///
    /// Implementations filter out pairs that fail
    /// [`SentencePair::check`] rather than returning them.
    fn load_pairs(&self) -> Result<Vec<SentencePair>, DataError>;
}
