// ============================================================
// Layer 3: SentencePair Domain Type
// ============================================================
// One aligned (source, target) pair of token-id sequences,
// as produced by an upstream subword tokenizer.
//
// The ids are opaque here: this crate never maps them back
// to text. Only their lengths matter for filtering, sorting
// and padding.
//
// Acceptance rules (applied by the corpus loader):
//   source: 2 ..= MAX_WORDPIECE_LEN ids
//   target: 4 ..= MAX_WORDPIECE_LEN ids
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// A single token id.
pub type TokenId = u32;

/// Upper bound on accepted sequence length, per side.
pub const MAX_WORDPIECE_LEN: usize = 256;

/// Sources must be strictly longer than this to be kept.
pub const MIN_SOURCE_EXCLUSIVE: usize = 1;

/// Targets must be strictly longer than this to be kept.
pub const MIN_TARGET_EXCLUSIVE: usize = 3;

/// Why a pair was rejected by [`SentencePair::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    TooLong,
}

/// An aligned source/target id pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    pub source: Vec<TokenId>,
    pub target: Vec<TokenId>,
}

impl SentencePair {
    pub fn new(source: Vec<TokenId>, target: Vec<TokenId>) -> Self {
        Self { source, target }
    }

    /// Classify this pair against the length rules.
    ///
    /// The short check runs first, so a pair that is both too short
    /// on one side and too long on the other counts as too short.
    pub fn check(&self) -> Result<(), Rejection> {
        if self.source.len() <= MIN_SOURCE_EXCLUSIVE || self.target.len() <= MIN_TARGET_EXCLUSIVE {
            return Err(Rejection::TooShort);
        }
        if self.source.len() > MAX_WORDPIECE_LEN || self.target.len() > MAX_WORDPIECE_LEN {
            return Err(Rejection::TooLong);
        }
        Ok(())
    }

    /// True if this pair may enter a training corpus.
    pub fn is_trainable(&self) -> bool {
        self.check().is_ok()
    }
}
