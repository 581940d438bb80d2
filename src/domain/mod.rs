// ============================================================
// Layer 3: Domain Layer
// ============================================================
// Plain Rust types shared by every other layer:
// the sentence pair, the loader configuration, the error
// taxonomy and the PairSource abstraction.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits

/// An aligned source/target token-id pair and its length rules
pub mod pair;

/// Construction-time loader configuration
pub mod config;

/// Typed errors of the batching pipeline
pub mod error;

/// Core abstractions (traits) that other layers implement
pub mod traits;
