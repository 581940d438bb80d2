// ============================================================
// Layer 2: Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// user-facing goal each.
//
// Rules for this layer:
//   - No padding or shuffling logic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination

// Corpus size, batch count and padding of the sorted order
pub mod stats_use_case;

// Render one materialised batch
pub mod show_use_case;

// Shuffle + materialise over several epochs, logging padding
pub mod epochs_use_case;
