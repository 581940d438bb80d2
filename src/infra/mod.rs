// ============================================================
// Layer 5: Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to the data
// pipeline itself:
//
//   device.rs : Maps the placement flags onto a concrete
//                Burn backend (NdArray / Wgpu, with or
//                without Autodiff) and runs generic work
//                on it.
//
//   metrics.rs: Appends per-epoch padding statistics to a
//                CSV file and records the loader config as
//                JSON next to it.

/// Backend selection and dispatch
pub mod device;

/// Padding metrics CSV logger
pub mod metrics;
