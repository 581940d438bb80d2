// ============================================================
// Layer 5: Backend and Device Selection
// ============================================================
// The two placement flags of LoaderConfig map onto concrete
// Burn backends:
//
//   use_accelerator  non_differentiable   backend
//   ───────────────  ──────────────────   ─────────────────
//   false            false                Autodiff<NdArray>
//   false            true                 NdArray
//   true             false                Autodiff<Wgpu>
//   true             true                 Wgpu
//
// Burn Int tensors never record gradients themselves; what the
// flag decides is whether batches live on an Autodiff backend
// (and can feed a training graph) or on the plain inner
// backend used for validation and inference.
//
// Backends are types, so code that needs one is written as a
// BackendTask and run through `dispatch`, which picks the
// monomorphised version at runtime.

use burn::backend::{ndarray::NdArrayDevice, wgpu::WgpuDevice, Autodiff, NdArray, Wgpu};
use burn::prelude::*;

use crate::domain::config::LoaderConfig;

pub type CpuBackend = NdArray;
pub type GpuBackend = Wgpu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Cpu,
    CpuAutodiff,
    Gpu,
    GpuAutodiff,
}

impl Placement {
    pub fn from_config(cfg: &LoaderConfig) -> Self {
        match (cfg.use_accelerator, cfg.non_differentiable) {
            (false, true)  => Placement::Cpu,
            (false, false) => Placement::CpuAutodiff,
            (true,  true)  => Placement::Gpu,
            (true,  false) => Placement::GpuAutodiff,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Placement::Cpu         => "ndarray",
            Placement::CpuAutodiff => "autodiff<ndarray>",
            Placement::Gpu         => "wgpu",
            Placement::GpuAutodiff => "autodiff<wgpu>",
        }
    }
}

/// Work that must run against one concrete backend.
pub trait BackendTask {
    type Output;

    fn run<B: Backend>(self, device: B::Device) -> Self::Output;
}

/// Run `task` on the backend chosen by `placement`.
pub fn dispatch<T: BackendTask>(placement: Placement, task: T) -> T::Output {
    tracing::info!("Placing batches on the {} backend", placement.name());

    match placement {
        Placement::Cpu         => task.run::<CpuBackend>(NdArrayDevice::default()),
        Placement::CpuAutodiff => task.run::<Autodiff<CpuBackend>>(NdArrayDevice::default()),
        Placement::Gpu         => task.run::<GpuBackend>(WgpuDevice::default()),
        Placement::GpuAutodiff => task.run::<Autodiff<GpuBackend>>(WgpuDevice::default()),
    }
}
