// ============================================================
// Layer 2: ShowUseCase
// ============================================================
// Materialises a single batch and renders it as text, so the
// padding and ordering can be eyeballed:
//
//   batch 3/1563  source [64, 12]  target [64, 15]
//   src  412 88 1903 7 0 0 ...
//   tgt  5 71 660 12 9 3 0 ...
//
// Optionally shuffles once before reading, to see how a window
// size changes batch composition.

use anyhow::{anyhow, Result};
use burn::prelude::*;

use crate::data::dataloader::PairLoader;
use crate::domain::config::LoaderConfig;
use crate::infra::device::{dispatch, BackendTask, Placement};

pub struct ShowUseCase {
    config:         LoaderConfig,
    index:          usize,
    shuffle_window: Option<usize>,
}

impl ShowUseCase {
    pub fn new(config: LoaderConfig, index: usize, shuffle_window: Option<usize>) -> Self {
        Self { config, index, shuffle_window }
    }

    /// Returns the rendered batch.
    pub fn execute(self) -> Result<String> {
        dispatch(Placement::from_config(&self.config), self)
    }
}

impl BackendTask for ShowUseCase {
    type Output = Result<String>;

    fn run<B: Backend>(self, device: B::Device) -> Result<String> {
        let mut loader = PairLoader::<B>::new(&self.config, device)?;

        if let Some(window) = self.shuffle_window {
            loader.shuffle(window)?;
        }

        let batch  = loader.get(self.index)?;
        let source = rows(batch.source)?;
        let target = rows(batch.target)?;

        let mut out = format!(
            "batch {}/{}  source [{}, {}]  target [{}, {}]\n",
            self.index,
            loader.len(),
            source.len(),
            source.first().map_or(0, Vec::len),
            target.len(),
            target.first().map_or(0, Vec::len),
        );
        for (src, tgt) in source.iter().zip(&target) {
            out.push_str(&format!("src  {}\ntgt  {}\n", join(src), join(tgt)));
        }
        Ok(out)
    }
}

/// Pull a 2D Int tensor back to host rows.
fn rows<B: Backend>(tensor: Tensor<B, 2, Int>) -> Result<Vec<Vec<i64>>> {
    let [_, width] = tensor.dims();
    let flat = tensor
        .into_data()
        .convert::<i64>()
        .to_vec::<i64>()
        .map_err(|e| anyhow!("Cannot read batch tensor: {e:?}"))?;

    Ok(flat.chunks(width.max(1)).map(<[i64]>::to_vec).collect())
}

fn join(ids: &[i64]) -> String {
    ids.iter().map(i64::to_string).collect::<Vec<_>>().join(" ")
}
