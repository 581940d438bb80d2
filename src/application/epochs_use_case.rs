// ============================================================
// Layer 2: EpochsUseCase
// ============================================================
// Drives the loader the way a training loop would, minus the
// model:
//
//   Step 1: Build the loader on the configured backend  (Layer 5)
//   Step 2: Save the loader config next to the metrics  (Layer 5)
//   Step 3: For each epoch
//             a. shuffle within windows                 (Layer 4)
//             b. materialise every batch                (Layer 4)
//             c. log padding statistics to CSV          (Layer 5)
//
// Useful for choosing a shuffle window: larger windows mix
// batches more but pay for it in padding.

use anyhow::{ensure, Result};
use burn::prelude::*;
use std::path::PathBuf;

use crate::data::{corpus::PaddingStats, dataloader::PairLoader};
use crate::domain::config::LoaderConfig;
use crate::infra::{
    device::{dispatch, BackendTask, Placement},
    metrics::{EpochPadding, MetricsLogger},
};

pub struct EpochsUseCase {
    config:         LoaderConfig,
    epochs:         usize,
    shuffle_window: usize,
    metrics_dir:    Option<PathBuf>,
}

impl EpochsUseCase {
    pub fn new(
        config:         LoaderConfig,
        epochs:         usize,
        shuffle_window: usize,
        metrics_dir:    Option<PathBuf>,
    ) -> Self {
        Self { config, epochs, shuffle_window, metrics_dir }
    }

    /// Returns the padding statistics of every epoch, in order.
    pub fn execute(self) -> Result<Vec<EpochPadding>> {
        ensure!(self.shuffle_window > 0, "--shuffle-window must be positive");
        dispatch(Placement::from_config(&self.config), self)
    }
}

impl BackendTask for EpochsUseCase {
    type Output = Result<Vec<EpochPadding>>;

    fn run<B: Backend>(self, device: B::Device) -> Result<Vec<EpochPadding>> {
        let mut loader = PairLoader::<B>::new(&self.config, device)?;
        if loader.is_empty() {
            tracing::warn!("No pairs survived filtering in '{}'", self.config.data_dir.display());
        }
        tracing::info!(
            "{} pairs in batches of {} on {:?}",
            loader.pair_count(),
            loader.batch_size(),
            loader.device(),
        );

        let logger = match &self.metrics_dir {
            Some(dir) => {
                let logger = MetricsLogger::new(dir)?;
                logger.save_config(loader.config())?;
                tracing::info!("Writing padding metrics to '{}'", logger.csv_path().display());
                Some(logger)
            }
            None => None,
        };

        tracing::debug!("Loader config: {}", serde_json::to_string(loader.config())?);

        let mut history = Vec::with_capacity(self.epochs);
        let mut best    = 0.0f64;

        for epoch in 1..=self.epochs {
            loader.shuffle(self.shuffle_window)?;

            // Count padded slots from the tensors actually produced
            let mut slots = 0usize;
            for batch in loader.iter() {
                let rows         = batch.pair_count();
                let [_, src_len] = batch.source.dims();
                let [_, tgt_len] = batch.target.dims();
                slots += rows * (src_len + tgt_len);
            }

            let stats: PaddingStats = loader.padding_stats();
            debug_assert_eq!(slots, stats.source_slots + stats.target_slots);

            let row = EpochPadding::new(epoch, stats);
            if row.is_improvement(best) {
                best = stats.efficiency();
            }

            tracing::info!(
                "Epoch {:>3}/{} | batches={} | src_eff={:.1}% | tgt_eff={:.1}%",
                epoch,
                self.epochs,
                stats.batches,
                stats.source_efficiency() * 100.0,
                stats.target_efficiency() * 100.0,
            );

            if let Some(logger) = &logger {
                logger.log(&row)?;
            }
            history.push(row);
        }

        tracing::info!("Best padding efficiency over {} epochs: {:.1}%", self.epochs, best * 100.0);
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_corpus(dir: &std::path::Path, n: usize) {
        let mut src = String::new();
        let mut tgt = String::new();
        for i in 0..n {
            let src_len = 2 + i % 9;
            let tgt_len = 4 + i % 5;
            src.push_str(&vec![(i + 1).to_string(); src_len].join(" "));
            tgt.push_str(&vec![(i + 1).to_string(); tgt_len].join(" "));
            src.push('\n');
            tgt.push('\n');
        }
        fs::write(dir.join("train.de.id"), src).unwrap();
        fs::write(dir.join("train.en.id"), tgt).unwrap();
    }

    fn config(dir: &std::path::Path) -> LoaderConfig {
        LoaderConfig {
            data_dir:           dir.to_path_buf(),
            batch_size:         4,
            non_differentiable: true,
            seed:               Some(17),
            ..LoaderConfig::default()
        }
    }

    #[test]
    fn test_logs_one_row_per_epoch() {
        let data    = tempfile::tempdir().unwrap();
        let metrics = tempfile::tempdir().unwrap();
        write_corpus(data.path(), 30);

        let history = EpochsUseCase::new(config(data.path()), 3, 8, Some(metrics.path().to_path_buf()))
            .execute()
            .unwrap();

        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|h| h.stats.pairs == 30 && h.stats.batches == 8));

        let csv = fs::read_to_string(metrics.path().join("padding.csv")).unwrap();
        assert_eq!(csv.lines().count(), 4);
        assert!(metrics.path().join("loader_config.json").exists());
    }

    #[test]
    fn test_window_of_one_keeps_sorted_padding() {
        let data = tempfile::tempdir().unwrap();
        write_corpus(data.path(), 25);

        let history = EpochsUseCase::new(config(data.path()), 2, 1, None).execute().unwrap();
        assert_eq!(history[0].stats, history[1].stats);
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let data = tempfile::tempdir().unwrap();
        write_corpus(data.path(), 5);
        assert!(EpochsUseCase::new(config(data.path()), 1, 0, None).execute().is_err());
    }
}
