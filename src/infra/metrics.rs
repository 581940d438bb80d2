// ============================================================
// Layer 5: Padding Metrics Logger
// ============================================================
// Records how much padding each epoch's batches carry, one CSV
// row per epoch.
//
// Why track this?
//   The whole point of sorting by length and shuffling only
//   inside windows is to keep padding low. Logging the real
//   token count against the padded slot count per epoch shows
//   what a given window size costs.
//
// Output file: <dir>/padding.csv
//
// Example CSV output:
//   epoch,batches,pairs,src_tokens,src_slots,tgt_tokens,tgt_slots,efficiency
//   1,1563,100000,2213345,2287104,2401988,2612530,0.941257
//   2,1563,100000,2213345,2291776,2401988,2609801,0.940663
//
// The loader configuration used for the run is written next to
// it as loader_config.json.

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

use crate::data::corpus::PaddingStats;
use crate::domain::config::LoaderConfig;

const CSV_HEADER: &str = "epoch,batches,pairs,src_tokens,src_slots,tgt_tokens,tgt_slots,efficiency";

/// One row of padding data for a single epoch
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpochPadding {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    pub stats: PaddingStats,
}

impl EpochPadding {
    pub fn new(epoch: usize, stats: PaddingStats) -> Self {
        Self { epoch, stats }
    }

    /// Returns true if this epoch wasted less space than `best`
    pub fn is_improvement(&self, best: f64) -> bool {
        self.stats.efficiency() > best
    }
}

/// Appends epoch padding metrics to a CSV file.
pub struct MetricsLogger {
    dir:      PathBuf,
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();

        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;

        let csv_path = dir.join("padding.csv");

        // Header only for a new file, so reruns append
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "{CSV_HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { dir, csv_path })
    }

    /// Append one epoch as a new row.
    pub fn log(&self, m: &EpochPadding) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        let s = &m.stats;
        writeln!(
            f,
            "{},{},{},{},{},{},{},{:.6}",
            m.epoch,
            s.batches,
            s.pairs,
            s.source_tokens,
            s.source_slots,
            s.target_tokens,
            s.target_slots,
            s.efficiency(),
        )?;

        tracing::debug!("Logged epoch {} padding: efficiency={:.4}", m.epoch, s.efficiency());
        Ok(())
    }

    /// Write the loader configuration as pretty JSON next to the CSV.
    pub fn save_config(&self, cfg: &LoaderConfig) -> Result<()> {
        let path = self.dir.join("loader_config.json");
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved loader config to '{}'", path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn stats(tokens: usize, slots: usize) -> PaddingStats {
        PaddingStats {
            batches:       2,
            pairs:         3,
            source_tokens: tokens,
            source_slots:  slots,
            target_tokens: tokens,
            target_slots:  slots,
        }
    }

    #[test]
    fn test_is_improvement() {
        let m = EpochPadding::new(2, stats(9, 10));
        assert!(m.is_improvement(0.8));
        assert!(!m.is_improvement(0.95));
    }

    #[test]
    fn test_rows_append_under_one_header() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochPadding::new(1, stats(9, 10))).unwrap();

        // a second logger on the same dir must not rewrite the header
        let again = MetricsLogger::new(dir.path()).unwrap();
        again.log(&EpochPadding::new(2, stats(8, 10))).unwrap();

        let csv   = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec![CSV_HEADER, "1,2,3,9,10,9,10,0.900000", "2,2,3,8,10,8,10,0.800000"]);
    }

    #[test]
    fn test_save_config_writes_json() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.save_config(&LoaderConfig::default()).unwrap();

        let json = fs::read_to_string(dir.path().join("loader_config.json")).unwrap();
        let back: LoaderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LoaderConfig::default());
    }
}
