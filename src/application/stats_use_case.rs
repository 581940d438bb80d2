// ============================================================
// Layer 2: StatsUseCase
// ============================================================
// Loads the corpus and reports what a training run would see:
//
//   Step 1: Validate the loader config
//   Step 2: Load and filter the aligned .id files   (Layer 4)
//   Step 3: Sort by source length                   (Layer 4)
//   Step 4: Measure padding of the sorted order     (Layer 4)
//
// No tensors are built, so this runs without a backend.

use anyhow::Result;

use crate::data::{corpus::{Corpus, PaddingStats}, loader::IdFileSource};
use crate::domain::{config::LoaderConfig, traits::PairSource};

/// What `stats` prints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorpusReport {
    pub pairs:       usize,
    pub batches:     usize,
    pub max_source:  usize,
    pub max_target:  usize,
    pub padding:     PaddingStats,
}

pub struct StatsUseCase {
    config: LoaderConfig,
}

impl StatsUseCase {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<CorpusReport> {
        let cfg = &self.config;
        cfg.validate()?;

        let source = IdFileSource::new(cfg.source_path(), cfg.target_path());
        let pairs  = source.load_pairs().map_err(|e| {
            let what = if e.is_format_error() { "Malformed corpus" } else { "Cannot load corpus" };
            let dir  = cfg.data_dir.display().to_string();
            anyhow::Error::new(e).context(format!("{what} in '{dir}'"))
        })?;
        let corpus = Corpus::new(pairs);

        Ok(CorpusReport {
            pairs:      corpus.pair_count(),
            batches:    corpus.batch_count(cfg.batch_size),
            max_source: corpus.ordered().map(|p| p.source.len()).max().unwrap_or(0),
            max_target: corpus.ordered().map(|p| p.target.len()).max().unwrap_or(0),
            padding:    corpus.padding_stats(cfg.batch_size),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reports_counts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("train.de.id"), "5 6\n2\n1 2 3\n4 4 4 4\n7 7\n").unwrap();
        fs::write(dir.path().join("train.en.id"), "1 2 3 4\n9 9 9 9\n1 2 3 4 5\n1 2\n6 6 6 6 6 6\n").unwrap();

        let cfg = LoaderConfig {
            data_dir:   dir.path().to_path_buf(),
            batch_size: 2,
            ..LoaderConfig::default()
        };
        let report = StatsUseCase::new(cfg).execute().unwrap();

        assert_eq!(report.pairs, 3);
        assert_eq!(report.batches, 2);
        assert_eq!(report.max_source, 3);
        assert_eq!(report.max_target, 6);
        assert_eq!(report.padding.pairs, 3);
    }

    #[test]
    fn test_malformed_corpus_is_reported_as_such() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("train.de.id"), "5 6\n7 8\n").unwrap();
        fs::write(dir.path().join("train.en.id"), "1 2 3 4\n").unwrap();

        let cfg = LoaderConfig { data_dir: dir.path().to_path_buf(), ..LoaderConfig::default() };
        let err = StatsUseCase::new(cfg).execute().unwrap_err();
        assert!(err.to_string().starts_with("Malformed corpus in"));
    }
}
