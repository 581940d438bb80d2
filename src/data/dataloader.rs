// ============================================================
// Layer 4: PairLoader
// ============================================================
// The public face of the data layer:
//
//   let mut loader = PairLoader::<B>::new(&config, device)?;
//   for epoch in 0..epochs {
//       loader.shuffle(window)?;
//       for i in 0..loader.len() {
//           let batch = loader.get(i)?;   // [b, Ls] / [b, Lt]
//           ...
//       }
//   }
//
// Construction loads the corpus and sorts it once by source
// length. `shuffle` reorders within windows; `get` pads and
// materialises one batch on demand through Burn's Batcher,
// reading pairs from the corpus as a Dataset. Nothing is cached: after
// a shuffle, batch i reads whatever pairs now sit at its
// positions.
//
// Concurrency: `shuffle` takes &mut self and `get` takes
// &self, so a reader can never observe a half-shuffled order.
// Sharing a loader across threads needs an RwLock around it.

use std::ops::Range;

use burn::data::{dataloader::batcher::Batcher, dataset::Dataset};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::data::{
    batcher::{PairBatch, PairBatcher},
    corpus::{Corpus, PaddingStats},
    loader::IdFileSource,
};
use crate::domain::{
    config::LoaderConfig,
    error::DataError,
    pair::SentencePair,
    traits::PairSource,
};
use burn::prelude::*;

pub struct PairLoader<B: Backend> {
    config:  LoaderConfig,
    corpus:  Corpus,
    batcher: PairBatcher,
    device:  B::Device,
    rng:     StdRng,
}

impl<B: Backend> PairLoader<B> {
    /// Load `train.<src>.id` / `train.<tgt>.id` from the configured
    /// directory and build a sorted loader placing batches on `device`.
    pub fn new(config: &LoaderConfig, device: B::Device) -> Result<Self, DataError> {
        config.validate()?;
        let source = IdFileSource::new(config.source_path(), config.target_path());
        Self::from_source(&source, config, device)
    }

    /// Build a loader from any pair source.
    pub fn from_source<S: PairSource>(
        source: &S,
        config: &LoaderConfig,
        device: B::Device,
    ) -> Result<Self, DataError> {
        config.validate()?;

        let corpus = Corpus::new(source.load_pairs()?);
        let rng    = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };

        tracing::debug!(
            "Loader ready: {} pairs, {} batches of {}",
            corpus.pair_count(),
            corpus.batch_count(config.batch_size),
            config.batch_size,
        );

        Ok(Self {
            config: config.clone(),
            corpus,
            batcher: PairBatcher,
            device,
            rng,
        })
    }

    /// Number of batches: ceil(pair_count / batch_size).
    pub fn len(&self) -> usize {
        self.corpus.batch_count(self.config.batch_size)
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Number of accepted pairs.
    pub fn pair_count(&self) -> usize {
        self.corpus.pair_count()
    }

    pub fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn device(&self) -> &B::Device {
        &self.device
    }

    /// Materialise batch `index` from the current order.
    pub fn get(&self, index: usize) -> Result<PairBatch<B>, DataError> {
        let range = self.corpus.batch_range(self.config.batch_size, index)?;
        Ok(self.materialise(range))
    }

    /// Every batch of the current order, in index order.
    pub fn iter(&self) -> impl Iterator<Item = PairBatch<B>> + '_ {
        let total = self.corpus.pair_count();
        let size  = self.config.batch_size;

        (0..total)
            .step_by(size)
            .map(move |start| self.materialise(start..(start + size).min(total)))
    }

    fn materialise(&self, positions: Range<usize>) -> PairBatch<B> {
        let items: Vec<SentencePair> = positions.filter_map(|p| self.corpus.get(p)).collect();
        Batcher::<B, SentencePair, PairBatch<B>>::batch(&self.batcher, items, &self.device)
    }

    /// Shuffle inside windows of `window` pairs using the loader's RNG.
    pub fn shuffle(&mut self, window: usize) -> Result<(), DataError> {
        let mut rng = self.rng.clone();
        self.shuffle_with(window, &mut rng)?;
        self.rng = rng;
        Ok(())
    }

    /// Shuffle inside windows using a caller-supplied RNG.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, window: usize, rng: &mut R) -> Result<(), DataError> {
        self.corpus.shuffle_windows(window, rng)
    }

    /// Padding efficiency of the current order.
    pub fn padding_stats(&self) -> PaddingStats {
        self.corpus.padding_stats(self.config.batch_size)
    }
}
