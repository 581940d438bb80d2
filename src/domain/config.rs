// ============================================================
// Layer 3: Loader Configuration
// ============================================================
// Everything a PairLoader needs to know at construction time.
// Serialisable so a run can record exactly how its batches
// were produced (the `epochs` command writes it as JSON next
// to the padding metrics).
//
// Corpus files live under `data_dir` and follow the naming
// used by the upstream SentencePiece export:
//
//   <data_dir>/train.<src_lang>.id
//   <data_dir>/train.<tgt_lang>.id
//
// `use_accelerator` and `non_differentiable` do not change
// batch contents. They choose the Burn backend the batches
// are created on (see infra::device).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::DataError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub data_dir:           PathBuf,
    pub src_lang:           String,
    pub tgt_lang:           String,
    pub batch_size:         usize,
    pub use_accelerator:    bool,
    pub non_differentiable: bool,
    /// Seed for the shuffle RNG; `None` draws one from the OS.
    pub seed:               Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir:           PathBuf::from("data"),
            src_lang:           "de".to_string(),
            tgt_lang:           "en".to_string(),
            batch_size:         64,
            use_accelerator:    false,
            non_differentiable: false,
            seed:               None,
        }
    }
}

impl LoaderConfig {
    /// Path of the source-side id file.
    pub fn source_path(&self) -> PathBuf {
        self.data_dir.join(format!("train.{}.id", self.src_lang))
    }

    /// Path of the target-side id file.
    pub fn target_path(&self) -> PathBuf {
        self.data_dir.join(format!("train.{}.id", self.tgt_lang))
    }

    /// Reject parameters no loader can work with.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.batch_size == 0 {
            return Err(DataError::Config("batch_size must be positive".into()));
        }
        for lang in [&self.src_lang, &self.tgt_lang] {
            if lang.trim().is_empty() || lang.contains(std::path::is_separator) {
                return Err(DataError::Config(format!("invalid language code '{lang}'")));
            }
        }
        if self.src_lang == self.tgt_lang {
            return Err(DataError::Config(format!(
                "source and target language are both '{}'",
                self.src_lang
            )));
        }
        Ok(())
    }
}
