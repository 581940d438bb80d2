// ============================================================
// Layer 1: CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `stats`, `show` and `epochs`,
// and the corpus flags they share.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::domain::config::LoaderConfig;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the corpus and report pair count, batch count and padding
    Stats(CorpusArgs),

    /// Print one padded batch
    Show(ShowArgs),

    /// Simulate training epochs and log padding per epoch
    Epochs(EpochsArgs),
}

/// Flags describing where the corpus is and how to batch it.
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Directory holding train.<src-lang>.id and train.<tgt-lang>.id
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Source language code
    #[arg(long, default_value = "de")]
    pub src_lang: String,

    /// Target language code
    #[arg(long, default_value = "en")]
    pub tgt_lang: String,

    /// Number of sentence pairs per batch
    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Create batches on the WGPU device instead of the CPU
    #[arg(long)]
    pub use_accelerator: bool,

    /// Create batches on the plain backend instead of Autodiff
    #[arg(long)]
    pub non_differentiable: bool,

    /// Seed for the shuffle RNG (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Convert CLI flags into the domain-layer LoaderConfig.
/// The application layer never sees clap types.
impl From<CorpusArgs> for LoaderConfig {
    fn from(a: CorpusArgs) -> Self {
        LoaderConfig {
            data_dir:           a.data_dir,
            src_lang:           a.src_lang,
            tgt_lang:           a.tgt_lang,
            batch_size:         a.batch_size,
            use_accelerator:    a.use_accelerator,
            non_differentiable: a.non_differentiable,
            seed:               a.seed,
        }
    }
}

/// All arguments for the `show` command
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Batch index, 0-based
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    /// Shuffle within windows of this many pairs before reading
    #[arg(long)]
    pub shuffle_window: Option<usize>,
}

/// All arguments for the `epochs` command
#[derive(Args, Debug)]
pub struct EpochsArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Number of epochs to simulate
    #[arg(long, default_value_t = 5)]
    pub epochs: usize,

    /// Shuffle within windows of this many pairs each epoch
    #[arg(long, default_value_t = 1000)]
    pub shuffle_window: usize,

    /// Directory for padding.csv and loader_config.json
    #[arg(long)]
    pub metrics_dir: Option<PathBuf>,
}
