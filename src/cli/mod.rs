// ============================================================
// Layer 1: CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap.
// All work is delegated to Layer 2 (application); this layer
// only routes and prints.
//
//   1. `stats` : corpus size, batch count, padding efficiency
//   2. `show`  : one padded batch
//   3. `epochs`: per-epoch padding under windowed shuffling

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, CorpusArgs, EpochsArgs, ShowArgs};

/// The main CLI struct
#[derive(Parser, Debug)]
#[command(
    name = "pairbatch",
    version = "0.1.0",
    about = "Length-sorted, window-shuffled padded batches from parallel token-id files."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Stats(args)  => run_stats(args),
            Commands::Show(args)   => run_show(args),
            Commands::Epochs(args) => run_epochs(args),
        }
    }
}

fn run_stats(args: CorpusArgs) -> Result<()> {
    use crate::application::stats_use_case::StatsUseCase;

    let report = StatsUseCase::new(args.into()).execute()?;

    println!("pairs:             {}", report.pairs);
    println!("batches:           {}", report.batches);
    println!("longest source:    {}", report.max_source);
    println!("longest target:    {}", report.max_target);
    println!("source efficiency: {:.1}%", report.padding.source_efficiency() * 100.0);
    println!("target efficiency: {:.1}%", report.padding.target_efficiency() * 100.0);
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<()> {
    use crate::application::show_use_case::ShowUseCase;

    let use_case = ShowUseCase::new(args.corpus.into(), args.index, args.shuffle_window);
    print!("{}", use_case.execute()?);
    Ok(())
}

fn run_epochs(args: EpochsArgs) -> Result<()> {
    use crate::application::epochs_use_case::EpochsUseCase;

    tracing::info!(
        "Simulating {} epochs with shuffle window {}",
        args.epochs,
        args.shuffle_window
    );

    let use_case = EpochsUseCase::new(
        args.corpus.into(),
        args.epochs,
        args.shuffle_window,
        args.metrics_dir,
    );
    for row in use_case.execute()? {
        println!(
            "Epoch {:>3} | batches={} | efficiency={:.2}%",
            row.epoch,
            row.stats.batches,
            row.stats.efficiency() * 100.0,
        );
    }
    Ok(())
}
