//! WAV file analysis command.

use std::path::PathBuf;

use clap::Args;

use bajo_io::{BlockSource, IntensityEngine, WavSource};

use super::common::{Emitter, OutputFormat, TuningArgs, print_summary};

/// Arguments for `bajo analyze`.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Input WAV file
    input: PathBuf,

    /// Delivery block size in samples (mimics capture cadence)
    #[arg(long, default_value_t = 512)]
    block_size: usize,

    #[command(flatten)]
    tuning: TuningArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Suppress per-sample output, print only the summary
    #[arg(long)]
    summary_only: bool,
}

/// Analyze a WAV file offline.
pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut source = WavSource::open(&args.input, args.block_size)?;
    let sample_rate = source.sample_rate();

    let config = args.tuning.engine_config(sample_rate)?;
    let mut engine = IntensityEngine::new(&config)?;

    println!(
        "Analyzing '{}' ({} samples at {} Hz)",
        args.input.display(),
        source.len(),
        sample_rate
    );

    let mut emitter = Emitter::new(args.output);
    let summary_only = args.summary_only;
    source.run(&mut |block| {
        engine.ingest_block(block, &mut |kind, sample| {
            if summary_only {
                emitter.observe(sample.value);
            } else {
                emitter.emit(kind, sample);
            }
        });
    })?;

    emitter.finish();
    print_summary(&emitter);
    Ok(())
}
