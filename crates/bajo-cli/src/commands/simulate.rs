//! Synthetic signal command: exercise the pipeline without hardware.

use clap::Args;

use bajo_io::{BlockSource, IntensityEngine, SineSource};

use super::common::{Emitter, OutputFormat, TuningArgs, print_summary};

/// Arguments for `bajo simulate`.
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Tone frequency in Hz
    #[arg(short, long, default_value_t = 60.0)]
    frequency: f32,

    /// Tone amplitude in [0, 1]
    #[arg(short, long, default_value_t = 1.0)]
    amplitude: f32,

    /// Duration in seconds
    #[arg(short, long, default_value_t = 2.0)]
    duration: f32,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 48000)]
    sample_rate: u32,

    /// Delivery block size in samples (mimics capture cadence)
    #[arg(long, default_value_t = 480)]
    block_size: usize,

    #[command(flatten)]
    tuning: TuningArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,
}

/// Run a synthetic tone through the pipeline.
pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let mut source = SineSource::new(
        args.sample_rate,
        args.frequency,
        args.amplitude,
        args.duration,
        args.block_size,
    );

    let config = args.tuning.engine_config(args.sample_rate)?;
    let mut engine = IntensityEngine::new(&config)?;

    println!(
        "Simulating {} Hz at amplitude {} for {}s ({} samples)",
        args.frequency,
        args.amplitude,
        args.duration,
        source.total_samples()
    );

    let mut emitter = Emitter::new(args.output);
    source.run(&mut |block| {
        engine.ingest_block(block, &mut |kind, sample| emitter.emit(kind, sample));
    })?;

    emitter.finish();
    print_summary(&emitter);
    Ok(())
}
