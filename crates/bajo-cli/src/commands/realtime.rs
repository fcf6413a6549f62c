//! Live capture command.

use clap::Args;

use bajo_io::{BlockSource, CaptureConfig, CaptureStream, IntensityEngine};

use super::common::{Emitter, OutputFormat, TuningArgs, print_summary};

/// Arguments for `bajo realtime`.
#[derive(Debug, Args)]
pub struct RealtimeArgs {
    /// Input device: index, exact name, or partial name.
    /// For system audio, point this at a loopback/monitor device.
    #[arg(long)]
    device: Option<String>,

    #[command(flatten)]
    tuning: TuningArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,
}

/// Run live capture until ctrl-C.
pub fn run(args: RealtimeArgs) -> anyhow::Result<()> {
    let capture = CaptureConfig {
        device: args.device,
    };
    let mut source = CaptureStream::open(&capture)?;
    let sample_rate = source.sample_rate();

    let config = args.tuning.engine_config(sample_rate)?;
    let mut engine = IntensityEngine::new(&config)?;

    println!(
        "Capturing bass from '{}' at {} Hz",
        source.device_label(),
        sample_rate
    );
    println!("Press Ctrl+C to stop...\n");

    let stop = source.stop_handle();
    ctrlc::set_handler(move || {
        stop.stop();
    })?;

    let mut emitter = Emitter::new(args.output);
    source.run(&mut |block| {
        engine.ingest_block(block, &mut |kind, sample| emitter.emit(kind, sample));
    })?;

    emitter.finish();
    println!();
    print_summary(&emitter);
    Ok(())
}
