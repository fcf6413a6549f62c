//! Shared command plumbing: tuning flags, output formats, emission.

use std::io::Write;
use std::path::PathBuf;

use bajo_analysis::Window;
use bajo_core::{ExtractorKind, IntensitySample};
use bajo_io::{Conditioning, EngineConfig, Strategy};
use clap::{Args, ValueEnum};

use crate::preset::Preset;

/// Extraction strategy flag.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StrategyArg {
    /// Windowed FFT with a hard band mask
    #[default]
    Spectral,
    /// Biquad low-pass filtering
    Iir,
    /// Both strategies side by side
    Both,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Spectral => Strategy::Spectral,
            StrategyArg::Iir => Strategy::Iir,
            StrategyArg::Both => Strategy::Both,
        }
    }
}

/// How emitted intensity samples are written to stdout.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// One plain-text line per sample
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// A live console bar meter (pairs well with --normalize)
    Meter,
}

/// Pipeline tuning flags shared by realtime, analyze, and simulate.
///
/// A preset file replaces all of the tuning flags below; without one,
/// the flags (and their defaults) apply.
#[derive(Debug, Args)]
pub struct TuningArgs {
    /// Preset file (TOML) replacing the tuning flags
    #[arg(short, long)]
    pub preset: Option<PathBuf>,

    /// Extraction strategy
    #[arg(short, long, value_enum, default_value = "spectral")]
    pub strategy: StrategyArg,

    /// Lower bass-band edge in Hz (spectral)
    #[arg(long, default_value_t = 20.0)]
    pub low_hz: f32,

    /// Upper bass-band edge in Hz (spectral)
    #[arg(long, default_value_t = 250.0)]
    pub high_hz: f32,

    /// Analysis window size in samples, power of two (spectral)
    #[arg(long, default_value_t = 1024)]
    pub window_size: usize,

    /// Apply a Hann window before each transform (spectral)
    #[arg(long)]
    pub hann: bool,

    /// Low-pass cutoff in Hz (iir)
    #[arg(long, default_value_t = 250.0)]
    pub cutoff_hz: f32,

    /// Smooth intensity with an attack/release follower
    #[arg(long)]
    pub smooth: bool,

    /// Smoothing attack time in ms
    #[arg(long, default_value_t = 10.0)]
    pub attack_ms: f32,

    /// Smoothing release time in ms
    #[arg(long, default_value_t = 200.0)]
    pub release_ms: f32,

    /// Track and subtract a noise floor
    #[arg(long)]
    pub noise_floor: bool,

    /// Normalize intensity into [0, 1] against a running peak
    #[arg(long)]
    pub normalize: bool,

    /// Constant output gain
    #[arg(long, default_value_t = 1.0)]
    pub gain: f32,
}

impl TuningArgs {
    /// Resolve the flags (or the preset, if given) into an engine
    /// configuration at the negotiated sample rate.
    pub fn engine_config(&self, sample_rate: u32) -> anyhow::Result<EngineConfig> {
        if let Some(path) = &self.preset {
            let preset = Preset::load(path)?;
            tracing::info!(preset = %preset.name, "preset loaded");
            return preset.engine_config(sample_rate);
        }

        Ok(EngineConfig {
            sample_rate,
            strategy: self.strategy.into(),
            low_hz: self.low_hz,
            high_hz: self.high_hz,
            window_size: self.window_size,
            window_fn: if self.hann {
                Window::Hann
            } else {
                Window::Rectangular
            },
            cutoff_hz: self.cutoff_hz,
            conditioning: Conditioning {
                smoothing_ms: self.smooth.then_some((self.attack_ms, self.release_ms)),
                noise_floor: self.noise_floor,
                normalize: self.normalize,
                gain: self.gain,
            },
        })
    }
}

const METER_WIDTH: usize = 50;

/// Writes intensity samples to stdout and keeps running statistics.
pub struct Emitter {
    format: OutputFormat,
    count: u64,
    peak: f32,
    sum: f64,
}

impl Emitter {
    /// Create an emitter for the chosen output format.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            count: 0,
            peak: 0.0,
            sum: 0.0,
        }
    }

    /// Record a value in the statistics without writing it out.
    pub fn observe(&mut self, value: f32) {
        self.count += 1;
        self.peak = self.peak.max(value);
        self.sum += f64::from(value);
    }

    /// Write one intensity sample.
    pub fn emit(&mut self, kind: ExtractorKind, sample: IntensitySample) {
        self.observe(sample.value);

        match self.format {
            OutputFormat::Text => {
                println!("{:>10}  {:>8}  {:.6}", sample.seq, kind, sample.value);
            }
            OutputFormat::Json => {
                let line = serde_json::json!({
                    "seq": sample.seq,
                    "kind": kind.as_str(),
                    "value": sample.value,
                });
                println!("{line}");
            }
            OutputFormat::Meter => {
                let filled = (sample.value.clamp(0.0, 1.0) * METER_WIDTH as f32) as usize;
                print!(
                    "\r{:>8} [{}{}] {:8.3}",
                    kind,
                    "#".repeat(filled),
                    " ".repeat(METER_WIDTH - filled),
                    sample.value
                );
                let _ = std::io::stdout().flush();
            }
        }
    }

    /// Finish output (terminates a live meter line).
    pub fn finish(&self) {
        if matches!(self.format, OutputFormat::Meter) {
            println!();
        }
    }

    /// Number of samples emitted.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Highest value seen.
    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// Mean of all values seen (0.0 when nothing was emitted).
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Print the closing summary shared by the batch-style commands.
pub fn print_summary(emitter: &Emitter) {
    println!(
        "{} intensity samples, peak {:.4}, mean {:.4}",
        emitter.count(),
        emitter.peak(),
        emitter.mean()
    );
}
