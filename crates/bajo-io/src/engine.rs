//! Intensity pipeline driver.
//!
//! [`IntensityEngine`] is the orchestration point of the whole system:
//! sample blocks go in, conditioned [`IntensitySample`]s come out of a
//! synchronous sink callback, in arrival order, stamped with one shared
//! monotonic sequence. The engine owns the selected extraction
//! strategies and their conditioning state; it never touches a device
//! or a file, which keeps it fully testable with plain slices.

use bajo_analysis::{SpectralBassExtractor, Window};
use bajo_core::{
    BandConfig, Conditioner, Extractor, ExtractorKind, IirBassExtractor, IntensitySample,
};

use crate::Result;

/// Which extraction strategies the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Windowed FFT with a hard band mask (one value per window).
    #[default]
    Spectral,
    /// Biquad low-pass filtering (one value per sample).
    Iir,
    /// Both strategies side by side, for comparison.
    Both,
}

impl Strategy {
    /// Whether the spectral extractor is active.
    pub fn spectral(self) -> bool {
        matches!(self, Self::Spectral | Self::Both)
    }

    /// Whether the IIR extractor is active.
    pub fn iir(self) -> bool {
        matches!(self, Self::Iir | Self::Both)
    }
}

/// Conditioning options applied to raw extractor output.
///
/// Smoothing times are in milliseconds of stream time; the engine
/// derives each extractor's update rate (per sample for the IIR path,
/// per window for the spectral path) when building the chain.
#[derive(Debug, Clone)]
pub struct Conditioning {
    /// Attack/release smoothing times in ms, if smoothing is wanted.
    pub smoothing_ms: Option<(f32, f32)>,
    /// Track and subtract a slow-adapting noise floor.
    pub noise_floor: bool,
    /// Normalize against a decaying running peak into `[0, 1]`.
    pub normalize: bool,
    /// Constant output gain.
    pub gain: f32,
}

impl Default for Conditioning {
    fn default() -> Self {
        Self {
            smoothing_ms: None,
            noise_floor: false,
            normalize: false,
            gain: 1.0,
        }
    }
}

impl Conditioning {
    fn build(&self, update_rate: f32) -> Conditioner {
        let mut cond = Conditioner::new().with_gain(self.gain);
        if self.noise_floor {
            cond = cond.with_noise_floor(bajo_core::NoiseFloor::DEFAULT_RATE);
        }
        if let Some((attack_ms, release_ms)) = self.smoothing_ms {
            cond = cond.with_smoothing(update_rate, attack_ms, release_ms);
        }
        if self.normalize {
            cond = cond.with_normalization(bajo_core::PeakNormalizer::DEFAULT_DECAY);
        }
        cond
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Sample rate of the incoming blocks in Hz.
    pub sample_rate: u32,
    /// Active extraction strategies.
    pub strategy: Strategy,
    /// Lower bass-band edge in Hz (spectral path).
    pub low_hz: f32,
    /// Upper bass-band edge in Hz (spectral path).
    pub high_hz: f32,
    /// Analysis window length in samples, power of two (spectral path).
    pub window_size: usize,
    /// Window function applied before each transform (spectral path).
    pub window_fn: Window,
    /// Low-pass cutoff in Hz (IIR path).
    pub cutoff_hz: f32,
    /// Conditioning applied to every emitted value.
    pub conditioning: Conditioning,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            strategy: Strategy::Spectral,
            low_hz: 20.0,
            high_hz: 250.0,
            window_size: 1024,
            window_fn: Window::Rectangular,
            cutoff_hz: 250.0,
            conditioning: Conditioning::default(),
        }
    }
}

struct Lane {
    kind: ExtractorKind,
    extractor: Box<dyn Extractor + Send>,
    conditioner: Conditioner,
    scratch: Vec<f32>,
}

/// The pipeline driver: blocks in, intensity samples out.
///
/// Emission is synchronous, in the same call stack as
/// [`ingest_block`](Self::ingest_block); there is no internal queue.
/// With [`Strategy::Both`], spectral values for a block are emitted
/// before IIR values, each labeled with its [`ExtractorKind`] and all
/// sharing one strictly increasing sequence.
pub struct IntensityEngine {
    lanes: Vec<Lane>,
    seq: u64,
}

impl IntensityEngine {
    /// Build an engine from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) for invalid
    /// band, window, or cutoff parameters — configuration problems
    /// surface here, never mid-stream.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let mut lanes = Vec::new();

        if config.strategy.spectral() {
            let band = BandConfig::new(
                config.sample_rate,
                config.low_hz,
                config.high_hz,
                config.window_size,
            )?;
            let update_rate = config.sample_rate as f32 / config.window_size as f32;
            lanes.push(Lane {
                kind: ExtractorKind::Spectral,
                extractor: Box::new(SpectralBassExtractor::with_window(band, config.window_fn)),
                conditioner: config.conditioning.build(update_rate),
                scratch: Vec::new(),
            });
        }

        if config.strategy.iir() {
            let extractor =
                IirBassExtractor::new(config.sample_rate as f32, config.cutoff_hz)?;
            lanes.push(Lane {
                kind: ExtractorKind::Iir,
                extractor: Box::new(extractor),
                conditioner: config.conditioning.build(config.sample_rate as f32),
                scratch: Vec::new(),
            });
        }

        tracing::debug!(
            strategy = ?config.strategy,
            sample_rate = config.sample_rate,
            "intensity engine ready"
        );

        Ok(Self { lanes, seq: 0 })
    }

    /// Feed one sample block through every active extractor, emitting
    /// conditioned intensity samples to `sink` in arrival order.
    ///
    /// A zero-length block is a no-op.
    pub fn ingest_block(
        &mut self,
        block: &[f32],
        sink: &mut dyn FnMut(ExtractorKind, IntensitySample),
    ) {
        if block.is_empty() {
            tracing::debug!("zero-length block ignored");
            return;
        }

        for lane in &mut self.lanes {
            lane.scratch.clear();
            lane.extractor.ingest(block, &mut lane.scratch);
            for &raw in &lane.scratch {
                let value = lane.conditioner.process(raw);
                let sample = IntensitySample {
                    seq: self.seq,
                    value,
                };
                self.seq += 1;
                sink(lane.kind, sample);
            }
        }
    }

    /// Total intensity samples emitted so far.
    pub fn emitted(&self) -> u64 {
        self.seq
    }

    /// Clear extractor and conditioner state. The sequence counter is
    /// not reset; it stays monotonic for the engine's lifetime.
    pub fn reset(&mut self) {
        for lane in &mut self.lanes {
            lane.extractor.reset();
            lane.conditioner.reset();
        }
    }
}
