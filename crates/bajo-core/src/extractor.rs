//! Bass-extraction strategy interface and the time-domain strategy.
//!
//! The pipeline supports two interchangeable strategies behind one
//! trait: the spectral (windowed FFT) extractor in `bajo-analysis`, and
//! the time-domain [`IirBassExtractor`] here. Both consume raw sample
//! blocks and append raw intensity values; cadence differs (one value
//! per analysis window versus one per sample), which is why the trait
//! speaks in blocks rather than single samples.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;

use crate::band::ConfigError;
use crate::biquad::Biquad;

/// Which strategy produced an intensity value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractorKind {
    /// Block-based windowed FFT with a hard band mask.
    Spectral,
    /// Continuous biquad low-pass filtering.
    Iir,
}

impl ExtractorKind {
    /// Lowercase label used in CLI output and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spectral => "spectral",
            Self::Iir => "iir",
        }
    }
}

impl core::fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One emitted intensity value.
///
/// `seq` increases strictly monotonically per pipeline; `value` is
/// non-negative once the pipeline has conditioned the raw extractor
/// output. The producer does not retain samples after emission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensitySample {
    /// Position in the emission order of the producing pipeline.
    pub seq: u64,
    /// Conditioned bass intensity, `>= 0`.
    pub value: f32,
}

/// A bass-extraction strategy.
///
/// Implementations consume sample blocks of arbitrary length and append
/// raw (unconditioned, possibly negative) intensity values to `out` in
/// arrival order. Internal state persists across calls; feeding the
/// same samples split differently across blocks produces identical
/// output.
pub trait Extractor {
    /// Consume a block, appending any produced values to `out`.
    ///
    /// A zero-length block appends nothing and is not an error.
    fn ingest(&mut self, block: &[f32], out: &mut Vec<f32>);

    /// Clear all internal state (filter registers, partial windows).
    fn reset(&mut self);
}

/// Time-domain bass extraction via a biquad low-pass filter.
///
/// Approximates "bass" as everything below a single cutoff frequency
/// and emits one filtered amplitude per input sample. The filter state
/// persists across block boundaries for the extractor's lifetime.
///
/// Output values may be negative; rectification and scaling are the
/// pipeline's job.
#[derive(Debug, Clone)]
pub struct IirBassExtractor {
    filter: Biquad,
}

impl IirBassExtractor {
    /// Create an extractor for the given sample rate and cutoff.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a cutoff outside `(0, sample_rate/2)`
    /// or a non-positive sample rate.
    pub fn new(sample_rate: f32, cutoff_hz: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            filter: Biquad::lowpass(sample_rate, cutoff_hz)?,
        })
    }

    /// Filter a single sample.
    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        self.filter.process(sample)
    }
}

impl Extractor for IirBassExtractor {
    fn ingest(&mut self, block: &[f32], out: &mut Vec<f32>) {
        out.reserve(block.len());
        for &sample in block {
            out.push(self.filter.process(sample));
        }
    }

    fn reset(&mut self) {
        self.filter.clear();
    }
}
