//! WAV file reading and block delivery.

use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::source::{BlockSource, StopHandle};
use crate::{Error, Result};

/// WAV file specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

/// Read a WAV file and return samples as f32 along with the spec.
///
/// Integer PCM is normalized by the maximum magnitude of the native
/// range (i16 becomes `sample / 32768.0`). Multi-channel files are
/// mixed down to one analysis channel by averaging channels.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;

    let samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            let max_val = (1i32 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    // Mix down to mono if multi-channel
    let mono_samples = if channels > 1 {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok((mono_samples, spec))
}

/// Delivers a WAV file's samples as fixed-size blocks.
///
/// The file is decoded up front; `run` then plays it through the
/// pipeline at full speed, one `block_size` chunk at a time (final
/// block may be short). Models a wav-pipe input without the pipe.
#[derive(Debug)]
pub struct WavSource {
    samples: Vec<f32>,
    sample_rate: u32,
    block_size: usize,
    stop: StopHandle,
}

impl WavSource {
    /// Open and decode a WAV file for block delivery.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Wav`] for unreadable or malformed files and
    /// [`Error::Stream`] for a zero-size block request.
    pub fn open<P: AsRef<Path>>(path: P, block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::Stream("block size must be non-zero".into()));
        }
        let (samples, spec) = read_wav(path)?;
        tracing::info!(
            sample_rate = spec.sample_rate,
            channels = spec.channels,
            samples = samples.len(),
            "wav source opened"
        );
        Ok(Self {
            samples,
            sample_rate: spec.sample_rate,
            block_size,
            stop: StopHandle::new(),
        })
    }

    /// Number of (mono) samples in the file.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the file decoded to zero samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl BlockSource for WavSource {
    fn name(&self) -> &str {
        "wav"
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    fn run(&mut self, on_block: &mut dyn FnMut(&[f32])) -> Result<()> {
        for block in self.samples.chunks(self.block_size) {
            if self.stop.is_stopped() {
                break;
            }
            on_block(block);
        }
        Ok(())
    }
}
