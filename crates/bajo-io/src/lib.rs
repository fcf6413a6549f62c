//! Audio sources and the pipeline driver for bajo.
//!
//! This crate provides:
//!
//! - **Block sources**: [`CaptureStream`] for live cpal input,
//!   [`WavSource`] for files, [`SineSource`] for synthetic signals —
//!   all behind the [`BlockSource`] trait
//! - **The pipeline driver**: [`IntensityEngine`], which feeds sample
//!   blocks through the configured extraction strategies and emits
//!   conditioned [`IntensitySample`](bajo_core::IntensitySample)s
//!
//! ## Quick Start
//!
//! ```rust
//! use bajo_io::{EngineConfig, IntensityEngine, SineSource, BlockSource, Strategy};
//!
//! let config = EngineConfig {
//!     strategy: Strategy::Spectral,
//!     ..EngineConfig::default()
//! };
//! let mut engine = IntensityEngine::new(&config).unwrap();
//!
//! let mut source = SineSource::new(48000, 60.0, 1.0, 0.1, 480);
//! let mut peaks = Vec::new();
//! source
//!     .run(&mut |block| {
//!         engine.ingest_block(block, &mut |_kind, sample| peaks.push(sample.value));
//!     })
//!     .unwrap();
//! assert!(!peaks.is_empty());
//! ```

mod capture;
mod engine;
mod source;
mod wav;

pub use capture::{AudioDevice, CaptureConfig, CaptureStream, default_input, list_devices};
pub use engine::{Conditioning, EngineConfig, IntensityEngine, Strategy};
pub use source::{BlockSource, SineSource, StopHandle};
pub use wav::{WavSource, WavSpec, read_wav};

/// Error types for audio sources and the pipeline driver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error reported by the capture
    /// backend. The pipeline halts rather than guessing at silence.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio input device available on the system.
    #[error("No audio input device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// The device's sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Invalid band, cutoff, or window configuration.
    #[error("Invalid configuration: {0}")]
    Config(#[from] bajo_core::ConfigError),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
