//! Bajo Core - DSP primitives for bass-intensity extraction
//!
//! This crate provides the foundational building blocks for turning a
//! stream of PCM sample blocks into a scalar "bass intensity" signal,
//! designed for real-time use with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Extraction
//!
//! - [`Extractor`] - Object-safe trait for bass-extraction strategies
//! - [`IirBassExtractor`] - Continuous time-domain strategy (biquad low-pass)
//! - [`IntensitySample`] - One emitted intensity value with its sequence number
//!
//! ## Filters
//!
//! - [`Biquad`] - Second-order IIR low-pass with RBJ cookbook coefficients
//!
//! ## Framing
//!
//! - [`FrameAssembler`] - Adapts variable-size sample blocks into
//!   fixed-size analysis windows
//!
//! ## Band Mapping
//!
//! - [`BandConfig`] - Immutable bass-band parameters and bin-to-frequency
//!   mapping for the spectral path
//!
//! ## Conditioning
//!
//! - [`Conditioner`] - Rectification, noise-floor subtraction, smoothing,
//!   and peak normalization of raw extractor output
//!
//! The spectral extraction strategy itself lives in `bajo-analysis`; it
//! depends on an FFT and is therefore std-only.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (with `alloc`) for embedded use.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bajo-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bajo_core::{Extractor, IirBassExtractor};
//!
//! let mut extractor = IirBassExtractor::new(48000.0, 250.0).unwrap();
//! let block = [0.1_f32, -0.2, 0.3, -0.1];
//! let mut out = Vec::new();
//! extractor.ingest(&block, &mut out);
//! assert_eq!(out.len(), block.len());
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations while processing samples
//! - **Fail fast**: Invalid configurations are rejected at construction,
//!   never discovered mid-stream
//! - **Explicit state**: Filter and assembler state is owned, never global,
//!   and only reset on request

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod band;
pub mod biquad;
pub mod condition;
pub mod extractor;
pub mod frame;

// Re-export main types at crate root
pub use band::{BandConfig, ConfigError};
pub use biquad::Biquad;
pub use condition::{Conditioner, NoiseFloor, PeakNormalizer, Smoother};
pub use extractor::{Extractor, ExtractorKind, IirBassExtractor, IntensitySample};
pub use frame::FrameAssembler;
