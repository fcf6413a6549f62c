//! Bajo Analysis - the spectral bass-extraction path
//!
//! This crate holds the block-based extraction strategy: a forward FFT
//! over fixed-size analysis windows, a hard band-pass mask over the
//! resulting bins, and a summed in-band magnitude as the intensity
//! scalar.
//!
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`spectral`] - The [`SpectralBassExtractor`] strategy
//!
//! The time-domain strategy and everything `no_std`-compatible live in
//! `bajo-core`; this crate is std-only because of `rustfft`.
//!
//! ## Example
//!
//! ```rust
//! use bajo_analysis::SpectralBassExtractor;
//! use bajo_core::{BandConfig, Extractor};
//!
//! let band = BandConfig::new(48000, 20.0, 250.0, 1024).unwrap();
//! let mut extractor = SpectralBassExtractor::new(band);
//!
//! let mut out = Vec::new();
//! extractor.ingest(&vec![0.0; 1024], &mut out);
//! assert_eq!(out, vec![0.0]);
//! ```

pub mod fft;
pub mod spectral;

pub use fft::{Fft, Window};
pub use spectral::SpectralBassExtractor;
