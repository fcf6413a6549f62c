//! Spectral bass extraction: FFT, hard band mask, summed magnitudes.

use bajo_core::{BandConfig, Extractor, FrameAssembler};
use rustfft::num_complex::Complex;

use crate::fft::{Fft, Window};

/// Block-based bass extraction via a windowed FFT and a band mask.
///
/// Each analysis window is transformed, every bin outside the
/// configured band is zeroed (a hard mask, not a smooth filter — the
/// sharp cutoff leaks and that is accepted behavior), and the
/// magnitudes of the surviving bins are summed into one intensity
/// scalar.
///
/// Analysis is stateless per call: [`analyze`](Self::analyze) is a pure
/// function of the input window and the [`BandConfig`]. The only state
/// on this type is the internal [`FrameAssembler`] used when whole
/// blocks are fed through the [`Extractor`] interface.
pub struct SpectralBassExtractor {
    band: BandConfig,
    window_fn: Window,
    fft: Fft,
    assembler: FrameAssembler,
}

impl SpectralBassExtractor {
    /// Create an extractor with no windowing function applied.
    pub fn new(band: BandConfig) -> Self {
        Self::with_window(band, Window::Rectangular)
    }

    /// Create an extractor applying `window_fn` before each transform.
    pub fn with_window(band: BandConfig, window_fn: Window) -> Self {
        Self {
            band,
            window_fn,
            fft: Fft::new(band.window_size()),
            assembler: FrameAssembler::new(band.window_size()),
        }
    }

    /// The band configuration this extractor analyzes against.
    pub fn band(&self) -> &BandConfig {
        &self.band
    }

    /// Analyze one window of samples into a bass-intensity scalar.
    ///
    /// Expects exactly `window_size` samples; shorter input is
    /// zero-padded and longer input truncated. A band too narrow to
    /// cover any bin yields 0.0 — a valid result, not an error.
    pub fn analyze(&self, window: &[f32]) -> f32 {
        analyze_window(&self.fft, &self.band, self.window_fn, window)
    }
}

impl Extractor for SpectralBassExtractor {
    fn ingest(&mut self, block: &[f32], out: &mut Vec<f32>) {
        self.assembler.push_block(block);
        while let Some(window) = self.assembler.next_window() {
            out.push(analyze_window(&self.fft, &self.band, self.window_fn, window));
        }
    }

    fn reset(&mut self) {
        self.assembler.clear();
    }
}

fn analyze_window(fft: &Fft, band: &BandConfig, window_fn: Window, window: &[f32]) -> f32 {
    let mut samples = window.to_vec();
    samples.resize(band.window_size(), 0.0);
    window_fn.apply(&mut samples);

    let mut spectrum = fft.forward(&samples);

    // Hard band-pass mask over the usable bins below Nyquist.
    let bins = band.bins();
    for (i, bin) in spectrum.iter_mut().take(bins).enumerate() {
        if !band.in_band(band.freq(i)) {
            *bin = Complex::new(0.0, 0.0);
        }
    }

    spectrum.iter().take(bins).map(|c| c.norm()).sum()
}
