//! FFT wrapper with windowing functions

use rustfft::{FftPlanner, num_complex::Complex};
use std::f32::consts::PI;
use std::sync::Arc;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// Rectangular (no windowing). Spectral leakage from the sharp
    /// window edges is accepted; this is the default for bass
    /// extraction, where the mask boundaries dominate anyway.
    #[default]
    Rectangular,
    /// Hann window (raised cosine), for callers that want lower
    /// sidelobes at the cost of a wider main lobe.
    Hann,
}

impl Window {
    /// Apply window to a buffer
    pub fn apply(&self, buffer: &mut [f32]) {
        let n = buffer.len();
        match self {
            Window::Rectangular => {}
            Window::Hann => {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    let w = 0.5 * (1.0 - (2.0 * PI * i as f32 / n as f32).cos());
                    *sample *= w;
                }
            }
        }
    }
}

/// FFT processor with a cached plan for one transform size.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);

        Self { fft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Perform forward FFT on real input
    ///
    /// Input shorter than the FFT size is zero-padded; longer input is
    /// truncated. Returns the complex spectrum's positive frequencies
    /// (size/2 + 1 bins, DC to Nyquist); by real-input symmetry the
    /// discarded upper half carries no independent information.
    pub fn forward(&self, input: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> =
            input.iter().map(|&x| Complex::new(x, 0.0)).collect();

        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.size / 2 + 1);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dc_detection() {
        let fft = Fft::new(256);

        let input = vec![1.0; 256];
        let spectrum = fft.forward(&input);

        // DC bin should dominate everything else combined.
        let dc_mag = spectrum[0].norm();
        let other_mag: f32 = spectrum[1..].iter().map(|c| c.norm()).sum();

        assert!(dc_mag > other_mag * 10.0);
    }

    #[test]
    fn test_bin_aligned_sine_hits_one_bin() {
        let fft = Fft::new(256);

        // 8 full cycles in 256 samples lands exactly on bin 8.
        let input: Vec<f32> = (0..256)
            .map(|i| (2.0 * PI * 8.0 * i as f32 / 256.0).sin())
            .collect();
        let spectrum = fft.forward(&input);

        assert!(spectrum[8].norm() > 100.0);
        for (i, bin) in spectrum.iter().enumerate() {
            if i != 8 {
                assert!(bin.norm() < 1.0, "bin {} leaked: {}", i, bin.norm());
            }
        }
    }

    #[test]
    fn test_short_input_is_zero_padded() {
        let fft = Fft::new(256);
        let spectrum = fft.forward(&[1.0; 16]);
        assert_eq!(spectrum.len(), 129);
        assert!(spectrum[0].norm() > 0.0);
    }

    #[test]
    fn test_window_hann() {
        let mut buffer = vec![1.0; 100];
        Window::Hann.apply(&mut buffer);

        // Hann window should be 0 at edges, 1 at center
        assert!(buffer[0] < 0.01);
        assert!((buffer[50] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_window_rectangular_is_identity() {
        let mut buffer = vec![0.5; 64];
        Window::Rectangular.apply(&mut buffer);
        assert!(buffer.iter().all(|&v| v == 0.5));
    }
}
