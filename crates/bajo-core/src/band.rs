//! Bass-band configuration and bin-to-frequency mapping.
//!
//! [`BandConfig`] captures the immutable parameters of the target
//! frequency band and the analysis window, and owns the arithmetic that
//! maps FFT bin indices to frequencies. All invariants are checked at
//! construction; a `BandConfig` that exists is valid.

/// Errors produced when validating band or filter parameters.
///
/// These are all construction-time errors. Extraction itself never
/// fails on numeric grounds; degenerate-but-valid configurations (for
/// example a band narrower than one bin) produce zero output instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The analysis window size must be a power of two, at least 2.
    WindowNotPowerOfTwo(usize),
    /// The lower band edge must be a positive frequency.
    NonPositiveLow(f32),
    /// The lower band edge must lie strictly below the upper edge.
    EmptyBand {
        /// Configured lower edge in Hz.
        low_hz: f32,
        /// Configured upper edge in Hz.
        high_hz: f32,
    },
    /// The upper band edge must lie strictly below the Nyquist frequency.
    BandAboveNyquist {
        /// Configured upper edge in Hz.
        high_hz: f32,
        /// Nyquist frequency (half the sample rate) in Hz.
        nyquist: f32,
    },
    /// A low-pass cutoff must lie strictly between 0 and Nyquist.
    CutoffOutOfRange {
        /// Configured cutoff in Hz.
        cutoff_hz: f32,
        /// Nyquist frequency (half the sample rate) in Hz.
        nyquist: f32,
    },
    /// The sample rate must be a positive number of Hz.
    ZeroSampleRate,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::WindowNotPowerOfTwo(n) => {
                write!(f, "window size {n} is not a power of two >= 2")
            }
            Self::NonPositiveLow(low) => {
                write!(f, "lower band edge {low} Hz is not positive")
            }
            Self::EmptyBand { low_hz, high_hz } => {
                write!(f, "band is empty: low edge {low_hz} Hz >= high edge {high_hz} Hz")
            }
            Self::BandAboveNyquist { high_hz, nyquist } => {
                write!(f, "high edge {high_hz} Hz is at or above Nyquist ({nyquist} Hz)")
            }
            Self::CutoffOutOfRange { cutoff_hz, nyquist } => {
                write!(
                    f,
                    "cutoff {cutoff_hz} Hz is outside the open range (0, {nyquist}) Hz"
                )
            }
            Self::ZeroSampleRate => write!(f, "sample rate must be positive"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Immutable description of the bass band and the spectral analysis window.
///
/// Construction validates every invariant the spectral path relies on:
/// the window size is a power of two, the band edges are ordered, and
/// the band lies below Nyquist. Changing the sample rate means building
/// a new `BandConfig` (and new extractors from it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandConfig {
    sample_rate: u32,
    low_hz: f32,
    high_hz: f32,
    window_size: usize,
}

impl BandConfig {
    /// Create a validated band configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `window_size` is not a power of two
    /// (or is below 2), if `low_hz` is not positive, if
    /// `low_hz >= high_hz`, or if `high_hz` is at or above Nyquist.
    pub fn new(
        sample_rate: u32,
        low_hz: f32,
        high_hz: f32,
        window_size: usize,
    ) -> Result<Self, ConfigError> {
        if sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if window_size < 2 || !window_size.is_power_of_two() {
            return Err(ConfigError::WindowNotPowerOfTwo(window_size));
        }
        if low_hz <= 0.0 {
            return Err(ConfigError::NonPositiveLow(low_hz));
        }
        if low_hz >= high_hz {
            return Err(ConfigError::EmptyBand { low_hz, high_hz });
        }
        let nyquist = sample_rate as f32 / 2.0;
        if high_hz >= nyquist {
            return Err(ConfigError::BandAboveNyquist { high_hz, nyquist });
        }
        Ok(Self {
            sample_rate,
            low_hz,
            high_hz,
            window_size,
        })
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Lower band edge in Hz.
    pub fn low_hz(&self) -> f32 {
        self.low_hz
    }

    /// Upper band edge in Hz.
    pub fn high_hz(&self) -> f32 {
        self.high_hz
    }

    /// Analysis window length in samples.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of usable spectrum bins below Nyquist (`window_size / 2`).
    pub fn bins(&self) -> usize {
        self.window_size / 2
    }

    /// Frequency resolution of one bin in Hz (`sample_rate / window_size`).
    pub fn resolution(&self) -> f32 {
        self.sample_rate as f32 / self.window_size as f32
    }

    /// Center frequency of bin `bin` in Hz.
    ///
    /// Valid for `bin` in `[0, window_size / 2]`; bin 0 is DC.
    pub fn freq(&self, bin: usize) -> f32 {
        bin as f32 * self.sample_rate as f32 / self.window_size as f32
    }

    /// Whether `freq` lies inside the bass band.
    ///
    /// Both edges are inclusive: a bin landing exactly on `low_hz` or
    /// `high_hz` counts as in-band.
    pub fn in_band(&self, freq: f32) -> bool {
        self.low_hz <= freq && freq <= self.high_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_band() -> BandConfig {
        BandConfig::new(48000, 20.0, 250.0, 1024).unwrap()
    }

    #[test]
    fn band_edges_are_inclusive() {
        let band = test_band();
        assert!(band.in_band(band.low_hz()));
        assert!(band.in_band(band.high_hz()));
        assert!(!band.in_band(band.low_hz() - 0.01));
        assert!(!band.in_band(band.high_hz() + 0.01));
    }

    #[test]
    fn bin_frequency_mapping() {
        let band = test_band();
        assert_eq!(band.freq(0), 0.0);
        assert_eq!(band.freq(1), 46.875);
        assert_eq!(band.freq(512), 24000.0);
        assert_eq!(band.bins(), 512);
        assert_eq!(band.resolution(), 46.875);
    }

    #[test]
    fn rejects_non_power_of_two_window() {
        let err = BandConfig::new(48000, 20.0, 250.0, 1000).unwrap_err();
        assert_eq!(err, ConfigError::WindowNotPowerOfTwo(1000));
        assert!(BandConfig::new(48000, 20.0, 250.0, 1).is_err());
        assert!(BandConfig::new(48000, 20.0, 250.0, 0).is_err());
    }

    #[test]
    fn rejects_inverted_or_empty_band() {
        assert!(matches!(
            BandConfig::new(48000, 250.0, 250.0, 1024),
            Err(ConfigError::EmptyBand { .. })
        ));
        assert!(matches!(
            BandConfig::new(48000, 300.0, 250.0, 1024),
            Err(ConfigError::EmptyBand { .. })
        ));
    }

    #[test]
    fn rejects_band_at_or_above_nyquist() {
        assert!(matches!(
            BandConfig::new(48000, 20.0, 24000.0, 1024),
            Err(ConfigError::BandAboveNyquist { .. })
        ));
        assert!(matches!(
            BandConfig::new(48000, 20.0, 30000.0, 1024),
            Err(ConfigError::BandAboveNyquist { .. })
        ));
        // Just below Nyquist is fine.
        assert!(BandConfig::new(48000, 20.0, 23999.0, 1024).is_ok());
    }

    #[test]
    fn rejects_non_positive_low_edge() {
        assert!(matches!(
            BandConfig::new(48000, 0.0, 250.0, 1024),
            Err(ConfigError::NonPositiveLow(_))
        ));
    }

    #[test]
    fn rejects_zero_sample_rate() {
        assert_eq!(
            BandConfig::new(0, 20.0, 250.0, 1024).unwrap_err(),
            ConfigError::ZeroSampleRate
        );
    }

    #[test]
    fn narrow_band_can_cover_zero_bins() {
        // Resolution is 46.875 Hz; a band between bins matches nothing.
        let band = BandConfig::new(48000, 50.0, 90.0, 1024).unwrap();
        let in_band_bins = (0..band.bins()).filter(|&i| band.in_band(band.freq(i))).count();
        assert_eq!(in_band_bins, 0);
    }
}
