//! Intensity conditioning: rectification, noise floor, smoothing,
//! normalization.
//!
//! Raw extractor output is jumpy and scale-free. The conditioning chain
//! turns it into a stable value a sink can map directly onto a light or
//! a meter. Every stage is optional except rectification; an unadorned
//! [`Conditioner`] just takes the absolute value and applies gain.

use libm::expf;

/// Slow-tracking noise floor estimator.
///
/// Maintains an exponential moving average of the incoming intensity
/// and subtracts it, clamping at zero. With the default rate the floor
/// adapts over a few seconds of windows, so steady background hiss is
/// cancelled while beats punch through.
#[derive(Debug, Clone)]
pub struct NoiseFloor {
    floor: f32,
    rate: f32,
}

impl NoiseFloor {
    /// Default adaptation rate per update.
    pub const DEFAULT_RATE: f32 = 0.02;

    /// Create a tracker with the given adaptation rate in `(0, 1]`.
    pub fn new(rate: f32) -> Self {
        Self {
            floor: 0.0,
            rate: rate.clamp(1e-6, 1.0),
        }
    }

    /// Update the floor estimate and return the floor-subtracted value.
    pub fn process(&mut self, value: f32) -> f32 {
        self.floor = self.floor * (1.0 - self.rate) + value * self.rate;
        (value - self.floor).max(0.0)
    }

    /// Current floor estimate.
    pub fn level(&self) -> f32 {
        self.floor
    }

    /// Reset the floor estimate to zero.
    pub fn reset(&mut self) {
        self.floor = 0.0;
    }
}

impl Default for NoiseFloor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATE)
    }
}

/// Attack/release exponential smoother.
///
/// Rises with the attack coefficient and falls with the release
/// coefficient, giving the familiar fast-up slow-down meter response.
/// `update_rate` is how many values per second this smoother sees: the
/// audio rate for the per-sample path, `sample_rate / window_size` for
/// the windowed path.
#[derive(Debug, Clone)]
pub struct Smoother {
    level: f32,
    attack_coeff: f32,
    release_coeff: f32,
}

impl Smoother {
    /// Create a smoother with attack and release times in milliseconds.
    pub fn new(update_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        Self {
            level: 0.0,
            attack_coeff: coeff(update_rate, attack_ms.max(0.1)),
            release_coeff: coeff(update_rate, release_ms.max(1.0)),
        }
    }

    /// Smooth one value.
    #[inline]
    pub fn process(&mut self, value: f32) -> f32 {
        let c = if value > self.level {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.level = c * self.level + (1.0 - c) * value;
        self.level
    }

    /// Current smoothed level.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Reset the level to zero.
    pub fn reset(&mut self) {
        self.level = 0.0;
    }
}

// coeff = exp(-1 / (time_ms * rate / 1000))
fn coeff(update_rate: f32, time_ms: f32) -> f32 {
    expf(-1.0 / (time_ms * update_rate / 1000.0))
}

/// Running-peak normalizer mapping intensity into `[0, 1]`.
///
/// Tracks a decaying peak of everything seen so far and divides by it.
/// All-zero history maps to zero rather than dividing by zero.
#[derive(Debug, Clone)]
pub struct PeakNormalizer {
    peak: f32,
    decay: f32,
}

impl PeakNormalizer {
    /// Default per-update peak decay.
    pub const DEFAULT_DECAY: f32 = 0.995;

    /// Create a normalizer whose tracked peak decays by `decay` per update.
    pub fn new(decay: f32) -> Self {
        Self {
            peak: 0.0,
            decay: decay.clamp(0.0, 1.0),
        }
    }

    /// Normalize one value against the running peak.
    pub fn process(&mut self, value: f32) -> f32 {
        self.peak = (self.peak * self.decay).max(value);
        if self.peak > 0.0 {
            (value / self.peak).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Reset the tracked peak.
    pub fn reset(&mut self) {
        self.peak = 0.0;
    }
}

impl Default for PeakNormalizer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DECAY)
    }
}

/// Full conditioning chain applied to raw extractor output.
///
/// Order: rectify, subtract noise floor, smooth, normalize, gain.
/// Stages not configured are skipped. For any finite input the output
/// is finite and non-negative, and zero input stays zero through the
/// whole chain.
#[derive(Debug, Clone, Default)]
pub struct Conditioner {
    noise_floor: Option<NoiseFloor>,
    smoother: Option<Smoother>,
    normalizer: Option<PeakNormalizer>,
    gain: Option<f32>,
}

impl Conditioner {
    /// Rectify-only conditioner with unity gain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable noise-floor subtraction with the given adaptation rate.
    pub fn with_noise_floor(mut self, rate: f32) -> Self {
        self.noise_floor = Some(NoiseFloor::new(rate));
        self
    }

    /// Enable attack/release smoothing.
    pub fn with_smoothing(mut self, update_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        self.smoother = Some(Smoother::new(update_rate, attack_ms, release_ms));
        self
    }

    /// Enable running-peak normalization into `[0, 1]`.
    pub fn with_normalization(mut self, decay: f32) -> Self {
        self.normalizer = Some(PeakNormalizer::new(decay));
        self
    }

    /// Apply a constant output gain.
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = Some(gain);
        self
    }

    /// Condition one raw extractor value.
    pub fn process(&mut self, raw: f32) -> f32 {
        let mut value = raw.abs();
        if let Some(nf) = &mut self.noise_floor {
            value = nf.process(value);
        }
        if let Some(sm) = &mut self.smoother {
            value = sm.process(value);
        }
        if let Some(norm) = &mut self.normalizer {
            value = norm.process(value);
        }
        if let Some(gain) = self.gain {
            value *= gain;
        }
        value
    }

    /// Reset all stage state.
    pub fn reset(&mut self) {
        if let Some(nf) = &mut self.noise_floor {
            nf.reset();
        }
        if let Some(sm) = &mut self.smoother {
            sm.reset();
        }
        if let Some(norm) = &mut self.normalizer {
            norm.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_conditioner_rectifies() {
        let mut cond = Conditioner::new();
        assert_eq!(cond.process(-0.5), 0.5);
        assert_eq!(cond.process(0.25), 0.25);
        assert_eq!(cond.process(0.0), 0.0);
    }

    #[test]
    fn gain_scales_output() {
        let mut cond = Conditioner::new().with_gain(2.0);
        assert_eq!(cond.process(-0.5), 1.0);
    }

    #[test]
    fn noise_floor_cancels_steady_input() {
        let mut nf = NoiseFloor::new(0.05);
        let mut out = 0.0;
        for _ in 0..500 {
            out = nf.process(0.3);
        }
        // Floor has converged onto the constant, leaving almost nothing.
        assert!(out < 0.01, "steady input should be cancelled, got {}", out);
        assert!((nf.level() - 0.3).abs() < 0.01);
    }

    #[test]
    fn noise_floor_lets_transients_through() {
        let mut nf = NoiseFloor::new(0.02);
        for _ in 0..500 {
            nf.process(0.1);
        }
        let burst = nf.process(1.0);
        assert!(burst > 0.7, "burst should exceed floor, got {}", burst);
    }

    #[test]
    fn smoother_rises_and_falls() {
        let mut sm = Smoother::new(1000.0, 1.0, 50.0);
        let mut level = 0.0;
        for _ in 0..50 {
            level = sm.process(1.0);
        }
        assert!(level > 0.9, "fast attack should track up, got {}", level);

        for _ in 0..20 {
            level = sm.process(0.0);
        }
        assert!(level > 0.1, "slow release should lag, got {}", level);
        for _ in 0..500 {
            level = sm.process(0.0);
        }
        assert!(level < 0.01, "release should eventually settle, got {}", level);
    }

    #[test]
    fn normalizer_maps_to_unit_range() {
        let mut norm = PeakNormalizer::new(0.999);
        assert_eq!(norm.process(0.0), 0.0);
        assert_eq!(norm.process(4.0), 1.0);
        let half = norm.process(2.0);
        assert!(half > 0.4 && half < 0.6, "got {}", half);
    }

    #[test]
    fn full_chain_keeps_zero_at_zero() {
        let mut cond = Conditioner::new()
            .with_noise_floor(0.02)
            .with_smoothing(100.0, 10.0, 100.0)
            .with_normalization(0.995)
            .with_gain(1.5);
        for _ in 0..100 {
            assert_eq!(cond.process(0.0), 0.0);
        }
    }

    #[test]
    fn full_chain_is_non_negative_and_finite() {
        let mut cond = Conditioner::new()
            .with_noise_floor(0.02)
            .with_smoothing(100.0, 10.0, 100.0)
            .with_normalization(0.995);
        for i in 0..1000 {
            let raw = libm::sinf(i as f32 * 0.1) * 10.0;
            let out = cond.process(raw);
            assert!(out.is_finite());
            assert!(out >= 0.0);
        }
    }

    #[test]
    fn reset_clears_all_stages() {
        let mut cond = Conditioner::new()
            .with_noise_floor(0.5)
            .with_smoothing(100.0, 1.0, 10.0)
            .with_normalization(0.9);
        for _ in 0..50 {
            cond.process(1.0);
        }
        cond.reset();
        // After reset the chain behaves as if freshly built.
        let mut fresh = Conditioner::new()
            .with_noise_floor(0.5)
            .with_smoothing(100.0, 1.0, 10.0)
            .with_normalization(0.9);
        assert_eq!(cond.process(0.5), fresh.process(0.5));
    }
}
