//! Biquad (bi-quadratic) low-pass filter.
//!
//! Second-order IIR filter used by the time-domain bass extraction
//! strategy. Coefficient calculation uses the RBJ Audio EQ Cookbook
//! low-pass formula with a fixed Q (alpha = sin(omega) / 2), normalized
//! by the feedback a0 term at construction.
//!
//! Coefficients and delay registers are kept in double precision: bass
//! cutoffs sit three decades below Nyquist, where the `1 - cos(omega)`
//! terms underflow single-precision resolution and shift the DC gain by
//! several percent.

use core::f64::consts::PI;
use libm::{cos, sin};

use crate::band::ConfigError;

/// Second-order low-pass filter with two delay registers.
///
/// The stored coefficients are already normalized: `a0..a2` are the
/// feed-forward gains and `b1..b2` the feedback gains. Processing uses
/// a two-register structure whose coefficient naming mirrors a
/// transposed direct-form-II layout:
///
/// ```text
/// y[n] = a0*x[n] + a1*z1 + a2*z2 - b1*z1 - b2*z2
/// z2 <- z1
/// z1 <- y[n]
/// ```
///
/// The delay registers persist across every call for the lifetime of
/// the filter; nothing resets them except [`clear`](Self::clear) or
/// reconstruction.
#[derive(Debug, Clone)]
pub struct Biquad {
    // Normalized feed-forward coefficients
    a0: f64,
    a1: f64,
    a2: f64,
    // Normalized feedback coefficients
    b1: f64,
    b2: f64,
    // Delay registers
    z1: f64,
    z2: f64,
}

impl Biquad {
    /// Create a low-pass biquad for the given sample rate and cutoff.
    ///
    /// Coefficients follow the RBJ cookbook low-pass design:
    /// omega = 2*pi*cutoff/rate, alpha = sin(omega)/2, each coefficient
    /// divided through by the feedback a0.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CutoffOutOfRange`] unless `cutoff_hz` lies
    /// strictly between 0 and `sample_rate / 2`, and
    /// [`ConfigError::ZeroSampleRate`] for a non-positive sample rate.
    pub fn lowpass(sample_rate: f32, cutoff_hz: f32) -> Result<Self, ConfigError> {
        if sample_rate <= 0.0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        let nyquist = sample_rate / 2.0;
        if cutoff_hz <= 0.0 || cutoff_hz >= nyquist {
            return Err(ConfigError::CutoffOutOfRange { cutoff_hz, nyquist });
        }

        let omega = 2.0 * PI * f64::from(cutoff_hz) / f64::from(sample_rate);
        let sin_omega = sin(omega);
        let cos_omega = cos(omega);
        let alpha = sin_omega / 2.0;

        let b0 = (1.0 - cos_omega) / 2.0;
        let b1 = 1.0 - cos_omega;
        let b2 = (1.0 - cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        let a0_inv = 1.0 / a0;
        Ok(Self {
            a0: b0 * a0_inv,
            a1: b1 * a0_inv,
            a2: b2 * a0_inv,
            b1: a1 * a0_inv,
            b2: a2 * a0_inv,
            z1: 0.0,
            z2: 0.0,
        })
    }

    /// Process a single sample, advancing the delay registers.
    ///
    /// Returns the filtered amplitude, which may be negative;
    /// rectification is the caller's concern.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let x = f64::from(input);
        let output = self.a0 * x + self.a1 * self.z1 + self.a2 * self.z2
            - self.b1 * self.z1
            - self.b2 * self.z2;

        self.z2 = self.z1;
        self.z1 = output;

        output as f32
    }

    /// Clear the delay registers without changing coefficients.
    pub fn clear(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }
}
