//! Preset file format for pipeline tuning.
//!
//! Presets are TOML files capturing a full extraction setup (strategy,
//! band, cutoff, conditioning) so a tuned configuration can be shared
//! between the realtime, analyze, and simulate commands.

use std::path::Path;

use anyhow::Context;
use bajo_analysis::Window;
use bajo_io::{Conditioning, EngineConfig, Strategy};
use serde::Deserialize;

/// Preset file format.
#[derive(Debug, Deserialize)]
pub struct Preset {
    /// Name of the preset
    pub name: String,
    /// Optional description
    #[serde(default)]
    #[allow(dead_code)]
    pub description: Option<String>,
    /// Extraction strategy: "spectral", "iir", or "both"
    #[serde(default = "default_strategy")]
    pub strategy: String,
    /// Spectral band settings
    #[serde(default)]
    pub band: BandSection,
    /// Time-domain filter settings
    #[serde(default)]
    pub iir: IirSection,
    /// Intensity conditioning settings
    #[serde(default)]
    pub conditioning: ConditioningSection,
}

fn default_strategy() -> String {
    "spectral".to_string()
}

/// Spectral band configuration section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BandSection {
    /// Lower band edge in Hz.
    pub low_hz: f32,
    /// Upper band edge in Hz.
    pub high_hz: f32,
    /// Analysis window size in samples (power of two).
    pub window_size: usize,
    /// Apply a Hann window before each transform.
    pub hann: bool,
}

impl Default for BandSection {
    fn default() -> Self {
        Self {
            low_hz: 20.0,
            high_hz: 250.0,
            window_size: 1024,
            hann: false,
        }
    }
}

/// Time-domain filter configuration section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IirSection {
    /// Low-pass cutoff in Hz.
    pub cutoff_hz: f32,
}

impl Default for IirSection {
    fn default() -> Self {
        Self { cutoff_hz: 250.0 }
    }
}

/// Conditioning configuration section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConditioningSection {
    /// Enable attack/release smoothing.
    pub smooth: bool,
    /// Smoothing attack time in ms.
    pub attack_ms: f32,
    /// Smoothing release time in ms.
    pub release_ms: f32,
    /// Track and subtract a noise floor.
    pub noise_floor: bool,
    /// Normalize into [0, 1] against a running peak.
    pub normalize: bool,
    /// Constant output gain.
    pub gain: f32,
}

impl Default for ConditioningSection {
    fn default() -> Self {
        Self {
            smooth: false,
            attack_ms: 10.0,
            release_ms: 200.0,
            noise_floor: false,
            normalize: false,
            gain: 1.0,
        }
    }
}

impl Preset {
    /// Load a preset from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read preset '{}'", path.display()))?;
        let preset: Preset = toml::from_str(&content)
            .with_context(|| format!("failed to parse preset '{}'", path.display()))?;
        Ok(preset)
    }

    /// Parse the strategy string.
    pub fn strategy(&self) -> anyhow::Result<Strategy> {
        parse_strategy(&self.strategy)
    }

    /// Turn the preset into an engine configuration at `sample_rate`.
    pub fn engine_config(&self, sample_rate: u32) -> anyhow::Result<EngineConfig> {
        Ok(EngineConfig {
            sample_rate,
            strategy: self.strategy()?,
            low_hz: self.band.low_hz,
            high_hz: self.band.high_hz,
            window_size: self.band.window_size,
            window_fn: if self.band.hann {
                Window::Hann
            } else {
                Window::Rectangular
            },
            cutoff_hz: self.iir.cutoff_hz,
            conditioning: Conditioning {
                smoothing_ms: self
                    .conditioning
                    .smooth
                    .then_some((self.conditioning.attack_ms, self.conditioning.release_ms)),
                noise_floor: self.conditioning.noise_floor,
                normalize: self.conditioning.normalize,
                gain: self.conditioning.gain,
            },
        })
    }
}

/// Parse a strategy name as used in presets and flags.
pub fn parse_strategy(name: &str) -> anyhow::Result<Strategy> {
    match name {
        "spectral" => Ok(Strategy::Spectral),
        "iir" => Ok(Strategy::Iir),
        "both" => Ok(Strategy::Both),
        other => anyhow::bail!("unknown strategy '{other}' (expected spectral, iir, or both)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_preset_uses_defaults() {
        let preset: Preset = toml::from_str(r#"name = "plain""#).unwrap();
        assert_eq!(preset.name, "plain");
        assert_eq!(preset.strategy, "spectral");
        assert_eq!(preset.band.low_hz, 20.0);
        assert_eq!(preset.band.high_hz, 250.0);
        assert_eq!(preset.band.window_size, 1024);
        assert_eq!(preset.iir.cutoff_hz, 250.0);
        assert!(!preset.conditioning.normalize);

        let config = preset.engine_config(48000).unwrap();
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.strategy, Strategy::Spectral);
    }

    #[test]
    fn full_preset_round_trips_into_config() {
        let preset: Preset = toml::from_str(
            r#"
            name = "club"
            description = "Loopback capture tuned for four-on-the-floor"
            strategy = "both"

            [band]
            low_hz = 30.0
            high_hz = 180.0
            window_size = 2048
            hann = true

            [iir]
            cutoff_hz = 120.0

            [conditioning]
            smooth = true
            attack_ms = 5.0
            release_ms = 150.0
            noise_floor = true
            normalize = true
            gain = 2.0
            "#,
        )
        .unwrap();

        let config = preset.engine_config(44100).unwrap();
        assert_eq!(config.strategy, Strategy::Both);
        assert_eq!(config.low_hz, 30.0);
        assert_eq!(config.high_hz, 180.0);
        assert_eq!(config.window_size, 2048);
        assert_eq!(config.window_fn, Window::Hann);
        assert_eq!(config.cutoff_hz, 120.0);
        assert_eq!(config.conditioning.smoothing_ms, Some((5.0, 150.0)));
        assert!(config.conditioning.noise_floor);
        assert!(config.conditioning.normalize);
        assert_eq!(config.conditioning.gain, 2.0);
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let preset: Preset =
            toml::from_str("name = \"x\"\nstrategy = \"wavelet\"").unwrap();
        assert!(preset.strategy().is_err());
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(toml::from_str::<Preset>("name = ").is_err());
    }
}
