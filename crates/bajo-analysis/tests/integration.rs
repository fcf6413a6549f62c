//! Integration tests for the spectral extraction path at its default
//! operating point: 48 kHz, band 20-250 Hz, 1024-sample windows.

use bajo_analysis::SpectralBassExtractor;
use bajo_core::{BandConfig, Extractor};
use std::f32::consts::PI;

fn sine(freq: f32, sample_rate: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| (2.0 * PI * freq * i as f32 / sample_rate).sin())
        .collect()
}

#[test]
fn spectral_path_end_to_end_over_irregular_blocks() {
    let band = BandConfig::new(48000, 20.0, 250.0, 1024).unwrap();
    let mut extractor = SpectralBassExtractor::new(band);

    // Four windows of a 60 Hz tone, delivered in audio-hardware-ish
    // uneven block sizes.
    let signal = sine(60.0, 48000.0, 4096);
    let mut out = Vec::new();
    let mut offset = 0;
    for len in [441, 960, 37, 1024, 480, 700, 454] {
        extractor.ingest(&signal[offset..offset + len], &mut out);
        offset += len;
    }
    assert_eq!(offset, 4096);
    assert_eq!(out.len(), 4);

    // Every full window of a steady bass tone carries real energy.
    for (i, &intensity) in out.iter().enumerate() {
        assert!(intensity > 100.0, "window {} too weak: {}", i, intensity);
    }
}

#[test]
fn intensity_tracks_amplitude() {
    let band = BandConfig::new(48000, 20.0, 250.0, 1024).unwrap();
    let extractor = SpectralBassExtractor::new(band);

    let loud = extractor.analyze(&sine(93.75, 48000.0, 1024));
    let quiet: Vec<f32> = sine(93.75, 48000.0, 1024)
        .into_iter()
        .map(|s| s * 0.1)
        .collect();
    let quiet = extractor.analyze(&quiet);

    assert!(loud > 9.0 * quiet && loud < 11.0 * quiet, "{} vs {}", loud, quiet);
}

#[test]
fn mixed_signal_reports_only_bass_content() {
    let band = BandConfig::new(48000, 20.0, 250.0, 1024).unwrap();
    let extractor = SpectralBassExtractor::new(band);

    let bass_only = extractor.analyze(&sine(93.75, 48000.0, 1024));

    // Add a strong bin-aligned midrange component; the mask should
    // keep the bass reading essentially unchanged.
    let mixed: Vec<f32> = sine(93.75, 48000.0, 1024)
        .iter()
        .zip(sine(937.5, 48000.0, 1024).iter())
        .map(|(b, m)| b + m)
        .collect();
    let mixed = extractor.analyze(&mixed);

    assert!(
        (mixed - bass_only).abs() < bass_only * 0.01,
        "mask failed: {} vs {}",
        mixed,
        bass_only
    );
}

#[test]
fn band_edges_count_as_in_band() {
    // With low_hz sitting exactly on bin 1 and high_hz exactly on bin 5,
    // tones on both edge bins must register.
    let band = BandConfig::new(48000, 46.875, 234.375, 1024).unwrap();
    let extractor = SpectralBassExtractor::new(band);

    let low_edge = extractor.analyze(&sine(46.875, 48000.0, 1024));
    let high_edge = extractor.analyze(&sine(234.375, 48000.0, 1024));
    assert!(low_edge > 100.0, "low edge excluded: {}", low_edge);
    assert!(high_edge > 100.0, "high edge excluded: {}", high_edge);
}
