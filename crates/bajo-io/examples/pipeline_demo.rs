//! Feed synthetic tones through the intensity pipeline and print what
//! each strategy reports.
//!
//! Run with: cargo run -p bajo-io --example pipeline_demo

use bajo_io::{BlockSource, EngineConfig, IntensityEngine, SineSource, Strategy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig {
        strategy: Strategy::Both,
        ..EngineConfig::default()
    };

    for freq in [40.0, 60.0, 120.0, 440.0, 1000.0] {
        let mut engine = IntensityEngine::new(&config)?;
        let mut source = SineSource::new(48000, freq, 1.0, 0.5, 480);

        let mut spectral_sum = 0.0f64;
        let mut spectral_count = 0u64;
        let mut iir_peak = 0.0f32;
        source.run(&mut |block| {
            engine.ingest_block(block, &mut |kind, sample| match kind {
                bajo_core::ExtractorKind::Spectral => {
                    spectral_sum += f64::from(sample.value);
                    spectral_count += 1;
                }
                bajo_core::ExtractorKind::Iir => iir_peak = iir_peak.max(sample.value),
            });
        })?;

        let spectral_mean = if spectral_count > 0 {
            spectral_sum / spectral_count as f64
        } else {
            0.0
        };
        println!(
            "{freq:7.1} Hz  spectral mean {spectral_mean:10.2}  iir peak {iir_peak:.4}"
        );
    }

    Ok(())
}
