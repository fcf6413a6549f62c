//! Criterion benchmarks for bajo-core components
//!
//! Run with: cargo bench -p bajo-core

use bajo_core::{Biquad, Conditioner, Extractor, FrameAssembler, IirBassExtractor};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const SAMPLE_RATE: f32 = 48000.0;

/// Generate a test sine wave
fn generate_sine(size: usize, frequency: f32) -> Vec<f32> {
    (0..size)
        .map(|i| libm::sinf(2.0 * core::f32::consts::PI * frequency * i as f32 / SAMPLE_RATE))
        .collect()
}

fn bench_biquad(c: &mut Criterion) {
    let signal = generate_sine(4096, 60.0);

    c.bench_function("biquad_lowpass_4096", |b| {
        let mut filter = Biquad::lowpass(SAMPLE_RATE, 250.0).unwrap();
        b.iter(|| {
            let mut acc = 0.0_f32;
            for &s in &signal {
                acc += filter.process(black_box(s));
            }
            black_box(acc)
        });
    });
}

fn bench_iir_extractor(c: &mut Criterion) {
    let signal = generate_sine(4096, 60.0);

    c.bench_function("iir_extractor_ingest_4096", |b| {
        let mut extractor = IirBassExtractor::new(SAMPLE_RATE, 250.0).unwrap();
        let mut out = Vec::with_capacity(signal.len());
        b.iter(|| {
            out.clear();
            extractor.ingest(black_box(&signal), &mut out);
            black_box(out.len())
        });
    });
}

fn bench_frame_assembler(c: &mut Criterion) {
    let block = generate_sine(480, 60.0);

    c.bench_function("frame_assembler_480_into_1024", |b| {
        let mut assembler = FrameAssembler::new(1024);
        b.iter(|| {
            assembler.push_block(black_box(&block));
            while let Some(window) = assembler.next_window() {
                black_box(window.len());
            }
        });
    });
}

fn bench_conditioner(c: &mut Criterion) {
    let signal = generate_sine(4096, 60.0);

    c.bench_function("conditioner_full_chain_4096", |b| {
        let mut cond = Conditioner::new()
            .with_noise_floor(0.02)
            .with_smoothing(SAMPLE_RATE, 5.0, 50.0)
            .with_normalization(0.995)
            .with_gain(1.0);
        b.iter(|| {
            let mut acc = 0.0_f32;
            for &s in &signal {
                acc += cond.process(black_box(s));
            }
            black_box(acc)
        });
    });
}

criterion_group!(
    benches,
    bench_biquad,
    bench_iir_extractor,
    bench_frame_assembler,
    bench_conditioner
);
criterion_main!(benches);
