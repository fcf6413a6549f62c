//! Property-based tests for bajo-core DSP primitives.
//!
//! Tests filter stability, frame-assembly invariants, and conditioner
//! range guarantees using proptest for randomized input generation.

use bajo_core::{Biquad, Conditioner, Extractor, FrameAssembler, IirBassExtractor};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// For any cutoff strictly inside (0, Nyquist), the low-pass biquad
    /// produces finite output for random finite input.
    #[test]
    fn biquad_stability(
        cutoff in 1.0f32..23999.0f32,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut filter = Biquad::lowpass(48000.0, cutoff).unwrap();

        for &sample in &input {
            let out = filter.process(sample);
            prop_assert!(
                out.is_finite(),
                "cutoff {} produced non-finite output {} for input {}",
                cutoff, out, sample
            );
        }
    }

    /// The step response stays bounded for any valid cutoff: driving the
    /// filter with DC never overshoots past a small constant.
    #[test]
    fn biquad_step_bounded(cutoff in 1.0f32..23999.0f32) {
        let mut filter = Biquad::lowpass(48000.0, cutoff).unwrap();

        for _ in 0..4096 {
            let out = filter.process(1.0);
            prop_assert!(out.is_finite());
            prop_assert!(out.abs() < 1.5, "cutoff {} overshot to {}", cutoff, out);
        }
    }

    /// Splitting a sample stream into arbitrary blocks never changes how
    /// many windows come out: always floor(total / window_size).
    #[test]
    fn assembler_window_count(
        window_exp in 1u32..8,
        lengths in prop::collection::vec(0usize..100, 1..20),
    ) {
        let window_size = 1usize << window_exp;
        let mut assembler = FrameAssembler::new(window_size);

        let total: usize = lengths.iter().sum();
        let mut windows = 0usize;
        for len in &lengths {
            assembler.push_block(&vec![0.25; *len]);
            while assembler.next_window().is_some() {
                windows += 1;
            }
        }

        prop_assert_eq!(windows, total / window_size);
        prop_assert_eq!(assembler.pending(), total % window_size);
    }

    /// The IIR extractor emits exactly one value per input sample no
    /// matter how the stream is chunked, and the values match an
    /// unchunked run sample-for-sample.
    #[test]
    fn iir_extractor_chunking_invariant(
        samples in prop::collection::vec(-1.0f32..=1.0f32, 1..256),
        chunk in 1usize..64,
    ) {
        let mut whole = IirBassExtractor::new(48000.0, 250.0).unwrap();
        let mut expected = Vec::new();
        whole.ingest(&samples, &mut expected);

        let mut chunked = IirBassExtractor::new(48000.0, 250.0).unwrap();
        let mut actual = Vec::new();
        for block in samples.chunks(chunk) {
            chunked.ingest(block, &mut actual);
        }

        prop_assert_eq!(expected, actual);
    }

    /// The full conditioning chain emits finite, non-negative values for
    /// any finite input sequence.
    #[test]
    fn conditioner_output_range(
        values in prop::collection::vec(-100.0f32..=100.0f32, 1..128),
    ) {
        let mut cond = Conditioner::new()
            .with_noise_floor(0.02)
            .with_smoothing(1000.0, 5.0, 50.0)
            .with_normalization(0.995)
            .with_gain(1.5);

        for &v in &values {
            let out = cond.process(v);
            prop_assert!(out.is_finite());
            prop_assert!(out >= 0.0, "conditioned value {} went negative", out);
        }
    }
}
