//! Block-source abstraction over capture hardware, files, and synthesis.
//!
//! [`BlockSource`] is the boundary between the extraction pipeline and
//! whatever produces PCM: the pipeline only ever sees mono `f32` sample
//! blocks of arbitrary length. Swapping a live device for a WAV file or
//! a synthetic tone is a constructor change, nothing downstream moves.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::Result;

/// Cloneable handle that stops a running [`BlockSource`].
///
/// Sources check the flag between blocks, so stopping takes effect at
/// block granularity. Typically wired to a ctrl-C handler.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub(crate) fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Request the source stop after the current block.
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A producer of mono sample blocks.
///
/// `run` blocks the calling thread, invoking `on_block` once per
/// delivered block in arrival order, until the source is exhausted,
/// stopped via its [`StopHandle`], or fails. Block lengths vary and
/// never promise alignment with any analysis window size.
pub trait BlockSource {
    /// Human-readable source name for logs and status output.
    fn name(&self) -> &str;

    /// Sample rate of the delivered blocks in Hz.
    fn sample_rate(&self) -> u32;

    /// Handle for stopping the source from another thread.
    fn stop_handle(&self) -> StopHandle;

    /// Deliver blocks until exhausted, stopped, or failed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Stream`](crate::Error::Stream) if the underlying
    /// producer reports a failure; the error propagates instead of being
    /// papered over with silence.
    fn run(&mut self, on_block: &mut dyn FnMut(&[f32])) -> Result<()>;
}

/// Synthetic sine-wave source for tests, benchmarks, and dry runs.
///
/// Produces `duration_secs` worth of a fixed tone in `block_size`
/// chunks (final block may be short).
#[derive(Debug, Clone)]
pub struct SineSource {
    sample_rate: u32,
    frequency: f32,
    amplitude: f32,
    total_samples: usize,
    block_size: usize,
    stop: StopHandle,
}

impl SineSource {
    /// Create a sine source.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero.
    pub fn new(
        sample_rate: u32,
        frequency: f32,
        amplitude: f32,
        duration_secs: f32,
        block_size: usize,
    ) -> Self {
        assert!(block_size > 0, "block size must be non-zero");
        let total_samples = (duration_secs * sample_rate as f32) as usize;
        Self {
            sample_rate,
            frequency,
            amplitude,
            total_samples,
            block_size,
            stop: StopHandle::new(),
        }
    }

    /// Total number of samples this source will emit.
    pub fn total_samples(&self) -> usize {
        self.total_samples
    }
}

impl BlockSource for SineSource {
    fn name(&self) -> &str {
        "sine"
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    fn run(&mut self, on_block: &mut dyn FnMut(&[f32])) -> Result<()> {
        let step = 2.0 * std::f32::consts::PI * self.frequency / self.sample_rate as f32;
        let mut block = Vec::with_capacity(self.block_size);
        let mut emitted = 0usize;

        while emitted < self.total_samples {
            if self.stop.is_stopped() {
                break;
            }
            let len = self.block_size.min(self.total_samples - emitted);
            block.clear();
            for i in 0..len {
                let n = (emitted + i) as f32;
                block.push(self.amplitude * (step * n).sin());
            }
            emitted += len;
            on_block(&block);
        }
        Ok(())
    }
}
