//! Frame assembly: variable-size blocks to fixed-size windows.
//!
//! Capture hardware delivers blocks of whatever length it likes; the
//! spectral extractor needs exactly `window_size` samples at a time.
//! [`FrameAssembler`] buffers incoming blocks and hands out consecutive,
//! non-overlapping windows in arrival order, retaining any remainder for
//! the next window.
//!
//! The time-domain path needs no assembly; blocks are iterated
//! sample-by-sample as they arrive.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// Accumulates sample blocks and yields fixed-size analysis windows.
///
/// Windows are strictly FIFO: the oldest `window_size` buffered samples
/// form the next window, and feeding blocks whose lengths sum to
/// `k * window_size` yields exactly `k` windows regardless of how the
/// samples were split across blocks.
///
/// # Example
///
/// ```rust
/// use bajo_core::FrameAssembler;
///
/// let mut assembler = FrameAssembler::new(4);
/// assembler.push_block(&[1.0, 2.0, 3.0]);
/// assert!(assembler.next_window().is_none());
///
/// assembler.push_block(&[4.0, 5.0]);
/// assert_eq!(assembler.next_window(), Some(&[1.0, 2.0, 3.0, 4.0][..]));
/// assert_eq!(assembler.pending(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FrameAssembler {
    window_size: usize,
    buf: VecDeque<f32>,
    window: Vec<f32>,
}

impl FrameAssembler {
    /// Create an assembler producing windows of `window_size` samples.
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is zero.
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "window size must be non-zero");
        Self {
            window_size,
            buf: VecDeque::with_capacity(window_size * 2),
            window: Vec::with_capacity(window_size),
        }
    }

    /// Window length in samples.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Append a block of samples. A zero-length block is a no-op.
    pub fn push_block(&mut self, block: &[f32]) {
        self.buf.extend(block.iter().copied());
    }

    /// Take the next complete window, if one is buffered.
    ///
    /// The returned slice is valid until the next call on this
    /// assembler. Call in a loop to drain multiple windows after a
    /// large block.
    pub fn next_window(&mut self) -> Option<&[f32]> {
        if self.buf.len() < self.window_size {
            return None;
        }
        self.window.clear();
        self.window.extend(self.buf.drain(..self.window_size));
        Some(&self.window)
    }

    /// Number of buffered samples not yet part of a completed window.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Discard all buffered samples.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}
