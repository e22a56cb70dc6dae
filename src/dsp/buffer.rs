//! Block access traits used by the gate's processing loop.
//!
//! Hosts hand audio over either as one interleaved slice or as a slice of
//! planar channel slices; these traits let the engine address both layouts
//! the same way.

use crate::prelude::*;

/// A block of audio which may be read by the engine.
pub trait BlockInput {
    /// Number of samples per channel in the block.
    fn num_samples(&self) -> usize;

    /// Number of channels in the block.
    fn num_channels(&self) -> usize;

    /// Obtains a copy of a specific sample without any bounds checking.
    ///
    /// # Safety
    ///
    /// `channel_idx` must be less than `num_channels()`, and `sample_idx`
    /// less than `num_samples()`.
    unsafe fn get_sample_unchecked(&self, channel_idx: usize, sample_idx: usize) -> f64;
}

/// A block of audio which may be written to by the engine.
pub trait BlockInputMut: BlockInput {
    /// Obtains a mutable reference to a specific sample without any
    /// bounds checking.
    ///
    /// # Safety
    ///
    /// `channel_idx` must be less than `num_channels()`, and `sample_idx`
    /// less than `num_samples()`.
    unsafe fn get_sample_unchecked_mut(
        &mut self,
        channel_idx: usize,
        sample_idx: usize,
    ) -> &mut f64;
}

impl BlockInput for [f64] {
    #[inline]
    fn num_samples(&self) -> usize {
        self.len() / NUM_CHANNELS
    }

    #[inline]
    fn num_channels(&self) -> usize {
        NUM_CHANNELS
    }

    #[inline]
    unsafe fn get_sample_unchecked(&self, channel_idx: usize, sample_idx: usize) -> f64 {
        // the samples of this buffer are interleaved, hence the
        // NUM_CHANNELS stride between frames
        unsafe { *self.get_unchecked(sample_idx * NUM_CHANNELS + channel_idx) }
    }
}

impl BlockInputMut for [f64] {
    #[inline]
    unsafe fn get_sample_unchecked_mut(
        &mut self,
        channel_idx: usize,
        sample_idx: usize,
    ) -> &mut f64 {
        // the samples of this buffer are interleaved, hence the
        // NUM_CHANNELS stride between frames
        unsafe { self.get_unchecked_mut(sample_idx * NUM_CHANNELS + channel_idx) }
    }
}

impl BlockInput for [&mut [f64]] {
    #[inline]
    fn num_samples(&self) -> usize {
        // the usable block is clamped to the shortest channel, so any
        // index below this count is in bounds for every channel
        self.iter().map(|channel| channel.len()).min().unwrap_or(0)
    }

    #[inline]
    fn num_channels(&self) -> usize {
        self.len()
    }

    #[inline]
    unsafe fn get_sample_unchecked(&self, channel_idx: usize, sample_idx: usize) -> f64 {
        unsafe { *self.get_unchecked(channel_idx).get_unchecked(sample_idx) }
    }
}

impl BlockInputMut for [&mut [f64]] {
    #[inline]
    unsafe fn get_sample_unchecked_mut(
        &mut self,
        channel_idx: usize,
        sample_idx: usize,
    ) -> &mut f64 {
        unsafe {
            self.get_unchecked_mut(channel_idx)
                .get_unchecked_mut(sample_idx)
        }
    }
}
