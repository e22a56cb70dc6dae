//! Forward/inverse Fourier transform pair.

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// A complex-to-complex transform pair of a fixed size.
///
/// The inverse direction is normalised by the transform size, so a forward
/// pass followed by an inverse pass reproduces the input (up to
/// floating-point error). Scratch space is allocated once here so the
/// processing callback never allocates.
pub struct SpectralTransform {
    /// forward fft plan
    fft: Arc<dyn Fft<f64>>,

    /// inverse fft plan
    ifft: Arc<dyn Fft<f64>>,

    /// scratch space shared by both plans
    scratch: Vec<Complex<f64>>,
}

impl SpectralTransform {
    /// Creates a transform pair for `size`-point frames.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not a power of two.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size.is_power_of_two());

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);

        let scratch_len = fft
            .get_inplace_scratch_len()
            .max(ifft.get_inplace_scratch_len());

        Self { fft, ifft, scratch: vec![Complex::default(); scratch_len] }
    }

    /// Transforms `frame` to the frequency domain in place.
    ///
    /// # Panics
    ///
    /// Panics if `frame.len() != self.size()`.
    pub fn forward(&mut self, frame: &mut [Complex<f64>]) {
        self.fft.process_with_scratch(frame, &mut self.scratch);
    }

    /// Transforms `frame` back to the time domain in place, scaling by the
    /// transform size so that `forward()` followed by `inverse()` is an
    /// identity.
    ///
    /// # Panics
    ///
    /// Panics if `frame.len() != self.size()`.
    pub fn inverse(&mut self, frame: &mut [Complex<f64>]) {
        self.ifft.process_with_scratch(frame, &mut self.scratch);

        let norm = (self.size() as f64).recip();
        for bin in frame.iter_mut() {
            *bin *= norm;
        }
    }

    /// The transform size in samples.
    #[must_use]
    pub fn size(&self) -> usize {
        self.fft.len()
    }
}
