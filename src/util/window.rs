//! Analysis window functions.
use std::f64::consts::TAU;

/// A periodic Hann window.
///
/// "Periodic" means the cosine argument is divided by `size` rather than
/// `size - 1`, so the first sample is zero and an imagined `size`-th sample
/// would wrap back to zero. Windows of this form sum to a constant when
/// overlapped at any power-of-two fraction of their length, which is what
/// makes the overlap-add reconstruction gain independent of the input.
pub fn hann(size: usize) -> Vec<f64> {
    let mut vec = vec![0.0; size];
    hann_in_place(&mut vec);
    vec
}

/// In-place variant of `hann()`.
pub fn hann_in_place(slice: &mut [f64]) {
    let size = slice.len() as f64;

    for (n, x) in slice.iter_mut().enumerate() {
        *x = 0.5 - 0.5 * (TAU * n as f64 / size).cos();
    }
}
