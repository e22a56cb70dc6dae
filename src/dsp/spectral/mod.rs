//! Module for spectral (frequency domain) processing.

pub mod gate;
pub mod transform;

pub use gate::SpectralGate;
pub use transform::SpectralTransform;
