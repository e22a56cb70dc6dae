//! Digital signal processors and utilities.

pub mod buffer;
pub mod spectral;

pub use buffer::{BlockInput, BlockInputMut};
pub use spectral::{
    gate::{GateConfig, SpectralGate},
    transform::SpectralTransform,
};
