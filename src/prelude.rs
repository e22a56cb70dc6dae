//! Project-wide exports for easy access.

pub use crate::dsp::buffer::{BlockInput, BlockInputMut};
pub use crate::dsp::spectral::gate::{GateConfig, SpectralGate};
pub use crate::dsp::spectral::transform::SpectralTransform;
pub use crate::host::{BlockProcessor, GateParams};
pub use crate::settings::*;
pub use crate::util::*;
pub use atomic_float::AtomicF64;
pub use std::f64::consts::{PI, TAU};
pub use std::sync::Arc;
