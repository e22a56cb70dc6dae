#![allow(clippy::module_name_repetitions, clippy::wildcard_imports)]

// Host-facing seam: the block processor interface and parameter surface
pub mod host;

// Signal processing
pub mod dsp;

// General utilities
pub mod util;

// Some widely-used re-exports
pub mod prelude;

// Crate-wide settings
pub mod settings;
