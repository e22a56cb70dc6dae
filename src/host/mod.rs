//! The seam between the engine and a host application.
//!
//! The engine is a plain value a host drives through [`BlockProcessor`];
//! device lifecycles, plugin formats and I/O all stay on the host's side
//! of this boundary. Parameters travel the other way through a shared
//! [`GateParams`].

pub mod params;

pub use params::GateParams;

/// Generic interface for processors a host feeds blocks of audio.
pub trait BlockProcessor {
    /// Prepares the processor for streaming at `sample_rate` with blocks
    /// of at most `max_block_size` samples per channel. May be called
    /// again at any time; buffered audio is discarded.
    ///
    /// # Panics
    ///
    /// Panics if `sample_rate` is not positive, or if `max_block_size`
    /// is zero.
    fn configure(&mut self, sample_rate: f64, max_block_size: usize);

    /// Processes one interleaved stereo block in place.
    ///
    /// # Panics
    ///
    /// Panics if the block holds more samples per channel than the
    /// configured maximum.
    fn process_interleaved(&mut self, block: &mut [f64]);

    /// Discards all buffered audio without changing the configuration.
    fn reset(&mut self);

    /// The processor's delay from input to output in samples.
    fn latency_samples(&self) -> u32;

    /// Optional hint that host-side parameters changed. Processors which
    /// poll their parameter state each block can ignore this.
    fn on_parameter_change(&mut self) {}
}
