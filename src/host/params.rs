//! The parameter surface shared between the host and the engine.

use crate::prelude::*;
use std::sync::atomic::AtomicU8;

/// The host-adjustable parameters of a spectral gate.
///
/// Lives behind an `Arc` shared between the host's control side and the
/// engine. The control side writes through the setters at any time; the
/// engine polls [`snapshot()`](Self::snapshot) at the start of each
/// processing call, so no change notification is needed. Every field is
/// individually atomic and accessed with relaxed ordering, which is enough
/// for a single writer and the occasional word-sized read.
///
/// Setters clamp to the ranges declared in [`crate::settings`], so the
/// engine can trust whatever it reads here.
#[derive(Debug)]
pub struct GateParams {
    /// Base-2 logarithm of the analysis window length.
    transform_order: AtomicU8,
    /// Base-2 logarithm of the number of staggered analysis phases.
    overlap_order: AtomicU8,
    /// Linear bin magnitude below which a bin is silenced.
    threshold: AtomicF64,
}

impl GateParams {
    /// Creates a surface holding the given values, clamped to their
    /// accepted ranges.
    #[must_use]
    pub fn new(transform_order: u8, overlap_order: u8, threshold: f64) -> Self {
        let config = GateConfig::new(transform_order, overlap_order, threshold);

        Self {
            transform_order: AtomicU8::new(config.transform_order()),
            overlap_order: AtomicU8::new(config.overlap_order()),
            threshold: AtomicF64::new(config.threshold()),
        }
    }

    /// Sets the transform order, clamped to its accepted range. The engine
    /// rebuilds at the start of its next processing call.
    pub fn set_transform_order(&self, order: u8) {
        self.transform_order
            .sr(order.clamp(MIN_TRANSFORM_ORDER, MAX_TRANSFORM_ORDER));
    }

    /// Sets the overlap order, clamped to its accepted range. The engine
    /// rebuilds at the start of its next processing call.
    pub fn set_overlap_order(&self, order: u8) {
        self.overlap_order
            .sr(order.clamp(MIN_OVERLAP_ORDER, MAX_OVERLAP_ORDER));
    }

    /// Sets the gate threshold, clamped to its accepted range. Takes
    /// effect from the engine's next processing call without a rebuild.
    pub fn set_threshold(&self, threshold: f64) {
        self.threshold.sr(threshold.clamp(MIN_THRESHOLD, MAX_THRESHOLD));
    }

    /// The current transform order.
    #[must_use]
    pub fn transform_order(&self) -> u8 {
        self.transform_order.lr()
    }

    /// The current overlap order.
    #[must_use]
    pub fn overlap_order(&self) -> u8 {
        self.overlap_order.lr()
    }

    /// The current gate threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold.lr()
    }

    /// Reads all three parameters into a plain configuration value.
    #[must_use]
    pub fn snapshot(&self) -> GateConfig {
        GateConfig::new(
            self.transform_order.lr(),
            self.overlap_order.lr(),
            self.threshold.lr(),
        )
    }

    /// Writes a whole configuration back into the surface, e.g. after the
    /// host restores persisted state.
    pub fn apply(&self, config: &GateConfig) {
        self.set_transform_order(config.transform_order());
        self.set_overlap_order(config.overlap_order());
        self.set_threshold(config.threshold());
    }
}

impl Default for GateParams {
    fn default() -> Self {
        Self::new(
            DEFAULT_TRANSFORM_ORDER,
            DEFAULT_OVERLAP_ORDER,
            DEFAULT_THRESHOLD,
        )
    }
}
