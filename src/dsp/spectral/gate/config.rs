//! Gate configuration.

use crate::settings::*;
use serde::{Deserialize, Serialize};

/// The geometry and threshold of a spectral gate.
///
/// Both orders are base-2 logarithms, so the derived window length and phase
/// count are always powers of two and the stagger between phases is always a
/// whole number of samples. All values are clamped to their declared ranges
/// on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGateConfig")]
pub struct GateConfig {
    /// Base-2 logarithm of the analysis window length.
    transform_order: u8,
    /// Base-2 logarithm of the number of staggered analysis phases.
    overlap_order: u8,
    /// Linear bin magnitude below which a bin is silenced.
    threshold: f64,
}

impl GateConfig {
    /// Creates a configuration, clamping each value to its accepted range.
    #[must_use]
    pub fn new(transform_order: u8, overlap_order: u8, threshold: f64) -> Self {
        Self {
            transform_order: transform_order
                .clamp(MIN_TRANSFORM_ORDER, MAX_TRANSFORM_ORDER),
            overlap_order: overlap_order
                .clamp(MIN_OVERLAP_ORDER, MAX_OVERLAP_ORDER),
            threshold: threshold.clamp(MIN_THRESHOLD, MAX_THRESHOLD),
        }
    }

    /// Base-2 logarithm of the analysis window length.
    #[must_use]
    pub fn transform_order(&self) -> u8 {
        self.transform_order
    }

    /// Base-2 logarithm of the number of staggered analysis phases.
    #[must_use]
    pub fn overlap_order(&self) -> u8 {
        self.overlap_order
    }

    /// The gate threshold as a linear bin magnitude.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Sets the gate threshold, clamped to its accepted range.
    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold.clamp(MIN_THRESHOLD, MAX_THRESHOLD);
    }

    /// The analysis window length in samples.
    #[must_use]
    pub fn window_len(&self) -> usize {
        1 << self.transform_order
    }

    /// The number of simultaneously active analysis phases.
    #[must_use]
    pub fn phase_count(&self) -> usize {
        1 << self.overlap_order
    }

    /// The offset between adjacent phases in samples.
    #[must_use]
    pub fn stagger(&self) -> usize {
        debug_assert!(self.overlap_order <= self.transform_order);
        self.window_len() / self.phase_count()
    }

    /// Whether `other` shares this configuration's buffer geometry. A
    /// threshold change alone never requires a rebuild.
    #[must_use]
    pub fn same_geometry(&self, other: &Self) -> bool {
        self.transform_order == other.transform_order
            && self.overlap_order == other.overlap_order
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_TRANSFORM_ORDER,
            DEFAULT_OVERLAP_ORDER,
            DEFAULT_THRESHOLD,
        )
    }
}

/// The wire form of a [`GateConfig`]. Deserialisation funnels through
/// [`GateConfig::new`], so values from a hand-edited preset are clamped
/// like any others.
#[derive(Deserialize)]
struct RawGateConfig {
    transform_order: u8,
    overlap_order: u8,
    threshold: f64,
}

impl From<RawGateConfig> for GateConfig {
    fn from(raw: RawGateConfig) -> Self {
        Self::new(raw.transform_order, raw.overlap_order, raw.threshold)
    }
}
