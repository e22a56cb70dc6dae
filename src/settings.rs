//! Global constants.

/// The number of audio channels the gate processes. Interleaved blocks hold
/// this many samples per frame.
pub const NUM_CHANNELS: usize = 2;

/// The default transform order, i.e. the base-2 logarithm of the analysis
/// window length. An order of `10` is a `1024`-sample window.
pub const DEFAULT_TRANSFORM_ORDER: u8 = 10;
/// The smallest accepted transform order (an 8-sample window).
pub const MIN_TRANSFORM_ORDER: u8 = 3;
/// The largest accepted transform order (a 65,536-sample window).
pub const MAX_TRANSFORM_ORDER: u8 = 16;

/// The default overlap order, i.e. the base-2 logarithm of the number of
/// staggered analysis phases. An order of `2` is four phases, where each
/// window overlaps its neighbour by 75%.
pub const DEFAULT_OVERLAP_ORDER: u8 = 2;
/// The smallest accepted overlap order (two phases).
pub const MIN_OVERLAP_ORDER: u8 = 1;
/// The largest accepted overlap order (eight phases).
pub const MAX_OVERLAP_ORDER: u8 = 3;

/// The default gate threshold. A threshold of zero passes every bin through
/// untouched.
pub const DEFAULT_THRESHOLD: f64 = 0.0;
/// The smallest accepted gate threshold.
pub const MIN_THRESHOLD: f64 = 0.0;
/// The largest accepted gate threshold, as a linear bin magnitude.
pub const MAX_THRESHOLD: f64 = 5.0;

/// The sample rate a gate assumes until the host configures it.
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// The largest block (in samples per channel) a gate accepts before the host
/// has declared its real maximum via `configure()`.
pub const MAX_BLOCK_SIZE: usize = 1 << 11; // 2048
