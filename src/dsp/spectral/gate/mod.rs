//! Spectral noise gating.
//!
//! The gate analyses its input through a bank of staggered, overlapping
//! Hann windows. Each phase accumulates a full window of samples,
//! transforms it, silences every frequency bin whose magnitude falls below
//! the threshold, transforms back, and queues the reconstructed samples.
//! The output is the overlap-added sum of all phase queues, divided by the
//! phase count.
//!
//! Two properties follow from this construction:
//!
//! * the gate delays its input by exactly one window length, and
//! * the steady-state passthrough gain at zero threshold is one half, as
//!   the staggered Hann windows sum to half the phase count and the flat
//!   phase-count divisor leaves that factor in place.

pub mod config;
pub mod phase;

pub use config::GateConfig;

use self::phase::PhaseSlot;
use crate::prelude::*;
use crate::util::window::hann;

/// A stereo spectral noise gate.
///
/// The engine owns every buffer it touches; the only state shared with the
/// host is the [`GateParams`] surface, which is polled at the start of each
/// processing call. A geometry change observed there tears the engine's
/// buffers down and rebuilds them, discarding any audio in flight. While
/// the geometry is stable, processing never allocates.
pub struct SpectralGate {
    /// The host-shared parameter surface.
    params: Arc<GateParams>,

    /// The configuration the engine is currently built for.
    config: GateConfig,

    /// The analysis window, rebuilt alongside the geometry.
    window: Vec<f64>,

    /// Forward/inverse transform pair for the current window length.
    transform: SpectralTransform,

    /// The staggered phase slots, one set per channel.
    channels: [Vec<PhaseSlot>; NUM_CHANNELS],

    sample_rate: f64,
    max_block_size: usize,
}

impl SpectralGate {
    /// Creates a gate built for whatever `params` currently holds, with
    /// default streaming limits until the host calls
    /// [`configure()`](BlockProcessor::configure).
    #[must_use]
    pub fn new(params: Arc<GateParams>) -> Self {
        let config = params.snapshot();
        let window_len = config.window_len();
        let queue_capacity = 2 * window_len + MAX_BLOCK_SIZE;
        let channels: [Vec<PhaseSlot>; NUM_CHANNELS] =
            std::array::from_fn(|_| build_phase_slots(&config, queue_capacity));

        Self {
            params,
            config,
            window: hann(window_len),
            transform: SpectralTransform::new(window_len),
            channels,
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_block_size: MAX_BLOCK_SIZE,
        }
    }

    /// Processes a block of audio in place.
    ///
    /// The block may be any length up to the configured maximum, and need
    /// not divide the window length; the gate carries its state across
    /// calls.
    ///
    /// # Panics
    ///
    /// Panics if the buffer does not have exactly [`NUM_CHANNELS`]
    /// channels, or holds more samples than the configured maximum block
    /// size.
    pub fn process<B>(&mut self, buffer: &mut B)
    where
        B: BlockInputMut + ?Sized,
    {
        assert_eq!(buffer.num_channels(), NUM_CHANNELS);
        let num_samples = buffer.num_samples();
        assert!(num_samples <= self.max_block_size);

        self.poll_host_params();

        let normalization = (self.config.phase_count() as f64).recip();

        for channel_idx in 0..NUM_CHANNELS {
            for sample_idx in 0..num_samples {
                let sample = unsafe {
                    buffer.get_sample_unchecked(channel_idx, sample_idx)
                };
                self.push_sample(channel_idx, sample);
            }

            for sample_idx in 0..num_samples {
                let mut sum = 0.0;
                for slot in self.channels[channel_idx].iter_mut() {
                    sum += slot.pop_output_or_zero();
                }

                unsafe {
                    *buffer.get_sample_unchecked_mut(channel_idx, sample_idx) =
                        sum * normalization;
                }
            }
        }
    }

    /// The configuration the engine is currently built for.
    ///
    /// This reflects the state after the most recent processing call; a
    /// pending parameter change is only adopted at the start of the next
    /// one.
    #[must_use]
    pub fn config(&self) -> GateConfig {
        self.config
    }

    /// The sample rate the host last configured, in hertz.
    #[must_use]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Adopts any parameter change from the host surface. Threshold moves
    /// apply directly; geometry moves rebuild the engine.
    fn poll_host_params(&mut self) {
        let requested = self.params.snapshot();

        if requested.same_geometry(&self.config) {
            self.config.set_threshold(requested.threshold());
        } else {
            self.rebuild(requested);
        }
    }

    /// Tears down and rebuilds every geometry-sized buffer, discarding any
    /// buffered audio. All allocation happens here, never while streaming.
    fn rebuild(&mut self, config: GateConfig) {
        let window_len = config.window_len();
        let queue_capacity = 2 * window_len + self.max_block_size;

        self.window = hann(window_len);
        self.transform = SpectralTransform::new(window_len);
        self.channels =
            std::array::from_fn(|_| build_phase_slots(&config, queue_capacity));
        self.config = config;

        log::debug!(
            "rebuilt spectral gate: {window_len}-sample window, {} phases",
            config.phase_count()
        );
    }

    /// Feeds one input sample to every phase of a channel, running the
    /// gate over each analysis window it completes.
    fn push_sample(&mut self, channel_idx: usize, sample: f64) {
        let threshold = self.config.threshold();
        let Self { channels, window, transform, .. } = self;

        for slot in channels[channel_idx].iter_mut() {
            slot.push(sample);
            if slot.is_full() {
                slot.process_frame(window, transform, threshold);
            }
        }
    }
}

impl BlockProcessor for SpectralGate {
    fn configure(&mut self, sample_rate: f64, max_block_size: usize) {
        assert!(sample_rate > 0.0);
        assert_ne!(max_block_size, 0);

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.rebuild(self.params.snapshot());

        log::info!(
            "spectral gate configured: {sample_rate} Hz, blocks of up to \
             {max_block_size} samples"
        );
    }

    fn process_interleaved(&mut self, block: &mut [f64]) {
        debug_assert_eq!(block.len() % NUM_CHANNELS, 0);

        self.process(block);
    }

    fn reset(&mut self) {
        self.rebuild(self.config);
    }

    fn latency_samples(&self) -> u32 {
        self.config.window_len() as u32
    }
}

/// Builds the staggered slots for one channel.
fn build_phase_slots(
    config: &GateConfig,
    queue_capacity: usize,
) -> Vec<PhaseSlot> {
    (0..config.phase_count())
        .map(|phase_idx| {
            PhaseSlot::new(
                config.window_len(),
                config.stagger(),
                phase_idx,
                queue_capacity,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::within_tolerance;
    use std::f64::consts::TAU;

    fn make_gate(
        transform_order: u8,
        overlap_order: u8,
        threshold: f64,
    ) -> SpectralGate {
        let params =
            Arc::new(GateParams::new(transform_order, overlap_order, threshold));
        SpectralGate::new(params)
    }

    /// Streams `left`/`right` through the gate in interleaved chunks of at
    /// most `block_size` samples, returning both output channels.
    fn run_blocks(
        gate: &mut SpectralGate,
        left: &[f64],
        right: &[f64],
        block_size: usize,
    ) -> (Vec<f64>, Vec<f64>) {
        assert_eq!(left.len(), right.len());

        let mut out_left = Vec::with_capacity(left.len());
        let mut out_right = Vec::with_capacity(right.len());
        let mut block = vec![0.0; block_size * NUM_CHANNELS];

        let mut start = 0;
        while start < left.len() {
            let len = block_size.min(left.len() - start);
            let block = &mut block[..len * NUM_CHANNELS];

            for i in 0..len {
                block[i * NUM_CHANNELS] = left[start + i];
                block[i * NUM_CHANNELS + 1] = right[start + i];
            }

            gate.process_interleaved(block);

            for i in 0..len {
                out_left.push(block[i * NUM_CHANNELS]);
                out_right.push(block[i * NUM_CHANNELS + 1]);
            }

            start += len;
        }

        (out_left, out_right)
    }

    fn noise(len: usize) -> Vec<f64> {
        (0..len).map(|_| rand::random_range(-1.0..1.0)).collect()
    }

    fn quiet_sine(len: usize, cycles_per_sample: f64, amplitude: f64) -> Vec<f64> {
        (0..len)
            .map(|i| (TAU * cycles_per_sample * i as f64).sin() * amplitude)
            .collect()
    }

    #[test]
    fn passthrough_at_zero_threshold() {
        for overlap_order in 1..=3 {
            let mut gate = make_gate(6, overlap_order, 0.0); // 64-sample window
            let window_len = gate.config().window_len();

            let input = noise(window_len * 10);
            let silent = vec![0.0; input.len()];
            // a block size which does not divide the window length
            let (out_left, out_right) =
                run_blocks(&mut gate, &input, &silent, 48);

            for &sample in &out_left[..window_len] {
                assert!(within_tolerance(sample, 0.0, 1e-12));
            }
            for i in 0..input.len() - window_len {
                assert!(
                    within_tolerance(
                        out_left[window_len + i],
                        input[i] * 0.5,
                        1e-9
                    ),
                    "sample {i} with {} phases",
                    gate.config().phase_count()
                );
            }

            // the silent channel is processed independently and stays silent
            for &sample in &out_right {
                assert!(within_tolerance(sample, 0.0, 1e-12));
            }
        }
    }

    #[test]
    fn impulse_lands_one_window_late_at_half_amplitude() {
        let mut gate = make_gate(3, 1, 0.0); // 8-sample window, 2 phases
        let window_len = 8;

        let mut left = vec![0.0; 4 * window_len];
        left[0] = 1.0;
        let right = vec![0.0; left.len()];

        let (out_left, out_right) =
            run_blocks(&mut gate, &left, &right, window_len);

        for (i, &sample) in out_left.iter().enumerate() {
            if i == window_len {
                assert!(
                    within_tolerance(sample, 0.5, 1e-12),
                    "impulse at {i}: {sample}"
                );
            } else {
                assert!(
                    within_tolerance(sample, 0.0, 1e-12),
                    "leakage at {i}: {sample}"
                );
            }
        }
        assert!(out_right.iter().all(|&sample| sample == 0.0));
    }

    #[test]
    fn max_threshold_silences_quiet_input() {
        let mut gate = make_gate(7, 1, 5.0); // 128-sample window
        let input = quiet_sine(1280, 0.05, 1e-3);

        let (out_left, out_right) = run_blocks(&mut gate, &input, &input, 128);

        assert!(out_left.iter().all(|&sample| sample == 0.0));
        assert!(out_right.iter().all(|&sample| sample == 0.0));
    }

    #[test]
    fn threshold_change_applies_without_rebuild() {
        let params = Arc::new(GateParams::new(6, 2, 0.0));
        let mut gate = SpectralGate::new(Arc::clone(&params));
        let window_len = 64;

        let input = quiet_sine(window_len * 8, 0.125, 1e-3);
        let (warm, _) = run_blocks(&mut gate, &input, &input, window_len);
        assert!(warm[window_len..].iter().any(|&sample| sample.abs() > 1e-4));

        params.set_threshold(5.0);
        let (gated, _) = run_blocks(&mut gate, &input, &input, window_len);

        // audio still queued from before the change drains within one
        // window; past that, every bin falls below the threshold
        assert!(gated[2 * window_len..].iter().all(|&sample| sample == 0.0));
        assert_eq!(gate.config().transform_order(), 6);
    }

    #[test]
    fn geometry_change_rebuilds_and_discards_state() {
        let params = Arc::new(GateParams::new(6, 1, 0.0));
        let mut gate = SpectralGate::new(Arc::clone(&params));

        let input = noise(64 * 6);
        let _ = run_blocks(&mut gate, &input, &input, 64);

        params.set_transform_order(7);
        let silence = vec![0.0; 128 * 4];
        let (out_left, out_right) =
            run_blocks(&mut gate, &silence, &silence, 128);

        assert_eq!(gate.config().transform_order(), 7);
        assert_eq!(gate.latency_samples(), 128);

        // the noise buffered under the old geometry never surfaces
        assert!(out_left.iter().all(|&sample| sample == 0.0));
        assert!(out_right.iter().all(|&sample| sample == 0.0));
    }

    #[test]
    fn planar_and_interleaved_blocks_agree() {
        let input = noise(256);

        let mut interleaved_gate = make_gate(5, 2, 0.0); // 32-sample window
        let mut planar_gate = make_gate(5, 2, 0.0);

        let (out_left, out_right) =
            run_blocks(&mut interleaved_gate, &input, &input, 32);

        let mut left = input.clone();
        let mut right = input.clone();
        for chunk_start in (0..input.len()).step_by(32) {
            let end = chunk_start + 32;
            let mut channels =
                [&mut left[chunk_start..end], &mut right[chunk_start..end]];
            planar_gate.process(&mut channels[..]);
        }

        assert_eq!(out_left, left);
        assert_eq!(out_right, right);
    }

    #[test]
    fn ragged_planar_block_is_clamped_to_the_shortest_channel() {
        let mut gate = make_gate(4, 1, 0.0); // 16-sample window

        let mut left = vec![0.0; 24];
        for sample in &mut left[16..] {
            *sample = 7.5;
        }
        let mut right = vec![0.0; 16];

        let mut channels = [&mut left[..], &mut right[..]];
        gate.process(&mut channels[..]);

        // only the shortest channel's length is processed; silence in,
        // silence out
        assert!(left[..16].iter().all(|&sample| sample == 0.0));
        assert!(right.iter().all(|&sample| sample == 0.0));

        // the tail past the shortest channel is never touched
        assert!(left[16..].iter().all(|&sample| sample == 7.5));
    }

    #[test]
    fn configure_adopts_latest_parameters() {
        let params = Arc::new(GateParams::new(10, 2, 0.0));
        let mut gate = SpectralGate::new(Arc::clone(&params));

        params.set_transform_order(8);
        params.set_overlap_order(1);
        gate.configure(96000.0, 512);

        assert_eq!(gate.sample_rate(), 96000.0);
        assert_eq!(gate.config().transform_order(), 8);
        assert_eq!(gate.config().phase_count(), 2);
        assert_eq!(gate.latency_samples(), 256);
    }

    #[test]
    fn reset_discards_buffered_audio() {
        let mut gate = make_gate(6, 2, 0.0);

        let input = noise(64 * 3);
        let _ = run_blocks(&mut gate, &input, &input, 64);

        gate.reset();

        let silence = vec![0.0; 64 * 4];
        let (out_left, _) = run_blocks(&mut gate, &silence, &silence, 64);
        assert!(out_left.iter().all(|&sample| sample == 0.0));
    }

    #[test]
    #[should_panic]
    fn rejects_blocks_beyond_declared_maximum() {
        let mut gate = make_gate(6, 1, 0.0);
        gate.configure(48000.0, 64);

        let mut block = vec![0.0; 65 * NUM_CHANNELS];
        gate.process_interleaved(&mut block);
    }
}
