//! Per-phase analysis state and reconstruction queues.

use super::super::transform::SpectralTransform;
use rustfft::num_complex::Complex;

/// A FIFO of reconstructed samples awaiting the overlap-add drain.
///
/// Built on a fixed-capacity ring so that pushing a processed frame and
/// draining a block never allocate. Draining past the end yields silence
/// rather than blocking or panicking, so a queue that has not yet produced
/// enough output (right after a rebuild, for instance) degrades gracefully.
pub struct OutputQueue {
    data: Vec<f64>,
    read_pos: usize,
    write_pos: usize,
    len: usize,
}

impl OutputQueue {
    /// Creates a queue holding up to `capacity` samples, pre-filled with
    /// `num_zeros` samples of silence.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `num_zeros > capacity`.
    pub fn seeded(capacity: usize, num_zeros: usize) -> Self {
        debug_assert!(num_zeros <= capacity);

        // the backing store starts zeroed, so seeding is just a matter of
        // placing the write cursor
        Self {
            data: vec![0.0; capacity],
            read_pos: 0,
            write_pos: num_zeros,
            len: num_zeros,
        }
    }

    /// Appends one sample to the back of the queue.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the queue is full.
    pub fn push(&mut self, sample: f64) {
        debug_assert!(self.len < self.data.len());

        self.data[self.write_pos] = sample;
        self.write_pos += 1;
        if self.write_pos == self.data.len() {
            self.write_pos = 0;
        }
        self.len += 1;
    }

    /// Removes and returns the oldest sample, or `0.0` if the queue is
    /// empty.
    pub fn pop_front_or_zero(&mut self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }

        let sample = self.data[self.read_pos];
        self.read_pos += 1;
        if self.read_pos == self.data.len() {
            self.read_pos = 0;
        }
        self.len -= 1;

        sample
    }

    /// The number of queued samples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no samples are queued.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// One staggered analysis pipeline: an accumulating input window, a
/// frequency-domain frame, and the queue of reconstructed output.
///
/// A slot for phase index `j` starts its life with `j * stagger` zeroes
/// already "buffered", so its first window completes `stagger` samples
/// after its neighbour's. The output queue is seeded with the complementary
/// count so every phase's reconstruction lands at the same output offset,
/// one full window after the input it came from.
pub struct PhaseSlot {
    /// Incoming samples, stored with zero imaginary parts.
    analysis: Vec<Complex<f64>>,
    /// How many samples of `analysis` are filled.
    fill: usize,
    /// Scratch frame the transform and gate run over.
    spectrum: Vec<Complex<f64>>,
    /// Reconstructed samples awaiting the overlap-add drain.
    queue: OutputQueue,
}

impl PhaseSlot {
    /// Creates the slot for `phase_idx` in a gate with the given window
    /// length and stagger.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the phase offset exceeds the window length.
    pub fn new(
        window_len: usize,
        stagger: usize,
        phase_idx: usize,
        queue_capacity: usize,
    ) -> Self {
        let offset = phase_idx * stagger;
        debug_assert!(offset < window_len);

        Self {
            analysis: vec![Complex::default(); window_len],
            fill: offset,
            spectrum: vec![Complex::default(); window_len],
            queue: OutputQueue::seeded(queue_capacity, window_len - offset),
        }
    }

    /// Whether a full window of input has accumulated.
    pub fn is_full(&self) -> bool {
        self.fill == self.analysis.len()
    }

    /// Appends one input sample to the analysis window.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the window is already full; callers must
    /// process the completed frame first.
    pub fn push(&mut self, sample: f64) {
        debug_assert!(self.fill < self.analysis.len());

        self.analysis[self.fill] = Complex::new(sample, 0.0);
        self.fill += 1;
    }

    /// Runs the gate over the completed window: applies the analysis
    /// window, transforms to the frequency domain, silences every bin whose
    /// magnitude falls below `threshold`, transforms back, and queues the
    /// real parts for reconstruction. The analysis window is left empty.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the window is not full, or if `window` has a
    /// different length.
    pub fn process_frame(
        &mut self,
        window: &[f64],
        transform: &mut SpectralTransform,
        threshold: f64,
    ) {
        debug_assert!(self.is_full());
        debug_assert_eq!(window.len(), self.analysis.len());

        for (bin, (sample, w)) in
            self.spectrum.iter_mut().zip(self.analysis.iter().zip(window))
        {
            *bin = *sample * *w;
        }

        transform.forward(&mut self.spectrum);

        for bin in &mut self.spectrum {
            if bin.norm() < threshold {
                *bin = Complex::default();
            }
        }

        transform.inverse(&mut self.spectrum);

        // magnitude gating silences conjugate bin pairs together, so the
        // inverse stays real up to rounding error; only the real parts
        // are kept
        for sample in &self.spectrum {
            self.queue.push(sample.re);
        }

        self.fill = 0;
    }

    /// Removes and returns the oldest reconstructed sample, or silence if
    /// this phase has none ready.
    pub fn pop_output_or_zero(&mut self) -> f64 {
        self.queue.pop_front_or_zero()
    }

    /// How many input samples are currently buffered, counting the seeded
    /// phase offset.
    pub fn buffered_input(&self) -> usize {
        self.fill
    }

    /// How many reconstructed samples are queued for output.
    pub fn queued_output(&self) -> usize {
        self.queue.len()
    }
}
