use crate::config::ModemConfig;

// Two-tone FSK at the bit level
//
// - Bit 0 (space) is a square wave at the space frequency (1200 Hz by default)
// - Bit 1 (mark) is a square wave at the mark frequency (2400 Hz by default)
// - One bit occupies floor(sample_rate / baud_rate) samples
//
// Synthesis restarts the carrier at phase 0 for every bit window, so there is
// no phase continuity between consecutive bits. The waveform is a hard-limited
// square wave with no bandlimiting.
//
// Classification counts sign changes inside one bit window and turns the count
// into a frequency estimate. It is coarse: very short windows (a handful of
// samples) do not contain enough crossings to tell the tones apart.

/// Sample value for the positive half of a carrier cycle
const HIGH: i16 = i16::MAX;

/// Sample value for the negative half of a carrier cycle
const LOW: i16 = i16::MIN;

/// Number of sign changes between adjacent samples.
/// A sample `>= 0` counts as non-negative.
pub fn count_zero_crossings(window: &[i16]) -> usize {
    window
        .windows(2)
        .filter(|pair| (pair[0] < 0) != (pair[1] < 0))
        .count()
}

/// Synthesizes and classifies single bit windows
#[derive(Debug, Clone)]
pub struct ToneUnit {
    sample_rate: f64,
    space_freq: f64,
    mark_freq: f64,
    samples_per_bit: usize,
}

impl ToneUnit {
    pub fn new(config: &ModemConfig) -> Self {
        Self {
            sample_rate: config.sample_rate as f64,
            space_freq: config.space_freq,
            mark_freq: config.mark_freq,
            samples_per_bit: config.samples_per_bit(),
        }
    }

    pub fn samples_per_bit(&self) -> usize {
        self.samples_per_bit
    }

    fn carrier(&self, bit: bool) -> f64 {
        if bit {
            self.mark_freq
        } else {
            self.space_freq
        }
    }

    /// Append one bit window of square wave to `out`
    pub fn synthesize(&self, bit: bool, out: &mut Vec<i16>) {
        let samples_per_cycle = self.sample_rate / self.carrier(bit);
        let half_cycle = samples_per_cycle / 2.0;

        out.extend((0..self.samples_per_bit).map(|i| {
            let cycle_pos = (i as f64) % samples_per_cycle;
            if cycle_pos < half_cycle {
                HIGH
            } else {
                LOW
            }
        }));
    }

    /// Zero-crossing frequency estimate for one window, in Hz
    ///
    /// Two crossings per carrier cycle, so
    /// freq = crossings * sample_rate / (2 * window_len)
    pub fn estimate_frequency(&self, window: &[i16]) -> f64 {
        if window.is_empty() {
            return 0.0;
        }
        let crossings = count_zero_crossings(window) as f64;
        crossings * self.sample_rate / (2.0 * window.len() as f64)
    }

    /// Classify one window as a bit: `true` when the estimate is strictly
    /// closer to the mark tone. Ties go to space (bit 0).
    pub fn classify(&self, window: &[i16]) -> bool {
        let freq = self.estimate_frequency(window);
        (freq - self.mark_freq).abs() < (freq - self.space_freq).abs()
    }
}
