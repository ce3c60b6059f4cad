use crate::SAMPLE_RATE;

/// Signed 16-bit mono PCM samples at a known sample rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn empty(sample_rate: u32) -> Self {
        Self::new(Vec::new(), sample_rate)
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Hand the samples over to the next owner
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::empty(SAMPLE_RATE)
    }
}

impl AsRef<[i16]> for SampleBuffer {
    fn as_ref(&self) -> &[i16] {
        &self.samples
    }
}

/// Result of a decode pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOutput {
    pub bytes: Vec<u8>,
    /// Set when decoding stopped because the output capacity was reached
    /// while more characters were still available
    pub truncated: bool,
    /// Characters whose received parity bit disagreed with the recomputed one.
    /// These characters are still emitted.
    pub parity_errors: usize,
    /// Stop-bit windows that did not read as 1. Not enforced either.
    pub framing_errors: usize,
}

impl DecodeOutput {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
