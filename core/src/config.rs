use crate::error::{KcsError, Result};
use crate::framing::SerialFormat;
use crate::{MARK_FREQ, MAX_OUTPUT_BYTES, SAMPLE_RATE, SPACE_FREQ};

/// Parameters shared by one encode or decode pass
///
/// Sample rate and tone frequencies are carried here instead of being baked
/// into the signal code, so the modem can be exercised at any rate.
#[derive(Debug, Clone, PartialEq)]
pub struct ModemConfig {
    pub sample_rate: u32,
    pub baud_rate: u32,
    /// Tone for bit 0, in Hz
    pub space_freq: f64,
    /// Tone for bit 1, in Hz
    pub mark_freq: f64,
    pub format: SerialFormat,
    /// Upper bound on bytes produced by one decode pass
    pub max_output_bytes: usize,
}

impl ModemConfig {
    pub fn new(format: SerialFormat, baud_rate: u32) -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            baud_rate,
            space_freq: SPACE_FREQ,
            mark_freq: MARK_FREQ,
            format,
            max_output_bytes: MAX_OUTPUT_BYTES,
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_tones(mut self, space_freq: f64, mark_freq: f64) -> Self {
        self.space_freq = space_freq;
        self.mark_freq = mark_freq;
        self
    }

    pub fn with_max_output_bytes(mut self, max_output_bytes: usize) -> Self {
        self.max_output_bytes = max_output_bytes;
        self
    }

    /// floor(sample_rate / baud_rate); 0 when the baud rate is zero
    pub fn samples_per_bit(&self) -> usize {
        if self.baud_rate == 0 {
            return 0;
        }
        (self.sample_rate / self.baud_rate) as usize
    }

    /// Samples occupied by one complete serial character
    pub fn samples_per_char(&self) -> usize {
        self.samples_per_bit() * self.format.bits_per_char()
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(KcsError::InvalidConfig("sample rate must be positive".into()));
        }
        if self.baud_rate == 0 {
            return Err(KcsError::InvalidConfig("baud rate must be positive".into()));
        }
        if self.samples_per_bit() == 0 {
            return Err(KcsError::InvalidConfig(format!(
                "baud rate {} exceeds sample rate {}",
                self.baud_rate, self.sample_rate
            )));
        }
        for (name, freq) in [("space", self.space_freq), ("mark", self.mark_freq)] {
            if !freq.is_finite() || freq <= 0.0 {
                return Err(KcsError::InvalidConfig(format!(
                    "{} tone must be a positive frequency, got {}",
                    name, freq
                )));
            }
        }
        if self.space_freq == self.mark_freq {
            return Err(KcsError::InvalidConfig(
                "mark and space tones must differ".into(),
            ));
        }
        Ok(())
    }
}
