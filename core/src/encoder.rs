use crate::buffer::SampleBuffer;
use crate::config::ModemConfig;
use crate::error::{KcsError, Result};
use crate::framing::{FrameEncoder, SerialFormat};
use crate::tone::ToneUnit;
use crate::BAUD_1200;
use log::{debug, warn};

/// Turns a byte stream into back-to-back serial characters of FSK tones
///
/// Characters follow each other with no idle tone in between.
pub struct Encoder {
    config: ModemConfig,
    tone: ToneUnit,
}

impl Encoder {
    pub fn new(config: ModemConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tone: ToneUnit::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &ModemConfig {
        &self.config
    }

    /// Number of samples `len` bytes encode to, or `None` on overflow
    pub fn encoded_len(&self, len: usize) -> Option<usize> {
        len.checked_mul(self.config.samples_per_char())
    }

    /// Encode binary data into audio samples
    ///
    /// The whole output is reserved up front; if that reservation fails no
    /// partial buffer is returned.
    pub fn encode(&self, data: &[u8]) -> Result<SampleBuffer> {
        if data.is_empty() {
            return Err(KcsError::EmptyInput);
        }

        let total = self
            .encoded_len(data.len())
            .ok_or(KcsError::AllocationFailed { samples: usize::MAX })?;

        let mut samples = Vec::new();
        samples
            .try_reserve_exact(total)
            .map_err(|_| KcsError::AllocationFailed { samples: total })?;

        for &byte in data {
            FrameEncoder::encode(byte, &self.config.format, &self.tone, &mut samples);
        }
        debug_assert_eq!(samples.len(), total);

        debug!(
            "encoded {} bytes as {} characters at {} baud: {} samples ({} per bit)",
            data.len(),
            self.config.format,
            self.config.baud_rate,
            samples.len(),
            self.tone.samples_per_bit()
        );

        Ok(SampleBuffer::new(samples, self.config.sample_rate))
    }
}

impl Default for Encoder {
    /// 8N1 at 1200 baud, 44.1 kHz
    fn default() -> Self {
        let config = ModemConfig::new(SerialFormat::KCS_8N1, BAUD_1200);
        Self {
            tone: ToneUnit::new(&config),
            config,
        }
    }
}

/// Encode `data` at the default sample rate and tones
///
/// Never fails: empty input, an unusable baud rate or an allocation failure
/// all give an empty buffer.
pub fn encode(data: &[u8], format: SerialFormat, baud_rate: u32) -> SampleBuffer {
    encode_with_config(data, &ModemConfig::new(format, baud_rate))
}

/// [`encode`] with full control over the modem parameters
pub fn encode_with_config(data: &[u8], config: &ModemConfig) -> SampleBuffer {
    match Encoder::new(config.clone()).and_then(|encoder| encoder.encode(data)) {
        Ok(buffer) => buffer,
        Err(KcsError::EmptyInput) => SampleBuffer::empty(config.sample_rate),
        Err(err) => {
            warn!("encode produced no samples: {}", err);
            SampleBuffer::empty(config.sample_rate)
        }
    }
}
