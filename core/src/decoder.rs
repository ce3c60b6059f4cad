use crate::buffer::{DecodeOutput, SampleBuffer};
use crate::config::ModemConfig;
use crate::error::Result;
use crate::framing::{FrameDecoder, FrameState, SerialFormat};
use crate::tone::ToneUnit;
use crate::BAUD_1200;
use log::{debug, trace, warn};

/// Recovers bytes from an FSK sample stream with no external clock
///
/// Between characters the decoder slides a one-bit window forward a single
/// sample at a time until it reads a start bit. From there it steps a full bit
/// window per bit until the character is complete, then goes back to
/// searching. Synchronization is only re-acquired at start bits.
pub struct Decoder {
    config: ModemConfig,
    tone: ToneUnit,
}

impl Decoder {
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

    /// Decode audio samples back to binary data
    ///
    /// Stops when less than one full character of samples remains, or when
    /// the output capacity is reached (`truncated` is then set). Parity and
    /// stop bits are counted in the output but never reject a character.
    pub fn decode(&self, samples: &[i16]) -> DecodeOutput {
        let samples_per_bit = self.tone.samples_per_bit();
        let samples_per_char = self.config.samples_per_char();
        let capacity = self.config.max_output_bytes;

        let mut output = DecodeOutput {
            bytes: Vec::with_capacity(capacity.min(samples.len() / samples_per_char)),
            ..DecodeOutput::default()
        };
        let mut framer = FrameDecoder::new(self.config.format);
        let mut pos = 0;
        let mut search_steps = 0usize;

        loop {
            match framer.state() {
                FrameState::Searching => {
                    if pos + samples_per_char > samples.len() {
                        break;
                    }
                    let bit = self.tone.classify(&samples[pos..pos + samples_per_bit]);
                    framer.push_bit(bit);
                    if framer.is_searching() {
                        pos += 1;
                        search_steps += 1;
                    } else {
                        trace!("start bit at sample {}", pos);
                        pos += samples_per_bit;
                    }
                }
                _ => {
                    // A confirmed start bit guarantees the rest of the character fits
                    let bit = self.tone.classify(&samples[pos..pos + samples_per_bit]);
                    pos += samples_per_bit;

                    let Some(decoded) = framer.push_bit(bit) else {
                        continue;
                    };
                    if output.bytes.len() >= capacity {
                        warn!(
                            "output capacity of {} bytes reached at sample {}, truncating",
                            capacity, pos
                        );
                        output.truncated = true;
                        break;
                    }
                    if !decoded.parity_ok {
                        output.parity_errors += 1;
                    }
                    if !decoded.stop_ok {
                        output.framing_errors += 1;
                    }
                    trace!("decoded {:#04x}", decoded.byte);
                    output.bytes.push(decoded.byte);
                }
            }
        }

        debug!(
            "decoded {} bytes from {} samples ({} search steps, {} parity errors, {} framing errors)",
            output.bytes.len(),
            samples.len(),
            search_steps,
            output.parity_errors,
            output.framing_errors
        );

        output
    }
}

impl Default for Decoder {
    /// 8N1 at 1200 baud, 44.1 kHz, 65536 byte capacity
    fn default() -> Self {
        let config = ModemConfig::new(SerialFormat::KCS_8N1, BAUD_1200);
        Self {
            tone: ToneUnit::new(&config),
            config,
        }
    }
}

/// Decode `samples` at their own sample rate with the default tones and capacity
///
/// Never fails: an unusable baud rate gives an empty output, and a stream with
/// no recognizable start bit decodes to zero bytes.
pub fn decode(samples: &SampleBuffer, format: SerialFormat, baud_rate: u32) -> DecodeOutput {
    let config = ModemConfig::new(format, baud_rate).with_sample_rate(samples.sample_rate());
    decode_with_config(samples.samples(), &config)
}

/// [`decode`] with full control over the modem parameters
pub fn decode_with_config(samples: &[i16], config: &ModemConfig) -> DecodeOutput {
    match Decoder::new(config.clone()) {
        Ok(decoder) => decoder.decode(samples),
        Err(err) => {
            warn!("decode skipped: {}", err);
            DecodeOutput::default()
        }
    }
}
