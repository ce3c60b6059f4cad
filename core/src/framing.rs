use crate::error::{KcsError, Result};
use crate::parity::Parity;
use crate::tone::ToneUnit;
use std::fmt;
use std::iter;
use std::str::FromStr;

/// Asynchronous serial character layout
///
/// A character on the line is: 1 start bit (0), `data_bits` data bits LSB
/// first, an optional parity bit, then `stop_bits` stop bits (1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialFormat {
    data_bits: u8,
    stop_bits: u8,
    parity: Parity,
}

impl SerialFormat {
    /// 8 data bits, no parity, 1 stop bit
    pub const KCS_8N1: SerialFormat = SerialFormat {
        data_bits: 8,
        stop_bits: 1,
        parity: Parity::None,
    };

    pub fn new(data_bits: u8, stop_bits: u8, parity: Parity) -> Result<Self> {
        if !(1..=8).contains(&data_bits) {
            return Err(KcsError::InvalidFormat(format!(
                "data bits must be 1..=8, got {}",
                data_bits
            )));
        }
        if stop_bits == 0 {
            return Err(KcsError::InvalidFormat(
                "at least one stop bit is required".into(),
            ));
        }
        Ok(Self {
            data_bits,
            stop_bits,
            parity,
        })
    }

    pub fn data_bits(&self) -> u8 {
        self.data_bits
    }

    pub fn stop_bits(&self) -> u8 {
        self.stop_bits
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    /// Start + data + parity + stop
    pub fn bits_per_char(&self) -> usize {
        1 + self.data_bits as usize + self.parity.bit_count() + self.stop_bits as usize
    }

    /// Mask selecting the bits of a byte that are actually transmitted
    pub fn data_mask(&self) -> u8 {
        ((1u16 << self.data_bits) - 1) as u8
    }
}

impl fmt::Display for SerialFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.data_bits, self.parity, self.stop_bits)
    }
}

/// Parses the usual shorthand, e.g. `8N1`, `7E1`, `8O2`
impl FromStr for SerialFormat {
    type Err = KcsError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || KcsError::InvalidFormat(format!("expected e.g. 8N1, got '{}'", s));

        let parity_pos = s
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(invalid)?;
        let (data, rest) = s.split_at(parity_pos);
        let mut rest_chars = rest.chars();
        let parity = Parity::try_from(rest_chars.next().ok_or_else(invalid)?)?;
        let stop = rest_chars.as_str();
        // u8::from_str would also take a sign
        if ![data, stop].iter().all(|field| field.bytes().all(|b| b.is_ascii_digit())) {
            return Err(invalid());
        }

        let data_bits = data.parse::<u8>().map_err(|_| invalid())?;
        let stop_bits = stop.parse::<u8>().map_err(|_| invalid())?;
        SerialFormat::new(data_bits, stop_bits, parity)
    }
}

/// Expands bytes into serial characters
pub struct FrameEncoder;

impl FrameEncoder {
    /// Line bits for one character, in transmission order
    ///
    /// Bits of `byte` above `data_bits` are not sent and do not count towards
    /// the parity bit.
    pub fn frame_bits(byte: u8, format: &SerialFormat) -> impl Iterator<Item = bool> {
        let data = byte & format.data_mask();
        let data_bits = format.data_bits();
        let parity_bit = format.parity().bit_for(data);
        let stop_bits = format.stop_bits() as usize;

        iter::once(false)
            .chain((0..data_bits).map(move |i| (data >> i) & 1 == 1))
            .chain(parity_bit)
            .chain(iter::repeat(true).take(stop_bits))
    }

    /// Append the tone windows of one character to `out`
    pub fn encode(byte: u8, format: &SerialFormat, tone: &ToneUnit, out: &mut Vec<i16>) {
        for bit in Self::frame_bits(byte, format) {
            tone.synthesize(bit, out);
        }
    }
}

/// One character recovered from the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedChar {
    pub byte: u8,
    /// Received parity bit matched the recomputed one (always true without parity)
    pub parity_ok: bool,
    /// Every stop bit read as 1
    pub stop_ok: bool,
}

/// Position of the decoder within a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    /// Waiting for a start bit
    Searching,
    /// Start bit confirmed; `index` data bits assembled so far
    Data { index: u8, byte: u8 },
    /// All data bits in, parity bit next
    Parity { byte: u8 },
    /// `index` stop bits consumed so far
    Stop {
        index: u8,
        byte: u8,
        parity_ok: bool,
        stop_ok: bool,
    },
}

/// Reassembles characters from classified bits, one bit at a time
///
/// Parity and stop bits are consumed but never cause a character to be
/// dropped; their outcome is reported on the [`DecodedChar`].
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    format: SerialFormat,
    state: FrameState,
}

impl FrameDecoder {
    pub fn new(format: SerialFormat) -> Self {
        Self {
            format,
            state: FrameState::Searching,
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn is_searching(&self) -> bool {
        self.state == FrameState::Searching
    }

    /// Feed the next bit; returns the character once its last stop bit is in
    pub fn push_bit(&mut self, bit: bool) -> Option<DecodedChar> {
        let (next, emitted) = match self.state {
            FrameState::Searching if bit => (FrameState::Searching, None),
            FrameState::Searching => (FrameState::Data { index: 0, byte: 0 }, None),
            FrameState::Data { index, byte } => {
                let byte = byte | ((bit as u8) << index);
                let index = index + 1;
                if index < self.format.data_bits() {
                    (FrameState::Data { index, byte }, None)
                } else if self.format.parity() == Parity::None {
                    (Self::first_stop(byte, true), None)
                } else {
                    (FrameState::Parity { byte }, None)
                }
            }
            FrameState::Parity { byte } => {
                let parity_ok = self.format.parity().bit_for(byte) == Some(bit);
                (Self::first_stop(byte, parity_ok), None)
            }
            FrameState::Stop {
                index,
                byte,
                parity_ok,
                stop_ok,
            } => {
                let stop_ok = stop_ok && bit;
                let index = index + 1;
                if index < self.format.stop_bits() {
                    (
                        FrameState::Stop {
                            index,
                            byte,
                            parity_ok,
                            stop_ok,
                        },
                        None,
                    )
                } else {
                    (
                        FrameState::Searching,
                        Some(DecodedChar {
                            byte,
                            parity_ok,
                            stop_ok,
                        }),
                    )
                }
            }
        };

        self.state = next;
        emitted
    }

    fn first_stop(byte: u8, parity_ok: bool) -> FrameState {
        FrameState::Stop {
            index: 0,
            byte,
            parity_ok,
            stop_ok: true,
        }
    }
}
