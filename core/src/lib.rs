//! Kansas City Standard style audio modem
//!
//! Bytes are sent as asynchronous serial characters (start bit, data bits LSB
//! first, optional parity, stop bits). Each bit is one window of square-wave
//! tone: 1200 Hz for 0, 2400 Hz for 1. Decoding estimates each window's
//! frequency from its zero crossings and re-synchronizes on every start bit.

pub mod buffer;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod framing;
pub mod parity;
pub mod tone;

pub use buffer::{DecodeOutput, SampleBuffer};
pub use config::ModemConfig;
pub use decoder::{decode, decode_with_config, Decoder};
pub use encoder::{encode, encode_with_config, Encoder};
pub use error::{KcsError, Result};
pub use framing::{DecodedChar, FrameDecoder, FrameEncoder, FrameState, SerialFormat};
pub use parity::{compute_parity, Parity};
pub use tone::ToneUnit;

// Signal configuration
pub const SAMPLE_RATE: u32 = 44100;
pub const SPACE_FREQ: f64 = 1200.0; // Hz, bit 0
pub const MARK_FREQ: f64 = 2400.0; // Hz, bit 1

// Common line speeds
pub const BAUD_300: u32 = 300;
pub const BAUD_1200: u32 = 1200;

/// Default cap on bytes produced by one decode pass
pub const MAX_OUTPUT_BYTES: usize = 65536;
