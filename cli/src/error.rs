use kcs_core::KcsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error(
        "Unsupported WAV format: {channels} channel(s), {bits_per_sample}-bit {sample_format:?} at {sample_rate} Hz. \
         Must be 16-bit mono PCM at {expected_rate} Hz"
    )]
    UnsupportedWav {
        channels: u16,
        bits_per_sample: u16,
        sample_format: hound::SampleFormat,
        sample_rate: u32,
        expected_rate: u32,
    },

    #[error("Input file {} is empty", .0.display())]
    EmptyInput(PathBuf),

    #[error("No audio samples in {}", .0.display())]
    NoSamples(PathBuf),

    #[error("No audio samples to write")]
    EmptyAudio,

    #[error(transparent)]
    Modem(#[from] KcsError),
}

pub type Result<T> = std::result::Result<T, CliError>;
