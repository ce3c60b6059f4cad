use crate::error::{CliError, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use kcs_core::SampleBuffer;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

/// 16-bit integer mono PCM
pub fn pcm_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Read a WAV file that must be 16-bit mono PCM at `expected_rate`
pub fn read_wav(path: &Path, expected_rate: u32) -> Result<SampleBuffer> {
    let file = BufReader::new(File::open(path)?);
    read_wav_from(file, expected_rate)
}

pub fn read_wav_from<R: Read>(reader: R, expected_rate: u32) -> Result<SampleBuffer> {
    let mut reader = WavReader::new(reader)?;
    let spec = reader.spec();

    if spec != pcm_spec(expected_rate) {
        return Err(CliError::UnsupportedWav {
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            sample_format: spec.sample_format,
            sample_rate: spec.sample_rate,
            expected_rate,
        });
    }

    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    log::debug!("read {} samples at {} Hz", samples.len(), spec.sample_rate);

    Ok(SampleBuffer::new(samples, spec.sample_rate))
}

/// Write `audio` as a RIFF/WAVE PCM file at the buffer's own sample rate
pub fn write_wav(path: &Path, audio: &SampleBuffer) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    write_wav_to(file, audio)
}

pub fn write_wav_to<W: Write + Seek>(writer: W, audio: &SampleBuffer) -> Result<()> {
    if audio.is_empty() {
        return Err(CliError::EmptyAudio);
    }

    let mut writer = WavWriter::new(writer, pcm_spec(audio.sample_rate()))?;
    for &sample in audio.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    log::debug!(
        "wrote {} samples ({:.2} s) at {} Hz",
        audio.len(),
        audio.duration_secs(),
        audio.sample_rate()
    );
    Ok(())
}
