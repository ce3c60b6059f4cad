// Full encode/decode passes through the public API.
//
// Zero-crossing classification needs enough samples per bit to tell 1200 Hz
// from 2400 Hz. The combinations below are the ones that resolve cleanly:
// 300 and 600 baud at any common rate, 1200 baud at 44.1 kHz and 22.05 kHz.

use kcs_core::{
    decode, decode_with_config, encode, encode_with_config, Decoder, Encoder, ModemConfig, Parity,
    SampleBuffer, SerialFormat, BAUD_1200, BAUD_300, MAX_OUTPUT_BYTES, SAMPLE_RATE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Decoder `debug!`/`trace!` output shows up with `RUST_LOG=kcs_core=trace`
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn formats() -> Vec<SerialFormat> {
    ["8N1", "7E1", "8O2", "5N2", "1N1", "8E1"]
        .iter()
        .map(|s| s.parse().expect("valid format"))
        .collect()
}

#[test]
fn test_single_byte_scenario() {
    init_logger();
    let buffer = encode(&[0x41], SerialFormat::KCS_8N1, BAUD_1200);
    assert_eq!(buffer.sample_rate(), SAMPLE_RATE);
    assert_eq!(buffer.len(), 36 * (1 + 8 + 0 + 1));

    let output = decode(&buffer, SerialFormat::KCS_8N1, BAUD_1200);
    assert_eq!(output.bytes, vec![0x41]);
    assert!(!output.truncated);
}

#[test]
fn test_empty_input_scenario() {
    init_logger();
    let buffer = encode(&[], SerialFormat::KCS_8N1, BAUD_1200);
    assert_eq!(buffer.len(), 0);

    let output = decode(&buffer, SerialFormat::KCS_8N1, BAUD_1200);
    assert!(output.bytes.is_empty());
    assert!(!output.truncated);
}

#[test]
fn test_encode_decode_round_trip() {
    init_logger();
    let original_data = b"Hello, Audio Modem!";

    let encoder = Encoder::default();
    let samples = encoder.encode(original_data).expect("Failed to encode");
    assert_eq!(samples.len(), original_data.len() * 360);

    let decoded = Decoder::default().decode(samples.samples());
    assert_eq!(decoded.bytes, original_data, "Decoded data doesn't match original");
}

#[test]
fn test_all_byte_values_all_formats() {
    init_logger();
    let data: Vec<u8> = (0..=255).collect();

    for (sample_rate, baud) in [
        (44100, BAUD_300),
        (44100, 600),
        (44100, BAUD_1200),
        (22050, BAUD_1200),
        (48000, BAUD_300),
        (48000, 600),
        (8000, BAUD_300),
    ] {
        for format in formats() {
            let config = ModemConfig::new(format, baud).with_sample_rate(sample_rate);
            let expected: Vec<u8> = data.iter().map(|b| b & format.data_mask()).collect();

            let buffer = encode_with_config(&data, &config);
            assert_eq!(buffer.len(), data.len() * config.samples_per_char());

            let output = decode_with_config(buffer.samples(), &config);
            assert_eq!(
                output.bytes, expected,
                "round trip failed for {} at {} baud, {} Hz",
                format, baud, sample_rate
            );
            assert_eq!(output.parity_errors, 0, "{} parity errors", format);
            assert_eq!(output.framing_errors, 0, "{} framing errors", format);
        }
    }
}

#[test]
fn test_random_payload_round_trip() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(0x4B43_5300);
    let data: Vec<u8> = (0..1000).map(|_| rng.gen()).collect();

    let buffer = encode(&data, SerialFormat::KCS_8N1, BAUD_1200);
    let output = decode(&buffer, SerialFormat::KCS_8N1, BAUD_1200);
    assert_eq!(output.bytes, data);
}

#[test]
fn test_round_trip_with_gaussian_noise() {
    init_logger();
    let data: Vec<u8> = (0..=255).collect();
    let format = SerialFormat::new(8, 1, Parity::Even).unwrap();
    let buffer = encode(&data, format, BAUD_1200);

    let mut rng = StdRng::seed_from_u64(7);
    let noise = Normal::new(0.0, 3000.0).unwrap();
    let noisy: Vec<i16> = buffer
        .samples()
        .iter()
        .map(|&s| (s as f64 + noise.sample(&mut rng)).clamp(i16::MIN as f64, i16::MAX as f64) as i16)
        .collect();

    let output = decode(&SampleBuffer::new(noisy, SAMPLE_RATE), format, BAUD_1200);
    assert_eq!(output.bytes, data);
    assert_eq!(output.parity_errors, 0);
}

#[test]
fn test_round_trip_at_reduced_amplitude() {
    init_logger();
    // Only signs matter to the demodulator
    let data = b"quiet";
    let buffer = encode(data, SerialFormat::KCS_8N1, BAUD_300);
    let quiet: Vec<i16> = buffer.samples().iter().map(|&s| s / 64).collect();

    let output = decode(&SampleBuffer::new(quiet, SAMPLE_RATE), SerialFormat::KCS_8N1, BAUD_300);
    assert_eq!(output.bytes, data);
}

#[test]
fn test_default_capacity_truncates() {
    init_logger();
    // 22.05 kHz keeps the stream small: 180 samples per character
    let config = ModemConfig::new(SerialFormat::KCS_8N1, BAUD_1200).with_sample_rate(22050);
    let data: Vec<u8> = (0..MAX_OUTPUT_BYTES + 1).map(|i| i as u8).collect();

    let buffer = encode_with_config(&data, &config);
    let output = decode(&buffer, SerialFormat::KCS_8N1, BAUD_1200);

    assert_eq!(output.bytes.len(), MAX_OUTPUT_BYTES);
    assert_eq!(output.bytes[..], data[..MAX_OUTPUT_BYTES]);
    assert!(output.truncated);
}

#[test]
fn test_invalid_configuration_is_silent() {
    init_logger();
    assert!(encode(b"abc", SerialFormat::KCS_8N1, 0).is_empty());

    // 9600 baud at 8 kHz has no whole sample per bit
    let config = ModemConfig::new(SerialFormat::KCS_8N1, 9600).with_sample_rate(8000);
    assert!(encode_with_config(b"abc", &config).is_empty());

    let buffer = encode(b"abc", SerialFormat::KCS_8N1, BAUD_1200);
    assert!(decode(&buffer, SerialFormat::KCS_8N1, 0).is_empty());
}

#[test]
fn test_mismatched_baud_does_not_recover_data() {
    init_logger();
    let data = b"mismatch";
    let buffer = encode(data, SerialFormat::KCS_8N1, BAUD_300);
    let output = decode(&buffer, SerialFormat::KCS_8N1, BAUD_1200);
    assert_ne!(output.bytes, data);
}
