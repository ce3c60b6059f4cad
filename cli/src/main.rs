mod error;
mod wav;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use kcs_core::{Decoder, Encoder, ModemConfig, SerialFormat, BAUD_1200, MAX_OUTPUT_BYTES};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "kcs")]
#[command(about = "Kansas City Standard audio modem: bytes to FSK tones and back")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode binary data to WAV audio file
    Encode {
        /// Input binary file
        #[arg(value_name = "INPUT.BIN")]
        input: PathBuf,

        /// Output WAV file
        #[arg(value_name = "OUTPUT.WAV")]
        output: PathBuf,

        #[command(flatten)]
        line: LineOptions,
    },

    /// Decode WAV audio file to binary data
    Decode {
        /// Input WAV file (16-bit mono PCM, 44100 Hz)
        #[arg(value_name = "INPUT.WAV")]
        input: PathBuf,

        /// Output binary file; prints a hex dump when omitted
        #[arg(value_name = "OUTPUT.BIN")]
        output: Option<PathBuf>,

        #[command(flatten)]
        line: LineOptions,

        /// Stop decoding after this many bytes
        #[arg(long, default_value_t = MAX_OUTPUT_BYTES)]
        max_bytes: usize,
    },
}

#[derive(Args)]
struct LineOptions {
    /// Line speed in bits per second
    #[arg(short, long, default_value_t = BAUD_1200)]
    baud: u32,

    /// Character format: data bits, parity (N/E/O), stop bits
    #[arg(short, long, default_value = "8N1")]
    format: SerialFormat,
}

impl LineOptions {
    fn config(&self) -> ModemConfig {
        ModemConfig::new(self.format, self.baud)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> error::Result<()> {
    match cli.command {
        Commands::Encode {
            input,
            output,
            line,
        } => encode_command(&input, &output, &line),
        Commands::Decode {
            input,
            output,
            line,
            max_bytes,
        } => decode_command(&input, output.as_deref(), &line, max_bytes),
    }
}

fn encode_command(input_path: &Path, output_path: &Path, line: &LineOptions) -> error::Result<()> {
    let data = std::fs::read(input_path)?;
    if data.is_empty() {
        return Err(CliError::EmptyInput(input_path.to_path_buf()));
    }

    let encoder = Encoder::new(line.config())?;
    let audio = encoder.encode(&data)?;
    info!(
        "{} {} at {} baud: {} samples, {:.2} s",
        input_path.display(),
        line.format,
        line.baud,
        audio.len(),
        audio.duration_secs()
    );

    wav::write_wav(output_path, &audio)?;

    println!(
        "Encoded {} bytes from {} to {}",
        data.len(),
        input_path.display(),
        output_path.display()
    );
    Ok(())
}

fn decode_command(
    input_path: &Path,
    output_path: Option<&Path>,
    line: &LineOptions,
    max_bytes: usize,
) -> error::Result<()> {
    let config = line.config().with_max_output_bytes(max_bytes);
    let decoder = Decoder::new(config)?;

    let audio = wav::read_wav(input_path, decoder.config().sample_rate)?;
    if audio.is_empty() {
        return Err(CliError::NoSamples(input_path.to_path_buf()));
    }
    info!("{}: {} samples, {:.2} s", input_path.display(), audio.len(), audio.duration_secs());

    let decoded = decoder.decode(audio.samples());

    if decoded.truncated {
        eprintln!("Warning: output truncated at {} bytes", max_bytes);
    }
    if decoded.parity_errors > 0 || decoded.framing_errors > 0 {
        eprintln!(
            "Warning: {} parity error(s), {} framing error(s)",
            decoded.parity_errors, decoded.framing_errors
        );
    }

    let data = decoded.into_bytes();
    match output_path {
        Some(path) => {
            std::fs::write(path, &data)?;
            println!("Decoded {} bytes written to {}", data.len(), path.display());
        }
        None => {
            println!("Decoded {} bytes:", data.len());
            print!("{}", hex_dump(&data));
        }
    }
    Ok(())
}

/// Upper-case hex, 16 bytes per line
fn hex_dump(data: &[u8]) -> String {
    data.chunks(16)
        .map(|line| {
            let hex: Vec<String> = line.iter().map(|b| format!("{:02X}", b)).collect();
            hex.join(" ") + "\n"
        })
        .collect()
}
