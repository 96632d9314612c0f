//! Test signal generation command.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use frogg_core::Lfo;
use frogg_io::{StereoSamples, WavSpec, write_wav_stereo};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate an impulse
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Length in samples
        #[arg(long, default_value = "48000")]
        length: usize,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Impulse amplitude
        #[arg(long, default_value = "1.0")]
        amplitude: f32,
    },

    /// Generate a sine tone
    Sine {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f64,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f64,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let (output, samples, sample_rate) = match args.command {
        GenerateCommand::Impulse {
            output,
            length,
            sample_rate,
            amplitude,
        } => {
            println!("Generating impulse...");
            (output, impulse(length, amplitude), sample_rate)
        }

        GenerateCommand::Sine {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
        } => {
            if sample_rate == 0 {
                anyhow::bail!("Sample rate must be positive");
            }
            if !duration.is_finite() || duration < 0.0 {
                anyhow::bail!("Invalid duration: {}", duration);
            }
            println!("Generating sine...");
            println!("  {} Hz for {:.2}s", freq, duration);

            let len = (duration * f64::from(sample_rate)) as usize;
            (
                output,
                sine(len, freq, f64::from(sample_rate), amplitude),
                sample_rate,
            )
        }
    };

    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
    };

    write_wav_stereo(&output, &samples, spec)?;
    tracing::debug!(frames = samples.len(), path = %output.display(), "wrote test signal");
    println!("Wrote {} frames to {}", samples.len(), output.display());
    Ok(())
}

fn impulse(length: usize, amplitude: f32) -> StereoSamples {
    let mut mono = vec![0.0; length];
    if let Some(first) = mono.first_mut() {
        *first = amplitude;
    }
    StereoSamples::from_mono(mono)
}

fn sine(length: usize, freq: f64, sample_rate: f64, amplitude: f32) -> StereoSamples {
    let mut osc = Lfo::new();
    let increment = freq / sample_rate;
    let mono = (0..length)
        .map(|_| {
            let s = osc.sine() as f32 * amplitude;
            osc.advance(increment);
            s
        })
        .collect();
    StereoSamples::from_mono(mono)
}
