//! File-based chorus/flanger processing command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, ValueEnum};
use frogg_config::PluginState;
use frogg_core::ParameterInfo;
use frogg_engine::{
    DEFAULT_MAX_DELAY_SECONDS, ModulationParams, ModulationType, PARAM_DESCRIPTORS,
    SharedParams, params,
};
use frogg_io::{
    DEFAULT_BLOCK_SIZE, OfflineRenderer, StereoSamples, WavSpec, read_wav_stereo,
    write_wav_stereo,
};
use indicatif::{ProgressBar, ProgressStyle};

/// Modulation type for CLI
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliModType {
    Chorus,
    Flanger,
}

impl From<CliModType> for ModulationType {
    fn from(t: CliModType) -> Self {
        match t {
            CliModType::Chorus => ModulationType::Chorus,
            CliModType::Flanger => ModulationType::Flanger,
        }
    }
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Modulation type
    #[arg(short = 't', long = "type", value_enum)]
    mod_type: Option<CliModType>,

    /// Dry/wet mix (0-1)
    #[arg(short, long)]
    mix: Option<f32>,

    /// Modulation depth (0-1)
    #[arg(short, long)]
    depth: Option<f32>,

    /// LFO rate in Hz (0.1-20)
    #[arg(short, long)]
    rate: Option<f32>,

    /// Right-channel LFO phase offset in cycles (0-1.1)
    #[arg(long)]
    phase_offset: Option<f32>,

    /// Feedback amount (0-0.98)
    #[arg(short, long)]
    feedback: Option<f32>,

    /// Load parameters from a state file (TOML)
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Save the final parameters to a state file (TOML)
    #[arg(long, value_name = "FILE")]
    save_state: Option<PathBuf>,

    /// Processing block size
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Delay buffer length in seconds
    #[arg(long, default_value_t = DEFAULT_MAX_DELAY_SECONDS)]
    max_delay: f64,
}

impl ProcessArgs {
    /// Start from the state file (or defaults), then apply flag overrides.
    fn resolve_params(&self) -> anyhow::Result<ModulationParams> {
        let mut resolved = match &self.state {
            Some(path) => {
                println!("Loading state: {}", path.display());
                PluginState::load(path)?.to_params()?
            }
            None => ModulationParams::default(),
        };

        let overrides = [
            (params::DRY_WET, self.mix),
            (params::DEPTH, self.depth),
            (params::RATE, self.rate),
            (params::PHASE_OFFSET, self.phase_offset),
            (params::FEEDBACK, self.feedback),
        ];
        for (index, value) in overrides {
            if let Some(value) = value {
                let desc = &PARAM_DESCRIPTORS[index];
                if !value.is_finite() {
                    anyhow::bail!("Invalid value for {}: {}", desc.string_id, value);
                }
                let clamped = desc.clamp(value);
                if clamped != value {
                    tracing::warn!(
                        param = desc.string_id,
                        value,
                        clamped,
                        "value out of range, clamped"
                    );
                }
                resolved.set_param(index, clamped);
            }
        }
        if let Some(t) = self.mod_type {
            resolved.mod_type = t.into();
        }

        Ok(resolved)
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if ![16, 24, 32].contains(&args.bit_depth) {
        anyhow::bail!(
            "Unsupported bit depth {} (expected 16, 24 or 32)",
            args.bit_depth
        );
    }

    let resolved = args.resolve_params()?;

    println!("Reading {}...", args.input.display());
    let (mut samples, spec) = read_wav_stereo(&args.input)?;
    let sample_rate = f64::from(spec.sample_rate);

    println!(
        "  {} frames, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f64 / sample_rate
    );

    tracing::info!(
        mod_type = %resolved.mod_type,
        mix = resolved.dry_wet,
        depth = resolved.depth,
        rate = resolved.rate,
        phase_offset = resolved.phase_offset,
        feedback = resolved.feedback,
        "parameters"
    );

    let shared = Arc::new(SharedParams::new(&resolved));
    let mut renderer = OfflineRenderer::new(sample_rate, args.max_delay, shared)?
        .with_block_size(args.block_size);

    println!("Processing ({})...", resolved.mod_type);

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let input_peak = samples.peak();
    renderer.render_with_progress(&mut samples, |done, _| pb.set_position(done as u64))?;
    pb.finish_with_message("done");

    print_stats(input_peak, &samples);

    let out_spec = WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(&args.output, &samples, out_spec)?;

    if let Some(path) = &args.save_state {
        PluginState::from_params(&resolved).save(path)?;
        println!("Saved state to {}", path.display());
    }

    println!("Done!");
    Ok(())
}

fn print_stats(input_peak: f32, output: &StereoSamples) {
    println!("\nStats:");
    println!("  Input:  Peak {:.1} dB", linear_to_db(input_peak));
    println!(
        "  Output: Peak {:.1} dB, RMS L {:.1} dB, RMS R {:.1} dB",
        linear_to_db(output.peak()),
        linear_to_db(rms(&output.left)),
        linear_to_db(rms(&output.right))
    );
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        -120.0
    } else {
        20.0 * linear.log10()
    }
}
