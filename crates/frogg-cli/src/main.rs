//! Frogg CLI - run WAV files through the stereo chorus/flanger.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "frogg")]
#[command(author, version, about = "Frogg stereo chorus/flanger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the chorus/flanger
    Process(commands::process::ProcessArgs),

    /// List the engine parameters
    Params(commands::params::ParamsArgs),

    /// Generate stereo test signals
    Generate(commands::generate::GenerateArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Generate(args) => commands::generate::run(args),
    }
}
