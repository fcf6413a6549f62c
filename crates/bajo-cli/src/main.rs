//! Bajo CLI - bass-intensity extraction from live or recorded audio.

mod commands;
mod preset;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bajo")]
#[command(author, version, about = "Bass intensity extraction CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract bass intensity from a live capture device
    Realtime(commands::realtime::RealtimeArgs),

    /// Extract bass intensity from a WAV file
    Analyze(commands::analyze::AnalyzeArgs),

    /// Run a synthetic test tone through the pipeline
    Simulate(commands::simulate::SimulateArgs),

    /// List and inspect audio input devices
    Devices(commands::devices::DevicesArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Realtime(args) => commands::realtime::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Devices(args) => commands::devices::run(args),
    }
}
