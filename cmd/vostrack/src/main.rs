//! vostrack CLI - inspect and validate the pipeline configuration.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{
    CheckpointCommand, FrameNumberCommand, GetCommand, InitCommand, OutputsCommand,
    SchemaCommand, ShowCommand, SplitsCommand, TrackingCommand, ValidateCommand,
};

/// vostrack CLI - inspect and validate the pipeline configuration.
///
/// The configuration names the model checkpoints, the FlowNet2 install,
/// worker/GPU counts and the FBMS, DAVIS16, DAVIS17 and YouTube-VOS dataset
/// roots used by the tracking and evaluation scripts.
///
/// The file is looked up as --config, then ./config.yaml, then
/// ~/.vostrack/config.yaml.
#[derive(Parser)]
#[command(name = "vostrack")]
#[command(about = "Pipeline configuration tool")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ./config.yaml, then ~/.vostrack/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the configuration template
    Init(InitCommand),
    /// Validate the configuration and report every issue
    Validate(ValidateCommand),
    /// Print the parsed configuration
    Show(ShowCommand),
    /// Print one value by dotted key (e.g. model.joint.step)
    Get(GetCommand),
    /// List the allowed splits of each dataset
    Splits(SplitsCommand),
    /// List per-split output directories
    Outputs(OutputsCommand),
    /// Resolve a model checkpoint
    Checkpoint(CheckpointCommand),
    /// Print the effective tracking parameters
    Tracking(TrackingCommand),
    /// Extract frame numbers from frame file names
    #[command(name = "frame-number")]
    FrameNumber(FrameNumberCommand),
    /// Print the JSON Schema of the configuration
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Init(cmd) => cmd.run(cli),
        Commands::Validate(cmd) => cmd.run(cli),
        Commands::Show(cmd) => cmd.run(cli),
        Commands::Get(cmd) => cmd.run(cli),
        Commands::Splits(cmd) => cmd.run(cli),
        Commands::Outputs(cmd) => cmd.run(cli),
        Commands::Checkpoint(cmd) => cmd.run(cli),
        Commands::Tracking(cmd) => cmd.run(cli),
        Commands::FrameNumber(cmd) => cmd.run(cli),
        Commands::Schema(cmd) => cmd.run(cli),
    }
}
