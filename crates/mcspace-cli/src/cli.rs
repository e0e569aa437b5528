use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The mcspace developers",
    version,
    about = "mcspace - Simulation containers for Monte Carlo molecular simulation: inspect geometries, sample positions and run hard-sphere NPT simulations.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a configuration file and print the container and loop setup.
    Info(InfoArgs),
    /// Draw uniform random positions from the configured container.
    Sample(SampleArgs),
    /// Run the hard-sphere Monte Carlo simulation.
    Run(RunArgs),
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the simulation configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,
}

/// Arguments for the `sample` subcommand.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Path to the simulation configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Number of positions to draw.
    #[arg(short = 'n', long, required = true, value_name = "INT")]
    pub count: usize,

    /// Number of histogram bins per axis.
    #[arg(short, long, default_value_t = 10, value_name = "INT")]
    pub bins: usize,

    /// Write the sampled positions as x,y,z rows to a CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Override the random seed from the config file.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the simulation configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    // --- Sampling Overrides ---
    /// Override the random seed.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Override the number of independent replicas.
    #[arg(short, long, value_name = "INT")]
    pub replicas: Option<usize>,

    // --- Loop Overrides ---
    /// Override the number of macro steps.
    #[arg(long = "macro", value_name = "INT")]
    pub macro_steps: Option<usize>,

    /// Override the number of micro steps per macro step.
    #[arg(long = "micro", value_name = "INT")]
    pub micro_steps: Option<usize>,

    // --- Move Overrides ---
    /// Override the external pressure in kT/Å³, enabling volume moves.
    #[arg(short, long, value_name = "FLOAT")]
    pub pressure: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S moves.displacement=1.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
