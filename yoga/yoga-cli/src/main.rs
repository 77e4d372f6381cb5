//! Yoga Coach command line.
//!
//! Runs the single-frame assessment pipeline from the terminal.
//!
//! # Commands
//!
//! - `yoga-coach assess --image pose.jpg --landmarks pose.json` - Assess one frame
//! - `yoga-coach align --landmarks pose.json` - Explain the alignment rules for a skeleton
//! - `yoga-coach rules` - List the alignment rule table
//! - `yoga-coach init-config yoga.toml` - Write a default configuration
//!
//! Landmark estimation runs out of process; `--landmarks` takes the
//! estimator's dump for the frame (`null` or `[]` when nobody was found).
//!
//! Results go to stdout as JSON. Logs go to stderr and honor `RUST_LOG`.

mod align;
mod assess;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Yoga Coach
///
/// Pose label, confidence, and alignment tips for a single frame.
#[derive(Parser)]
#[command(name = "yoga-coach")]
#[command(about = "Single-frame yoga pose assessment", long_about = None)]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a frame: classify the pose and report alignment tips
    Assess {
        /// The frame to assess (PNG or JPEG)
        #[arg(long)]
        image: PathBuf,

        /// Landmark dump for the frame
        #[arg(long)]
        landmarks: PathBuf,

        /// Configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Classifier checkpoint, overriding the configured path
        #[arg(long)]
        checkpoint: Option<PathBuf>,

        /// Run with freshly initialized weights instead of a checkpoint
        #[arg(long, conflicts_with = "checkpoint")]
        untrained: bool,
    },

    /// Show how each alignment rule judged a skeleton
    Align {
        /// Landmark dump to evaluate
        #[arg(long)]
        landmarks: PathBuf,

        /// Minimum joint visibility for a rule to be evaluated
        #[arg(long, default_value_t = 0.0)]
        min_visibility: f32,
    },

    /// List the alignment rules
    Rules {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration to a file
    InitConfig {
        /// Where to write the configuration
        #[arg(name = "PATH")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Assess {
            image,
            landmarks,
            config,
            checkpoint,
            untrained,
        } => assess::run(&assess::AssessArgs {
            image,
            landmarks,
            config,
            checkpoint,
            untrained,
        }),
        Commands::Align {
            landmarks,
            min_visibility,
        } => align::run(&landmarks, min_visibility),
        Commands::Rules { json } => align::rules(json),
        Commands::InitConfig { path, force } => config::init(&path, force),
    }
}
