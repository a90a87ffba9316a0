//! Glimmer CLI - Command-line interface for the Glimmer particle engine

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use commands::{play, shape, simulate};
use env_logger::Env;
use glimmer_player::ConfigArgs;
use glimmer_shapes::MorphTarget;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "glimmer")]
#[command(about = "Gesture-driven heart and name particle cloud", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the particle window driven by the mouse
    Play {
        #[command(flatten)]
        config: ConfigArgs,

        /// Launch in fullscreen mode
        #[arg(long)]
        fullscreen: bool,
    },

    /// Run the engine headless against a scripted hand and print a JSON summary
    Simulate {
        #[command(flatten)]
        config: ConfigArgs,

        /// Number of engine ticks to run
        #[arg(long, default_value = "600")]
        ticks: u64,

        /// Simulated frame rate
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Start a pinch at this time in milliseconds (repeatable)
        #[arg(long = "pinch-at")]
        pinch_at: Vec<f64>,

        /// Run with no hand in view at all
        #[arg(long)]
        no_hand: bool,
    },

    /// Render a morph target's XY projection to a PNG image
    Shape {
        #[command(flatten)]
        config: ConfigArgs,

        /// Which target to draw
        #[arg(value_enum)]
        target: ShapeKind,

        /// Output image path
        #[arg(short, long, default_value = "shape.png")]
        out: PathBuf,

        /// Image width in pixels
        #[arg(long, default_value = "1000")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "600")]
        height: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShapeKind {
    Heart,
    Name,
}

impl From<ShapeKind> for MorphTarget {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Heart => MorphTarget::Heart,
            ShapeKind::Name => MorphTarget::Name,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { config, fullscreen } => play::run(&config.load()?, fullscreen),
        Commands::Simulate {
            config,
            ticks,
            fps,
            pinch_at,
            no_hand,
        } => simulate::run(
            &config.load()?,
            simulate::SimulateArgs {
                ticks,
                fps,
                pinch_at,
                no_hand,
            },
        ),
        Commands::Shape {
            config,
            target,
            out,
            width,
            height,
        } => shape::run(
            &config.load()?,
            shape::ShapeArgs {
                target: target.into(),
                out,
                width,
                height,
            },
        ),
    }
}
