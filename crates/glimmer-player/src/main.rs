//! Glimmer Player - windowed gesture particle player
//!
//! Usage:
//!   glimmer-player [--config <file.toml>] [--seed N] [--text TEXT] [--count N] [--fullscreen]

use anyhow::Result;
use clap::Parser;
use glimmer_player::ConfigArgs;

#[derive(Parser)]
#[command(name = "glimmer-player")]
#[command(about = "Glimmer player - particles that morph between a heart and a name")]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.config.load()?;

    println!("Controls:");
    println!("  Mouse       - Move the hand");
    println!("  Left button - Pinch (trigger the burst)");
    println!("  Escape      - Exit");
    println!("  F11         - Toggle fullscreen");

    glimmer_player::run(&config, args.fullscreen)
}
