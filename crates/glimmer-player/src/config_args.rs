//! Command-line config loading shared by the player and the CLI

use anyhow::{Context, Result};
use clap::Args;
use glimmer_core::GlimmerConfig;
use std::path::PathBuf;

/// Config file plus the handful of values worth overriding from the shell
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Path to a TOML config file (defaults are used when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fixed sampling seed for reproducible shapes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Text for the name shape
    #[arg(long)]
    pub text: Option<String>,

    /// Number of particles
    #[arg(long)]
    pub count: Option<usize>,
}

impl ConfigArgs {
    /// Load the config file (if any), apply overrides and validate
    pub fn load(&self) -> Result<GlimmerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                log::info!("loading config from {}", path.display());
                GlimmerConfig::load_from_file(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?
            }
            None => {
                log::info!("using built-in config");
                GlimmerConfig::default()
            }
        };

        if let Some(seed) = self.seed {
            config.shapes.seed = Some(seed);
        }
        if let Some(text) = &self.text {
            config.shapes.text = text.clone();
        }
        if let Some(count) = self.count {
            config.particles.count = count;
        }

        config.validate().context("Invalid config")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_over_defaults() {
        let args = ConfigArgs {
            seed: Some(3),
            text: Some("HI".into()),
            count: Some(10),
            ..ConfigArgs::default()
        };
        let config = args.load().unwrap();
        assert_eq!(config.shapes.seed, Some(3));
        assert_eq!(config.shapes.text, "HI");
        assert_eq!(config.particles.count, 10);
    }

    #[test]
    fn zero_count_is_rejected() {
        let args = ConfigArgs {
            count: Some(0),
            ..ConfigArgs::default()
        };
        assert!(args.load().is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let args = ConfigArgs {
            config: Some(PathBuf::from("/nonexistent/glimmer.toml")),
            ..ConfigArgs::default()
        };
        let err = args.load().unwrap_err();
        assert!(format!("{err:#}").contains("glimmer.toml"));
    }
}
