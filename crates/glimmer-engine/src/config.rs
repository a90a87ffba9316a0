//! Engine-facing slice of the configuration

use glimmer_core::{
    CloudConfig, ExplosionConfig, GlimmerConfig, MorphConfig, ParticlesConfig, Result,
};

/// The configuration sections the particle engine reads every tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub particles: ParticlesConfig,
    pub morph: MorphConfig,
    pub explosion: ExplosionConfig,
    pub cloud: CloudConfig,
}

impl EngineConfig {
    /// Extract and validate the engine sections of a full config
    pub fn from_config(config: &GlimmerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from(config))
    }

    /// Same config with a different particle count
    pub fn with_count(mut self, count: usize) -> Self {
        self.particles.count = count;
        self
    }
}

impl From<&GlimmerConfig> for EngineConfig {
    fn from(config: &GlimmerConfig) -> Self {
        Self {
            particles: config.particles.clone(),
            morph: config.morph.clone(),
            explosion: config.explosion.clone(),
            cloud: config.cloud.clone(),
        }
    }
}
