//! The particle engine: owns the buffers and runs one tick per frame

use crate::cloud::CloudTransform;
use crate::config::EngineConfig;
use crate::explosion::{burst, integrate_explosion, pulse_size};
use crate::morph::apply_morph;
use crate::observer::GestureObserver;
use crate::particle::ParticleField;
use crate::snapshot::ParticleSnapshot;
use crate::state::{EngineMode, EngineState, Transition};
use glimmer_core::{GlimmerConfig, GlimmerError, Result, Vec3};
use glimmer_gesture::GestureSample;
use glimmer_shapes::{shape_rng, MorphTargets};
use rand::rngs::StdRng;

/// Owns the live particle buffers, both shape buffers and the state machine.
///
/// Driven by [`ParticleEngine::step`] once per rendered frame with the
/// current simulation time and the latest gesture sample. Nothing in a step
/// can fail; every tick yields a snapshot with exactly `len()` particles.
pub struct ParticleEngine {
    config: EngineConfig,
    targets: MorphTargets,
    field: ParticleField,
    state: EngineState,
    rng: StdRng,
    /// Simulation time of the first step; the cloud rotation counts from here
    epoch_ms: Option<f64>,
    transitions: Vec<Transition>,
}

impl ParticleEngine {
    /// Sample both shapes and spawn the particles from one config.
    ///
    /// With `shapes.seed` set, the whole engine (shapes, spawn positions and
    /// explosion randomness) is reproducible.
    pub fn new(config: &GlimmerConfig) -> Result<Self> {
        let engine_config = EngineConfig::from_config(config)?;
        let mut rng = shape_rng(config.shapes.seed);
        let targets = MorphTargets::sample(&mut rng, engine_config.particles.count, &config.shapes);
        Self::with_targets(engine_config, targets, rng)
    }

    /// Build from pre-sampled targets; their length must match the
    /// configured particle count.
    pub fn with_targets(config: EngineConfig, targets: MorphTargets, mut rng: StdRng) -> Result<Self> {
        if targets.len() != config.particles.count {
            return Err(GlimmerError::invalid(
                "particles.count",
                format!(
                    "is {} but the morph targets hold {} points",
                    config.particles.count,
                    targets.len()
                ),
            ));
        }

        let field = ParticleField::spawn(&mut rng, &config.particles);
        log::info!(
            "particle engine ready: {} particles, morphing toward {}",
            field.len(),
            EngineState::default().morph_target
        );

        Ok(Self {
            config,
            targets,
            field,
            state: EngineState::default(),
            rng,
            epoch_ms: None,
            transitions: Vec::new(),
        })
    }

    /// Advance the simulation to `now_ms`.
    ///
    /// `sample` is the latest gesture, `None` when no hand is present. A
    /// sample with non-finite values is treated as absent, except that it
    /// neither makes nor releases a pinch. `observer` hears
    /// about every mode transition taken during this tick.
    pub fn step(
        &mut self,
        now_ms: f64,
        sample: Option<&GestureSample>,
        observer: &mut dyn GestureObserver,
    ) -> ParticleSnapshot<'_> {
        let epoch = *self.epoch_ms.get_or_insert(now_ms);
        let rejected = sample.is_some_and(|s| !is_usable(s));
        let sample = sample.filter(|s| is_usable(s));

        let mut next = self.state.next(now_ms, sample, &self.config);
        if rejected {
            // A malformed frame says nothing about the fingers
            next.state.pinch_held = self.state.pinch_held;
        }
        self.state = next.state;
        self.transitions.clear();
        self.transitions.extend_from_slice(&next.transitions);

        for transition in &self.transitions {
            match transition {
                Transition::ExplosionEnded => {
                    log::debug!("explosion settled at {now_ms:.0}ms");
                    self.field.settle();
                }
                Transition::ExplosionStarted => {
                    log::debug!("pinch detected at {now_ms:.0}ms, exploding");
                }
            }
            observer.gesture_active_changed(transition.gesture_active(), now_ms);
        }

        if let Some(b) = next.burst {
            burst(&mut self.field, b.palm, b.intensity, &mut self.rng);
        }
        if next.flipped {
            log::debug!("morph target flipped to {}", self.state.morph_target);
        }

        match self.state.mode {
            EngineMode::Morphing => {
                let offset = sample.map_or(Vec3::ZERO, |s| s.palm_position);
                let targets = self.targets.get(self.state.morph_target).points();
                apply_morph(&mut self.field, targets, offset, now_ms, &self.config.morph);
            }
            EngineMode::Exploding { .. } => {
                integrate_explosion(&mut self.field, self.config.explosion.damping);
                self.field.sizes.fill(pulse_size(now_ms, &self.config.explosion));
            }
        }

        self.snapshot_at(CloudTransform::at(now_ms - epoch, &self.config.cloud))
    }

    /// Current buffers without advancing, with the cloud at rest
    pub fn snapshot(&self) -> ParticleSnapshot<'_> {
        self.snapshot_at(CloudTransform::default())
    }

    fn snapshot_at(&self, cloud: CloudTransform) -> ParticleSnapshot<'_> {
        ParticleSnapshot {
            positions: &self.field.positions,
            sizes: &self.field.sizes,
            colors: self.field.colors(),
            cloud,
            mode: self.state.mode,
            morph_target: self.state.morph_target,
            morph_progress: self.state.morph_progress,
            transitions: &self.transitions,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn targets(&self) -> &MorphTargets {
        &self.targets
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.field.velocities
    }

    /// Number of particles, fixed for the engine's lifetime
    pub fn len(&self) -> usize {
        self.field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }
}

fn is_usable(sample: &GestureSample) -> bool {
    sample.palm_position.is_finite() && sample.velocity.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::CallbackObserver;
    use glimmer_shapes::MorphTarget;

    fn small_config(count: usize) -> GlimmerConfig {
        let mut config = GlimmerConfig::default();
        config.particles.count = count;
        config.shapes.seed = Some(42);
        config
    }

    #[test]
    fn new_builds_matching_buffers() {
        let engine = ParticleEngine::new(&small_config(200)).unwrap();
        assert_eq!(engine.len(), 200);
        assert_eq!(engine.targets().len(), 200);
        assert_eq!(engine.state().mode, EngineMode::Morphing);
    }

    #[test]
    fn with_targets_rejects_mismatched_count() {
        let config = small_config(10);
        let mut rng = shape_rng(Some(1));
        let targets = MorphTargets::sample(&mut rng, 5, &config.shapes);
        let result = ParticleEngine::with_targets(EngineConfig::from(&config), targets, rng);
        assert!(matches!(result, Err(GlimmerError::InvalidConfig { .. })));
    }

    #[test]
    fn step_returns_full_snapshot() {
        let mut engine = ParticleEngine::new(&small_config(64)).unwrap();
        let snap = engine.step(0.0, None, &mut ());
        assert_eq!(snap.len(), 64);
        assert_eq!(snap.sizes.len(), 64);
        assert_eq!(snap.colors.len(), 64);
        assert!(snap.transitions.is_empty());
    }

    #[test]
    fn pinch_notifies_start_then_end() {
        let mut engine = ParticleEngine::new(&small_config(32)).unwrap();
        let pinch = GestureSample::pinch_at(Vec3::ZERO, 0.0);
        let mut seen = Vec::new();
        {
            let mut observer = CallbackObserver(|active| seen.push(active));
            let mut now = 0.0;
            while now <= 2000.0 {
                engine.step(now, Some(&pinch), &mut observer);
                now += 16.0;
            }
        }
        assert_eq!(seen, vec![true, false]);
    }

    #[test]
    fn explosion_pulses_sizes_uniformly() {
        let mut engine = ParticleEngine::new(&small_config(16)).unwrap();
        let pinch = GestureSample::pinch_at(Vec3::ZERO, 0.1);
        let snap = engine.step(100.0, Some(&pinch), &mut ());
        assert!(snap.gesture_active());
        let first = snap.sizes[0];
        assert!(snap.sizes.iter().all(|s| *s == first));
    }

    #[test]
    fn explosion_end_clears_velocities() {
        let mut engine = ParticleEngine::new(&small_config(16)).unwrap();
        let pinch = GestureSample::pinch_at(Vec3::ZERO, 0.2);
        engine.step(0.0, Some(&pinch), &mut ());
        assert!(engine.velocities().iter().any(|v| *v != Vec3::ZERO));
        engine.step(1500.0, None, &mut ());
        assert!(engine.velocities().iter().all(|v| *v == Vec3::ZERO));
        assert_eq!(engine.state().mode, EngineMode::Morphing);
    }

    #[test]
    fn non_finite_sample_is_ignored() {
        let mut engine = ParticleEngine::new(&small_config(16)).unwrap();
        let broken = GestureSample::pinch_at(Vec3::new(f32::NAN, 0.0, 0.0), 0.0);
        let snap = engine.step(0.0, Some(&broken), &mut ());
        assert_eq!(snap.mode, EngineMode::Morphing);
        assert!(snap.positions.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn non_finite_sample_does_not_release_held_pinch() {
        let mut engine = ParticleEngine::new(&small_config(16)).unwrap();
        let pinch = GestureSample::pinch_at(Vec3::ZERO, 0.0);
        let mut broken = pinch;
        broken.velocity = f32::NAN;

        let mut seen = Vec::new();
        {
            let mut observer = CallbackObserver(|active| seen.push(active));
            engine.step(0.0, Some(&pinch), &mut observer);
            engine.step(1500.0, Some(&pinch), &mut observer);
            engine.step(1516.0, Some(&broken), &mut observer);
            assert!(engine.state().pinch_held);
            engine.step(1532.0, Some(&pinch), &mut observer);
        }
        assert_eq!(seen, vec![true, false]);
        assert_eq!(engine.state().mode, EngineMode::Morphing);
    }

    #[test]
    fn palm_offset_moves_the_shape() {
        let config = small_config(100);
        let mut still = ParticleEngine::new(&config).unwrap();
        let mut moved = ParticleEngine::new(&config).unwrap();
        let hand = GestureSample::open_at(Vec3::new(3.0, 0.0, 0.0));
        for k in 0..300 {
            let now = k as f64 * 16.0;
            still.step(now, None, &mut ());
            moved.step(now, Some(&hand), &mut ());
        }
        let mean = |e: &ParticleEngine| {
            let s = e.snapshot();
            s.positions.iter().map(|p| p.x).sum::<f32>() / s.len() as f32
        };
        assert!((mean(&moved) - mean(&still) - 3.0).abs() < 0.1);
        assert_eq!(still.state().morph_target, MorphTarget::Heart);
    }
}
