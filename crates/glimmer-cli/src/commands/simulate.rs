//! Headless simulation command
//!
//! Runs the engine against a replayed hand at a fixed frame rate and prints
//! a JSON summary of what happened.

use anyhow::{bail, Result};
use glimmer_core::GlimmerConfig;
use glimmer_engine::{EngineMode, ParticleEngine};
use glimmer_gesture::{GestureSource, ReplayScript, POINTER_CADENCE_MS};
use glimmer_runtime::{EngineEvent, EventBus, GestureLatch, SimClock};
use glimmer_shapes::MorphTarget;
use serde::Serialize;

/// How long each scripted pinch is held
const PINCH_HOLD_MS: f64 = 200.0;

pub struct SimulateArgs {
    pub ticks: u64,
    pub fps: f64,
    pub pinch_at: Vec<f64>,
    pub no_hand: bool,
}

#[derive(Debug, Serialize)]
pub struct SimulationSummary {
    pub ticks: u64,
    pub duration_ms: f64,
    pub particles: usize,
    pub glyph_candidates: usize,
    pub morph_flips: u32,
    pub events: Vec<EngineEvent>,
    pub final_mode: EngineMode,
    pub final_target: MorphTarget,
    pub final_progress: f64,
    pub mean_speed: f32,
}

pub fn run(config: &GlimmerConfig, args: SimulateArgs) -> Result<()> {
    let summary = simulate(config, &args)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub fn simulate(config: &GlimmerConfig, args: &SimulateArgs) -> Result<SimulationSummary> {
    if !(args.fps > 0.0 && args.fps.is_finite()) {
        bail!("--fps must be positive and finite");
    }
    let frame_ms = 1000.0 / args.fps;
    let duration_ms = args.ticks as f64 * frame_ms;

    let mut engine = ParticleEngine::new(config)?;
    let mut source = build_script(&args.pinch_at, duration_ms, args.no_hand)
        .build(config.gesture.clone());
    let mut latch = GestureLatch::new(config.gesture.stale_after_ms);
    let mut bus = EventBus::new();
    let mut clock = SimClock::new();

    log::info!(
        "simulating {} ticks at {} fps with {} pinches",
        args.ticks,
        args.fps,
        args.pinch_at.len()
    );

    let mut morph_flips = 0;
    let mut events = Vec::new();
    let mut last_target = engine.state().morph_target;

    for _ in 0..args.ticks {
        let now = clock.advance(frame_ms);
        latch.update(source.poll(now), now);
        let sample = latch.current(now);
        let snapshot = engine.step(now, sample.as_ref(), &mut bus);
        if snapshot.morph_target != last_target {
            morph_flips += 1;
            last_target = snapshot.morph_target;
        }
        events.extend(bus.drain());
    }

    let velocities = engine.velocities();
    let mean_speed = if velocities.is_empty() {
        0.0
    } else {
        velocities.iter().map(|v| v.length()).sum::<f32>() / velocities.len() as f32
    };
    let state = *engine.state();

    Ok(SimulationSummary {
        ticks: clock.ticks(),
        duration_ms: clock.now_ms(),
        particles: engine.len(),
        glyph_candidates: engine.targets().glyph_sampling().candidates,
        morph_flips,
        events,
        final_mode: state.mode,
        final_target: state.morph_target,
        final_progress: state.morph_progress,
        mean_speed,
    })
}

/// A hand resting at the frame center that pinches at each requested time.
/// Pinch times outside `[0, duration_ms)` are dropped.
fn build_script(pinch_at: &[f64], duration_ms: f64, no_hand: bool) -> ReplayScript {
    let script = ReplayScript::new(POINTER_CADENCE_MS);
    if no_hand {
        return script.gap(duration_ms);
    }

    let mut times: Vec<f64> = pinch_at
        .iter()
        .copied()
        .filter(|t| t.is_finite() && *t >= 0.0 && *t < duration_ms)
        .collect();
    if times.len() < pinch_at.len() {
        log::warn!(
            "dropped {} pinch times outside the {duration_ms:.0}ms run",
            pinch_at.len() - times.len()
        );
    }
    times.sort_by(f64::total_cmp);

    let mut script = script;
    for t in times {
        if t > script.end_ms() {
            let wait = t - script.end_ms();
            script = script.hold(0.5, 0.5, wait);
        }
        script = script.pinch(0.5, 0.5, PINCH_HOLD_MS);
    }
    if duration_ms > script.end_ms() {
        let rest = duration_ms - script.end_ms();
        script = script.hold(0.5, 0.5, rest);
    }
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GlimmerConfig {
        let mut config = GlimmerConfig::default();
        config.particles.count = 64;
        config.shapes.seed = Some(1);
        config
    }

    #[test]
    fn no_pinch_means_no_events() {
        let args = SimulateArgs {
            ticks: 120,
            fps: 60.0,
            pinch_at: vec![],
            no_hand: false,
        };
        let summary = simulate(&config(), &args).unwrap();
        assert_eq!(summary.ticks, 120);
        assert!(summary.events.is_empty());
        assert_eq!(summary.final_mode, EngineMode::Morphing);
        assert_eq!(summary.mean_speed, 0.0);
    }

    #[test]
    fn each_pinch_bursts_and_settles() {
        let args = SimulateArgs {
            ticks: 360,
            fps: 60.0,
            pinch_at: vec![3000.0, 500.0],
            no_hand: false,
        };
        let summary = simulate(&config(), &args).unwrap();
        let flags: Vec<bool> = summary
            .events
            .iter()
            .map(|EngineEvent::GestureActiveChanged { active, .. }| *active)
            .collect();
        assert_eq!(flags, vec![true, false, true, false]);
    }

    #[test]
    fn long_run_flips_targets() {
        let args = SimulateArgs {
            ticks: 1000,
            fps: 60.0,
            pinch_at: vec![],
            no_hand: true,
        };
        let summary = simulate(&config(), &args).unwrap();
        assert_eq!(summary.morph_flips, 2);
        assert_eq!(summary.final_target, MorphTarget::Heart);
    }

    #[test]
    fn zero_fps_is_rejected() {
        let args = SimulateArgs {
            ticks: 1,
            fps: 0.0,
            pinch_at: vec![],
            no_hand: true,
        };
        assert!(simulate(&config(), &args).is_err());
    }

    #[test]
    fn pinches_outside_the_run_are_dropped() {
        let plain = build_script(&[], 1000.0, false);
        let script = build_script(&[1.0e7, f64::INFINITY, f64::NAN, -5.0, 1000.0], 1000.0, false);
        assert_eq!(script.len(), plain.len());
        assert!((script.end_ms() - plain.end_ms()).abs() < 1e-9);
    }

    #[test]
    fn infinite_fps_is_rejected() {
        let args = SimulateArgs {
            ticks: 1,
            fps: f64::INFINITY,
            pinch_at: vec![],
            no_hand: true,
        };
        assert!(simulate(&config(), &args).is_err());
    }

    #[test]
    fn summary_serializes_events() {
        let args = SimulateArgs {
            ticks: 60,
            fps: 60.0,
            pinch_at: vec![100.0],
            no_hand: false,
        };
        let summary = simulate(&config(), &args).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["events"][0]["kind"], "gesture_active_changed");
        assert_eq!(json["final_mode"]["mode"], "exploding");
    }
}
