use glimmer_core::{GestureConfig, GlimmerConfig, Vec3};
use glimmer_engine::{EngineMode, ParticleEngine, Transition};
use glimmer_gesture::{GestureSample, GestureSource, ReplayScript};
use glimmer_runtime::{EngineEvent, EventBus, GestureLatch, SimClock};
use glimmer_shapes::MorphTarget;
use proptest::prelude::*;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn engine(count: usize) -> ParticleEngine {
    let mut config = GlimmerConfig::default();
    config.particles.count = count;
    config.shapes.seed = Some(2024);
    ParticleEngine::new(&config).unwrap()
}

fn pinch_at(palm: Vec3) -> GestureSample {
    GestureSample::pinch_at(palm, 0.05)
}

#[test]
fn particle_count_never_changes() {
    let mut engine = engine(300);
    let mut clock = SimClock::new();
    let pinch = pinch_at(Vec3::ZERO);
    for k in 0..600 {
        let sample = match k % 200 {
            0..=9 => Some(pinch),
            10..=99 => None,
            _ => Some(GestureSample::open_at(Vec3::new(1.0, -1.0, 0.0))),
        };
        let snap = engine.step(clock.advance(FRAME_MS), sample.as_ref(), &mut ());
        assert_eq!(snap.positions.len(), 300);
        assert_eq!(snap.sizes.len(), 300);
        assert_eq!(snap.colors.len(), 300);
    }
}

#[test]
fn full_cycle_flips_target_exactly_once() {
    let mut engine = engine(50);
    let ticks = (1.0 / engine.config().morph.rate).round() as usize;
    let mut clock = SimClock::new();
    let mut flips = 0;
    let mut last_target = engine.state().morph_target;
    let mut last_progress = engine.state().morph_progress;

    for _ in 0..ticks {
        let snap = engine.step(clock.advance(FRAME_MS), None, &mut ());
        if snap.morph_target != last_target {
            flips += 1;
            assert_eq!(snap.morph_progress, 0.0);
        } else {
            assert!(snap.morph_progress > last_progress);
        }
        last_target = snap.morph_target;
        last_progress = snap.morph_progress;
    }

    assert_eq!(flips, 1);
    assert_eq!(engine.state().morph_target, MorphTarget::Name);
}

#[test]
fn sustained_pinch_explodes_once() {
    let mut engine = engine(50);
    let mut bus = EventBus::new();
    let mut clock = SimClock::new();
    let pinch = pinch_at(Vec3::ZERO);

    for _ in 0..10 {
        engine.step(clock.advance(FRAME_MS), Some(&pinch), &mut bus);
    }

    let events = bus.drain();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        EngineEvent::GestureActiveChanged { active: true, .. }
    ));
}

#[test]
fn explosion_returns_at_first_tick_past_duration() {
    let mut engine = engine(50);
    let mut clock = SimClock::starting_at(1000.0);
    let start = clock.now_ms();
    engine.step(start, Some(&pinch_at(Vec3::ZERO)), &mut ());
    assert_eq!(
        engine.state().mode,
        EngineMode::Exploding {
            started_at_ms: start
        }
    );

    let duration = engine.config().explosion.duration_ms;
    loop {
        let now = clock.advance(7.0);
        let snap = engine.step(now, None, &mut ());
        if now < start + duration {
            assert!(snap.mode.is_exploding(), "ended early at {now}");
        } else {
            assert_eq!(snap.mode, EngineMode::Morphing);
            assert_eq!(snap.transitions, &[Transition::ExplosionEnded]);
            break;
        }
    }
}

#[test]
fn explosion_leaves_morph_progress_untouched() {
    let mut engine = engine(50);
    let mut clock = SimClock::new();
    for _ in 0..100 {
        engine.step(clock.advance(FRAME_MS), None, &mut ());
    }
    let before = engine.state().morph_progress;

    engine.step(clock.advance(FRAME_MS), Some(&pinch_at(Vec3::ZERO)), &mut ());
    while engine.state().mode.is_exploding() {
        engine.step(clock.advance(FRAME_MS), None, &mut ());
    }

    // The expiry tick resumes morphing and advances once
    let rate = engine.config().morph.rate;
    assert!((engine.state().morph_progress - (before + rate)).abs() < 1e-9);
}

#[test]
fn explosion_speed_decays_by_damping_each_tick() {
    let mut engine = engine(40);
    let damping = engine.config().explosion.damping;
    let mut clock = SimClock::new();
    engine.step(clock.advance(FRAME_MS), Some(&pinch_at(Vec3::ZERO)), &mut ());
    let initial: Vec<f32> = engine.velocities().iter().map(|v| v.length()).collect();

    // 5ms ticks keep 150 steps inside the explosion window
    for k in 1..=150 {
        engine.step(clock.advance(5.0), None, &mut ());
        if k == 10 || k == 150 {
            for (v, v0) in engine.velocities().iter().zip(&initial) {
                let expected = v0 * damping.powi(k);
                assert!((v.length() - expected).abs() <= expected * 1e-3 + 1e-9);
            }
        }
    }
    assert!(engine.state().mode.is_exploding());
    for (v, v0) in engine.velocities().iter().zip(&initial) {
        assert!(v.length() < v0 * 0.01);
    }
}

#[test]
fn absent_hand_matches_stationary_open_hand() {
    let mut absent = engine(120);
    let mut stationary = engine(120);
    let hand = GestureSample::open_at(Vec3::ZERO);
    let mut clock = SimClock::new();

    for _ in 0..700 {
        let now = clock.advance(FRAME_MS);
        let a = absent.step(now, None, &mut ()).positions.to_vec();
        let b = stationary.step(now, Some(&hand), &mut ());
        assert_eq!(a.as_slice(), b.positions);
    }
    assert_eq!(absent.state(), stationary.state());
}

#[test]
fn particle_on_palm_gets_finite_velocity() {
    let mut engine = engine(30);
    let mut clock = SimClock::new();
    let palm = engine.step(clock.advance(FRAME_MS), None, &mut ()).positions[0];

    let snap = engine.step(clock.advance(FRAME_MS), Some(&pinch_at(palm)), &mut ());
    assert!(snap.positions.iter().all(|p| p.is_finite()));
    assert!(engine.velocities().iter().all(|v| v.is_finite()));
}

#[test]
fn replayed_detector_drives_one_explosion() {
    let config = GlimmerConfig::default();
    let mut source = ReplayScript::new(1000.0 / 30.0)
        .hold(0.5, 0.5, 400.0)
        .pinch(0.5, 0.5, 300.0)
        .hold(0.5, 0.5, 400.0)
        .gap(1500.0)
        .build(GestureConfig::default());
    let mut latch = GestureLatch::new(config.gesture.stale_after_ms);
    let mut engine = engine(60);
    let mut bus = EventBus::new();
    let mut clock = SimClock::new();

    while clock.now_ms() < 3000.0 {
        let now = clock.advance(FRAME_MS);
        latch.update(source.poll(now), now);
        let sample = latch.current(now);
        engine.step(now, sample.as_ref(), &mut bus);
    }

    let flags: Vec<bool> = bus
        .drain()
        .into_iter()
        .map(|EngineEvent::GestureActiveChanged { active, .. }| active)
        .collect();
    assert_eq!(flags, vec![true, false]);
    assert!(source.is_finished());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn arbitrary_gestures_keep_snapshot_valid(
        frames in prop::collection::vec(
            (any::<bool>(), any::<bool>(), -8.0f32..8.0, -8.0f32..8.0, 0.0f32..0.5, 1.0f64..40.0),
            1..200,
        )
    ) {
        let mut engine = engine(40);
        let mut bus = EventBus::new();
        let mut clock = SimClock::new();

        for (present, pinching, x, y, velocity, dt) in frames {
            let sample = present.then(|| {
                let palm = Vec3::new(x, y, 0.0);
                if pinching {
                    GestureSample::pinch_at(palm, velocity)
                } else {
                    GestureSample::open_at(palm)
                }
            });
            let snap = engine.step(clock.advance(dt), sample.as_ref(), &mut bus);
            prop_assert_eq!(snap.len(), 40);
            prop_assert!(snap.positions.iter().all(|p| p.is_finite()));
            prop_assert!(snap.sizes.iter().all(|s| s.is_finite()));
            prop_assert!((0.0..1.0).contains(&snap.morph_progress));
        }

        // Notifications strictly alternate, starting with "active"
        let flags: Vec<bool> = bus
            .drain()
            .into_iter()
            .map(|EngineEvent::GestureActiveChanged { active, .. }| active)
            .collect();
        for (i, active) in flags.iter().enumerate() {
            prop_assert_eq!(*active, i % 2 == 0);
        }
    }
}
