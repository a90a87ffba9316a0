//! Simulation clocks

use std::time::Instant;

/// Explicit simulation time in milliseconds.
///
/// The engine never reads the system clock; whoever drives it advances this
/// clock, so tests can simulate any elapsed time without sleeping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    now_ms: f64,
    ticks: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at an arbitrary timestamp
    pub fn starting_at(now_ms: f64) -> Self {
        Self { now_ms, ticks: 0 }
    }

    /// Advance by `dt_ms` and count one tick. Returns the new time.
    pub fn advance(&mut self, dt_ms: f64) -> f64 {
        self.now_ms += dt_ms.max(0.0);
        self.ticks += 1;
        self.now_ms
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Ticks advanced so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Drives a `SimClock` from the wall clock, once per rendered frame.
///
/// Every frame advances simulation time by the full wall-clock delta, long
/// stalls included, so timed phases like the explosion last the same real
/// time at any frame rate.
pub struct FrameClock {
    sim: SimClock,
    /// Time since last frame in milliseconds
    pub delta_ms: f64,
    last_instant: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            sim: SimClock::new(),
            delta_ms: 0.0,
            last_instant: None,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock. Call once per frame. Returns the simulation time.
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    /// Advance to the wall-clock instant `now`; the first call only anchors
    /// the clock
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        self.delta_ms = match self.last_instant {
            Some(last) => now.saturating_duration_since(last).as_secs_f64() * 1000.0,
            None => 0.0,
        };
        self.last_instant = Some(now);
        self.sim.advance(self.delta_ms)
    }

    pub fn now_ms(&self) -> f64 {
        self.sim.now_ms()
    }

    pub fn sim(&self) -> &SimClock {
        &self.sim
    }
}
