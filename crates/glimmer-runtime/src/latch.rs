//! Latest-sample latch between detector frames and render ticks

use glimmer_gesture::{FramePoll, GestureSample};

/// Holds the most recent gesture sample so every render tick can read it,
/// even though the detector delivers frames less often than the render loop
/// runs. A sample older than `stale_after_ms` reads as "no hand".
#[derive(Debug, Clone)]
pub struct GestureLatch {
    sample: Option<GestureSample>,
    delivered_at_ms: f64,
    stale_after_ms: f64,
}

impl GestureLatch {
    pub fn new(stale_after_ms: f64) -> Self {
        Self {
            sample: None,
            delivered_at_ms: 0.0,
            stale_after_ms,
        }
    }

    /// Record the outcome of polling a source at `now_ms`
    pub fn update(&mut self, poll: FramePoll, now_ms: f64) {
        if let Some(delivered) = poll.delivered() {
            self.sample = delivered;
            self.delivered_at_ms = now_ms;
        }
    }

    /// The sample to feed the engine at `now_ms`
    pub fn current(&self, now_ms: f64) -> Option<GestureSample> {
        let sample = self.sample?;
        if now_ms - self.delivered_at_ms > self.stale_after_ms {
            return None;
        }
        Some(sample)
    }

    pub fn clear(&mut self) {
        self.sample = None;
    }
}
