//! Gesture source backends

use crate::sample::GestureSample;

/// Result of polling a source once per render tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FramePoll {
    /// No new detector frame since the last poll; keep the previous sample
    NoFrame,
    /// A frame arrived and no hand was in view
    NoHand,
    /// A frame arrived with a hand
    Hand(GestureSample),
}

impl FramePoll {
    /// The delivered sample, if a frame arrived: `Some(None)` means "no hand"
    pub fn delivered(self) -> Option<Option<GestureSample>> {
        match self {
            FramePoll::NoFrame => None,
            FramePoll::NoHand => Some(None),
            FramePoll::Hand(sample) => Some(Some(sample)),
        }
    }
}

/// A producer of gesture frames running at its own cadence.
///
/// Sources are polled by the render loop with the current simulation time;
/// detector cadence is usually slower than the render rate, so most polls
/// return `FramePoll::NoFrame`.
pub trait GestureSource {
    fn poll(&mut self, now_ms: f64) -> FramePoll;

    /// Human-readable name for this backend
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimmer_core::Vec3;

    #[test]
    fn delivered_distinguishes_gap_from_silence() {
        assert_eq!(FramePoll::NoFrame.delivered(), None);
        assert_eq!(FramePoll::NoHand.delivered(), Some(None));
        let s = GestureSample::open_at(Vec3::ZERO);
        assert_eq!(FramePoll::Hand(s).delivered(), Some(Some(s)));
    }
}
