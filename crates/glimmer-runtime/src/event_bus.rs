//! Queue of engine notifications between ticks

use crate::event::EngineEvent;

/// Collects engine events during a tick for the shell to pick up afterwards.
///
/// The engine can end one explosion and start the next on the same tick, so
/// several gesture changes may be waiting at once; they stay in order.
#[derive(Debug, Default)]
pub struct EventBus {
    pending: Vec<EngineEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: EngineEvent) {
        self.pending.push(event);
    }

    /// Record a gesture flag change at simulation time `at_ms`
    pub fn gesture_changed(&mut self, active: bool, at_ms: f64) {
        self.push(EngineEvent::GestureActiveChanged { active, at_ms });
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Take every pending event and keep only where the gesture flag ended
    /// up. `None` when nothing changed since the last drain.
    pub fn drain_latest_active(&mut self) -> Option<bool> {
        self.pending
            .drain(..)
            .map(|event| match event {
                EngineEvent::GestureActiveChanged { active, .. } => active,
            })
            .last()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_keeps_order_and_empties() {
        let mut bus = EventBus::new();
        bus.gesture_changed(true, 10.0);
        bus.gesture_changed(false, 1510.0);
        assert_eq!(bus.len(), 2);

        let events = bus.drain();
        assert_eq!(
            events,
            vec![
                EngineEvent::GestureActiveChanged { active: true, at_ms: 10.0 },
                EngineEvent::GestureActiveChanged { active: false, at_ms: 1510.0 },
            ]
        );
        assert!(bus.is_empty());
    }

    #[test]
    fn latest_active_is_last_change() {
        let mut bus = EventBus::new();
        assert_eq!(bus.drain_latest_active(), None);

        bus.gesture_changed(false, 1500.0);
        bus.gesture_changed(true, 1500.0);
        assert_eq!(bus.drain_latest_active(), Some(true));
        assert!(bus.is_empty());
        assert_eq!(bus.drain_latest_active(), None);
    }
}
