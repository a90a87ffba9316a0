//! Gesture-active notifications for the presentation layer

use glimmer_runtime::EventBus;

/// Receives the "gesture active" flag on every mode transition, and only
/// then.
pub trait GestureObserver {
    fn gesture_active_changed(&mut self, active: bool, at_ms: f64);
}

/// Ignore all notifications
impl GestureObserver for () {
    fn gesture_active_changed(&mut self, _active: bool, _at_ms: f64) {}
}

/// Queue notifications as `EngineEvent`s for the shell to drain
impl GestureObserver for EventBus {
    fn gesture_active_changed(&mut self, active: bool, at_ms: f64) {
        self.gesture_changed(active, at_ms);
    }
}

/// Adapts a closure taking the flag into an observer
pub struct CallbackObserver<F>(pub F);

impl<F: FnMut(bool)> GestureObserver for CallbackObserver<F> {
    fn gesture_active_changed(&mut self, active: bool, _at_ms: f64) {
        (self.0)(active)
    }
}
