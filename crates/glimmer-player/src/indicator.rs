//! Window title gesture indicator

const IDLE_TITLE: &str = "Glimmer - Touch thumb & index to trigger heart burst";
const ACTIVE_TITLE: &str = "Glimmer - LOVE GESTURE DETECTED";

/// Tracks the "gesture active" flag from engine events and turns it into
/// the window title
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureIndicator {
    active: bool,
}

impl GestureIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the flag left by the last tick's events, if any; returns true
    /// if the title must change
    pub fn apply(&mut self, latest: Option<bool>) -> bool {
        let before = self.active;
        if let Some(active) = latest {
            self.active = active;
        }
        self.active != before
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn title(&self) -> &'static str {
        if self.active {
            ACTIVE_TITLE
        } else {
            IDLE_TITLE
        }
    }
}
