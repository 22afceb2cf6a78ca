#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Up,
    Down,
}

impl Swipe {
    pub fn direction(self) -> i32 {
        match self {
            Swipe::Up => -1,
            Swipe::Down => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub up: f32,
    pub down: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { up: 0.4, down: 0.6 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    last_y: f32,
    steps: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSummary {
    pub steps: u32,
}

#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    thresholds: Thresholds,
    session: Option<DragSession>,
}

impl DragTracker {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn press(&mut self, y: f32) {
        self.session = Some(DragSession { last_y: y, steps: 0 });
    }

    /// At most one swipe per move event.
    pub fn drag_to(&mut self, y: f32, item_height: f32) -> Option<Swipe> {
        let session = self.session.as_mut()?;
        let delta = y - session.last_y;

        let swipe = if delta < 0.0 && delta.abs() > item_height * self.thresholds.up {
            Swipe::Up
        } else if delta > 0.0 && delta.abs() > item_height * self.thresholds.down {
            Swipe::Down
        } else {
            return None;
        };

        session.last_y = y;
        session.steps += 1;
        Some(swipe)
    }

    pub fn release(&mut self) -> Option<DragSummary> {
        self.session
            .take()
            .map(|session| DragSummary { steps: session.steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upward_swipe_uses_lower_threshold() {
        let mut tracker = DragTracker::new(Thresholds::default());
        tracker.press(100.0);

        assert_eq!(tracker.drag_to(70.0, 80.0), None);
        assert_eq!(tracker.drag_to(60.0, 80.0), Some(Swipe::Up));
    }

    #[test]
    fn downward_swipe_needs_more_travel() {
        let mut tracker = DragTracker::new(Thresholds::default());
        tracker.press(100.0);

        assert_eq!(tracker.drag_to(140.0, 80.0), None);
        assert_eq!(tracker.drag_to(149.0, 80.0), Some(Swipe::Down));
    }

    #[test]
    fn one_step_per_move_event_then_origin_resets() {
        let mut tracker = DragTracker::new(Thresholds::default());
        tracker.press(0.0);

        // Far past several thresholds, still a single step.
        assert_eq!(tracker.drag_to(-400.0, 80.0), Some(Swipe::Up));
        // Origin moved to -400, so a small follow-up does nothing.
        assert_eq!(tracker.drag_to(-410.0, 80.0), None);
        assert_eq!(tracker.drag_to(-440.0, 80.0), Some(Swipe::Up));

        assert_eq!(tracker.release(), Some(DragSummary { steps: 2 }));
    }

    #[test]
    fn moves_without_session_are_ignored() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.drag_to(-400.0, 80.0), None);
        assert_eq!(tracker.release(), None);
        assert!(!tracker.is_active());
    }

    #[test]
    fn direction_sign_convention() {
        assert_eq!(Swipe::Up.direction(), -1);
        assert_eq!(Swipe::Down.direction(), 1);
    }
}
