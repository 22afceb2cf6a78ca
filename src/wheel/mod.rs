pub mod center_line;
pub mod drag;
pub mod scroll_lock;
pub mod selection;
pub mod spring;
pub mod transform;

pub use center_line::center_line_visible;
pub use drag::{DragSummary, DragTracker, Thresholds};
pub use scroll_lock::ScrollLock;
pub use selection::{Selection, Transition};
pub use spring::{AnimatedPlacement, Spring};
pub use transform::{item_transform, Falloff, Placement};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, text::Text};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WheelError {
    #[error("wheel needs at least one item")]
    Empty,
}

/// `(item, is_active, distance)`; `distance` is the linear, unwrapped
/// `|index - active|`, unlike the circular distance used for placement.
pub type RenderItem<T> = Box<dyn Fn(&T, bool, usize) -> Text<'static> + Send + Sync>;
pub type OnSelect<T> = Box<dyn FnMut(&T) + Send>;

#[derive(Debug, Clone, PartialEq)]
pub struct WheelOptions {
    pub initial_index: usize,
    pub hide_center_line_for_last_item: bool,
    pub item_height: f32,
    pub thresholds: Thresholds,
    pub falloff: Falloff,
    pub spring: Spring,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            initial_index: 0,
            hide_center_line_for_last_item: false,
            item_height: 3.0,
            thresholds: Thresholds::default(),
            falloff: Falloff::default(),
            spring: Spring::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelResponse {
    Ignored,
    Consumed,
    Clicked { index: usize, was_active: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSlot {
    pub index: usize,
    pub area: Rect,
}

pub struct Wheel<T> {
    items: Vec<T>,
    render_item: RenderItem<T>,
    on_select: Option<OnSelect<T>>,
    options: WheelOptions,
    selection: Selection,
    drag: DragTracker,
    animations: Vec<AnimatedPlacement>,
    scroll_lock: ScrollLock,
    bounds: Option<Rect>,
    slots: Vec<ItemSlot>,
}

impl<T> Wheel<T> {
    pub fn new(
        items: Vec<T>,
        render_item: RenderItem<T>,
        on_select: Option<OnSelect<T>>,
        options: WheelOptions,
    ) -> Result<Self, WheelError> {
        if items.is_empty() {
            return Err(WheelError::Empty);
        }

        let selection = Selection::new(items.len(), options.initial_index);
        let drag = DragTracker::new(options.thresholds);
        let animations = (0..items.len())
            .map(|index| {
                AnimatedPlacement::new(item_transform(
                    index,
                    selection.active(),
                    options.item_height,
                    items.len(),
                    &options.falloff,
                ))
            })
            .collect();

        let mut wheel = Self {
            items,
            render_item,
            on_select,
            options,
            selection,
            drag,
            animations,
            scroll_lock: ScrollLock::acquire(),
            bounds: None,
            slots: Vec::new(),
        };
        wheel.notify();
        Ok(wheel)
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    #[cfg(test)]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[cfg(test)]
    pub fn options(&self) -> &WheelOptions {
        &self.options
    }

    pub fn item_height(&self) -> f32 {
        self.options.item_height
    }

    pub fn active_index(&self) -> usize {
        self.selection.active()
    }

    pub fn active_item(&self) -> &T {
        &self.items[self.selection.active()]
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn center_line_visible(&self) -> bool {
        center_line_visible(
            self.drag.is_active(),
            self.options.hide_center_line_for_last_item,
            self.selection.is_last(),
        )
    }

    pub fn placement(&self, index: usize) -> Placement {
        item_transform(
            index,
            self.selection.active(),
            self.options.item_height,
            self.items.len(),
            &self.options.falloff,
        )
    }

    pub fn displayed_placement(&self, index: usize) -> Placement {
        self.animations
            .get(index)
            .map(AnimatedPlacement::current)
            .unwrap_or_else(|| self.placement(index))
    }

    pub fn render_item(&self, index: usize) -> Text<'static> {
        let active = self.selection.active();
        let distance = index.abs_diff(active);
        (self.render_item)(&self.items[index], index == active, distance)
    }

    pub fn advance(&mut self, direction: i32) -> Transition {
        let transition = self.selection.advance(direction);
        self.apply(transition, false);
        transition
    }

    /// Direct selection, e.g. a click. Always notifies.
    pub fn select(&mut self, index: usize) -> Transition {
        let transition = self.selection.select(index);
        self.apply(transition, true);
        transition
    }

    pub fn sync_external(&mut self, index: usize) -> Transition {
        let transition = self.selection.sync_external(index);
        self.apply(transition, false);
        transition
    }

    pub fn press(&mut self, y: f32) {
        self.drag.press(y);
    }

    pub fn drag_to(&mut self, y: f32) -> Option<Transition> {
        let swipe = self.drag.drag_to(y, self.options.item_height)?;
        Some(self.advance(swipe.direction()))
    }

    pub fn release(&mut self) -> Option<DragSummary> {
        self.drag.release()
    }

    pub fn leave(&mut self) {
        self.drag.release();
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> WheelResponse {
        let Some(bounds) = self.bounds else {
            return WheelResponse::Ignored;
        };
        let inside = scroll_lock::contains(bounds, mouse.column, mouse.row);
        let y = f32::from(mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.press(y);
                WheelResponse::Consumed
            }
            MouseEventKind::Drag(MouseButton::Left) if self.is_dragging() => {
                if inside {
                    self.drag_to(y);
                } else {
                    self.leave();
                }
                WheelResponse::Consumed
            }
            MouseEventKind::Moved if self.is_dragging() && !inside => {
                self.leave();
                WheelResponse::Consumed
            }
            MouseEventKind::Up(MouseButton::Left) if self.is_dragging() => {
                let tapped = self.release().map(|s| s.steps == 0).unwrap_or(false);
                if inside && tapped {
                    if let Some(index) = self.item_at(mouse.column, mouse.row) {
                        let was_active = index == self.selection.active();
                        self.select(index);
                        return WheelResponse::Clicked { index, was_active };
                    }
                }
                WheelResponse::Consumed
            }
            _ => WheelResponse::Ignored,
        }
    }

    /// Advance the springs by `dt` seconds. Returns true while still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        let spring = self.options.spring;
        let mut moving = false;
        for index in 0..self.animations.len() {
            let target = self.placement(index);
            if !self.animations[index].step(&spring, target, dt) {
                moving = true;
            }
        }
        moving
    }

    pub fn settle(&mut self) {
        for index in 0..self.animations.len() {
            let target = self.placement(index);
            self.animations[index].snap(target);
        }
    }

    pub fn set_layout(&mut self, bounds: Rect, slots: Vec<ItemSlot>) {
        self.bounds = Some(bounds);
        self.slots = slots;
        self.scroll_lock.set_bounds(bounds);
    }

    pub fn hide(&mut self) {
        self.bounds = None;
        self.slots.clear();
        self.scroll_lock.clear_bounds();
        self.drag.release();
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn item_at(&self, column: u16, row: u16) -> Option<usize> {
        self.slots
            .iter()
            .rev()
            .find(|slot| scroll_lock::contains(slot.area, column, row))
            .map(|slot| slot.index)
    }

    fn apply(&mut self, transition: Transition, always_notify: bool) {
        if transition.changed() {
            log::debug!("wheel selection {} -> {}", transition.from, transition.to);
            self.rebase_animations();
        }
        if transition.changed() || always_notify {
            self.notify();
        }
    }

    // Items crossing the circular seam would otherwise animate across the
    // whole wheel; shift them by one full turn so they slide in from the
    // near edge.
    fn rebase_animations(&mut self) {
        let span = self.items.len() as f32 * self.options.item_height;
        for index in 0..self.animations.len() {
            let target = self.placement(index).offset;
            let gap = target - self.animations[index].current().offset;
            if gap > span / 2.0 {
                self.animations[index].shift(span);
            } else if gap < -span / 2.0 {
                self.animations[index].shift(-span);
            }
        }
    }

    fn notify(&mut self) {
        let active = self.selection.active();
        if let Some(on_select) = self.on_select.as_mut() {
            on_select(&self.items[active]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn days() -> Vec<&'static str> {
        vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
    }

    fn plain_render() -> RenderItem<&'static str> {
        Box::new(|day: &&'static str, _: bool, _: usize| Text::raw(day.to_string()))
    }

    fn recording_wheel(options: WheelOptions) -> (Wheel<&'static str>, Arc<Mutex<Vec<&'static str>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let wheel = Wheel::new(
            days(),
            plain_render(),
            Some(Box::new(move |day: &&'static str| sink.lock().push(*day))),
            options,
        )
        .expect("non-empty");
        (wheel, seen)
    }

    fn options_80() -> WheelOptions {
        WheelOptions {
            item_height: 80.0,
            ..WheelOptions::default()
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn empty_items_are_rejected() {
        let result = Wheel::<&str>::new(Vec::new(), plain_render(), None, WheelOptions::default());
        assert_eq!(result.err(), Some(WheelError::Empty));
    }

    #[test]
    fn mount_notifies_starting_item() {
        let (wheel, seen) = recording_wheel(WheelOptions {
            initial_index: 2,
            ..options_80()
        });
        assert_eq!(wheel.active_index(), 2);
        assert_eq!(*seen.lock(), vec!["Wed"]);
    }

    #[test]
    fn initial_index_is_normalized() {
        let (wheel, _) = recording_wheel(WheelOptions {
            initial_index: 10,
            ..options_80()
        });
        assert_eq!(wheel.active_index(), 3);
    }

    #[test]
    fn short_upward_drag_advances_one() {
        let (mut wheel, seen) = recording_wheel(options_80());
        wheel.press(200.0);
        let transition = wheel.drag_to(160.0);

        assert_eq!(transition, Some(Transition { from: 0, to: 1 }));
        assert_eq!(wheel.active_index(), 1);
        assert_eq!(*seen.lock(), vec!["Mon", "Tue"]);
    }

    #[test]
    fn short_downward_drag_below_threshold_does_nothing() {
        let (mut wheel, seen) = recording_wheel(options_80());
        wheel.press(200.0);
        assert_eq!(wheel.drag_to(240.0), None);
        assert_eq!(wheel.active_index(), 0);
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn downward_drag_wraps_to_last() {
        let (mut wheel, _) = recording_wheel(options_80());
        wheel.press(200.0);
        wheel.drag_to(250.0);
        assert_eq!(wheel.active_index(), 6);
    }

    #[test]
    fn select_last_hides_center_line_when_configured() {
        let (mut wheel, seen) = recording_wheel(WheelOptions {
            hide_center_line_for_last_item: true,
            ..options_80()
        });
        assert!(wheel.center_line_visible());

        wheel.select(6);
        assert_eq!(wheel.active_index(), 6);
        assert!(!wheel.center_line_visible());
        assert_eq!(*seen.lock(), vec!["Mon", "Sun"]);

        wheel.press(10.0);
        assert!(wheel.center_line_visible());
        wheel.release();
        assert!(!wheel.center_line_visible());
    }

    #[test]
    fn reselecting_active_item_still_notifies() {
        let (mut wheel, seen) = recording_wheel(options_80());
        wheel.select(0);
        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn sync_external_notifies_only_on_change() {
        let (mut wheel, seen) = recording_wheel(options_80());
        wheel.sync_external(0);
        assert_eq!(seen.lock().len(), 1);

        wheel.sync_external(4);
        assert_eq!(wheel.active_index(), 4);
        assert_eq!(*seen.lock(), vec!["Mon", "Fri"]);
    }

    #[test]
    fn render_distance_is_linear() {
        let wheel = Wheel::new(
            days(),
            Box::new(|_: &&'static str, active: bool, distance: usize| {
                Text::raw(format!("{active}:{distance}"))
            }),
            None,
            WheelOptions::default(),
        )
        .expect("non-empty");

        // Circularly adjacent, linearly six apart.
        assert_eq!(wheel.render_item(6), Text::raw("false:6"));
        assert_eq!(wheel.render_item(0), Text::raw("true:0"));
    }

    #[test]
    fn seam_crossing_items_slide_in_from_near_edge() {
        let (mut wheel, _) = recording_wheel(WheelOptions {
            item_height: 1.0,
            ..WheelOptions::default()
        });
        wheel.sync_external(6);

        // Index 3 jumps from the bottom slot to the top one in target space;
        // on screen it re-enters one slot above the top instead of
        // travelling across the wheel.
        assert_eq!(wheel.placement(3).offset, -3.0);
        assert_eq!(wheel.displayed_placement(3).offset, -4.0);

        wheel.settle();
        assert_eq!(wheel.displayed_placement(3), wheel.placement(3));
        assert!(!wheel.tick(1.0 / 60.0));
    }

    #[test]
    fn mouse_tap_on_item_selects_it() {
        let (mut wheel, _) = recording_wheel(WheelOptions::default());
        wheel.set_layout(
            Rect::new(0, 0, 20, 21),
            vec![
                ItemSlot { index: 1, area: Rect::new(0, 12, 20, 3) },
                ItemSlot { index: 0, area: Rect::new(0, 9, 20, 3) },
            ],
        );

        assert_eq!(
            wheel.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 13)),
            WheelResponse::Consumed
        );
        assert_eq!(
            wheel.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 5, 13)),
            WheelResponse::Clicked { index: 1, was_active: false }
        );
        assert_eq!(wheel.active_index(), 1);
    }

    #[test]
    fn mouse_drag_swipes_and_does_not_click() {
        let (mut wheel, _) = recording_wheel(WheelOptions::default());
        wheel.set_layout(Rect::new(0, 0, 20, 21), Vec::new());

        wheel.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 10));
        wheel.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 8));
        assert_eq!(wheel.active_index(), 1);

        assert_eq!(
            wheel.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 5, 8)),
            WheelResponse::Consumed
        );
        assert_eq!(wheel.active_index(), 1);
    }

    #[test]
    fn dragging_out_of_bounds_ends_session() {
        let (mut wheel, _) = recording_wheel(WheelOptions::default());
        wheel.set_layout(Rect::new(0, 0, 20, 10), Vec::new());

        wheel.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5));
        assert!(wheel.is_dragging());
        wheel.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 25, 5));
        assert!(!wheel.is_dragging());
    }

    #[test]
    fn hidden_wheel_ignores_mouse() {
        let (mut wheel, _) = recording_wheel(WheelOptions::default());
        wheel.set_layout(Rect::new(0, 0, 20, 10), Vec::new());
        wheel.hide();
        assert_eq!(
            wheel.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 5)),
            WheelResponse::Ignored
        );
    }
}
