//! Pointer scrolling of the board outside of drags.

use std::time::Duration;

use super::list::DragList;
use super::view_offset::ViewOffset;
use super::Board;
use crate::animation::Animation;
use crate::input::swipe_tracker::SwipeTracker;
use crate::input::{PointerAction, PointerEvent};

/// State of a pointer dragging the view around.
#[derive(Debug)]
pub struct ViewGesture {
    /// The view offset as modified by the gesture.
    pub current_view_offset: f64,
    /// View offset when the pointer went down.
    pub start_view_offset: f64,
    /// Current column when the pointer went down.
    pub start_column: usize,
    pub last_pointer_x: f64,
    pub tracker: SwipeTracker,
}

impl ViewGesture {
    pub fn new(view_offset: f64, column: usize, pointer_x: f64, timestamp: Duration) -> Self {
        let mut tracker = SwipeTracker::new();
        tracker.push(0., timestamp);

        Self {
            current_view_offset: view_offset,
            start_view_offset: view_offset,
            start_column: column,
            last_pointer_x: pointer_x,
            tracker,
        }
    }
}

impl<L: DragList> Board<L> {
    pub fn is_scroll_gesture_active(&self) -> bool {
        self.view_offset.is_gesture()
    }

    pub(super) fn handle_scroll_pointer(&mut self, event: PointerEvent) -> bool {
        match event.action {
            PointerAction::Down => {
                self.view_offset_gesture_begin(event);
                false
            }
            PointerAction::Move => self.view_offset_gesture_update(event),
            PointerAction::Up | PointerAction::Cancel => self.view_offset_gesture_end(event),
        }
    }

    fn view_offset_gesture_begin(&mut self, event: PointerEvent) {
        // Touching the view catches any scroll in flight.
        let gesture = ViewGesture::new(
            self.scroll_x(),
            self.current_column,
            event.pos.x,
            event.time,
        );
        self.view_offset = ViewOffset::Gesture(gesture);
    }

    fn view_offset_gesture_update(&mut self, event: PointerEvent) -> bool {
        let max_scroll_x = self.max_scroll_x();
        let ViewOffset::Gesture(gesture) = &mut self.view_offset else {
            return false;
        };

        let delta = event.pos.x - gesture.last_pointer_x;
        gesture.last_pointer_x = event.pos.x;
        gesture.tracker.push(delta, event.time);

        gesture.current_view_offset =
            (gesture.start_view_offset - gesture.tracker.pos()).clamp(0., max_scroll_x);
        true
    }

    fn view_offset_gesture_end(&mut self, event: PointerEvent) -> bool {
        let ViewOffset::Gesture(gesture) = &mut self.view_offset else {
            return false;
        };

        // Take into account any idle time between the last event and the release.
        gesture.tracker.push(0., event.time);

        let velocity = gesture.tracker.velocity();
        let current_view_offset = gesture.current_view_offset;
        let start_view_offset = gesture.start_view_offset;
        let start_column = gesture.start_column;

        self.view_offset = ViewOffset::Static(current_view_offset);

        if self.columns.is_empty() {
            return true;
        }

        let is_fling = event.action == PointerAction::Up
            && velocity.abs() >= self.options.gestures.fling_min_velocity.0;

        if self.snap_on_scroll_effective() {
            let target = if is_fling {
                self.fling_target_column(start_view_offset, start_column, velocity)
            } else {
                self.closest_snap_column()
            };
            trace!(velocity, target, "scroll gesture ended");
            self.snap_to_column(target, true);
        } else if is_fling {
            // The view moves against the pointer.
            let anim = Animation::decelerate(
                self.clock.clone(),
                current_view_offset,
                -velocity,
                self.options.gestures.fling_deceleration.0,
            );
            trace!(velocity, to = anim.to(), "scroll gesture flung");
            self.view_offset = ViewOffset::Animation(anim);
        }

        true
    }

    /// Column to snap to after a fling with pointer `velocity`.
    ///
    /// A positive velocity moves the pointer right, revealing earlier columns. A fling always
    /// leaves the column it started on, even when it was too short to change the closest one.
    fn fling_target_column(
        &self,
        start_view_offset: f64,
        start_column: usize,
        velocity: f64,
    ) -> usize {
        let last = self.columns.len() - 1;
        let closest = self.closest_snap_column();

        if start_view_offset == self.scroll_x() {
            return start_column.min(last);
        }

        let wrong_direction = (closest > start_column && velocity > 0.)
            || (closest < start_column && velocity < 0.);

        if closest == start_column || wrong_direction {
            if velocity < 0. {
                (closest + 1).min(last)
            } else {
                closest.saturating_sub(1)
            }
        } else {
            closest
        }
    }
}
