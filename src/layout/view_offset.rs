//! Horizontal scrolling and column snapping.

use dragboard_config::SnapAnchor;
use ordered_float::OrderedFloat;

use super::gesture::ViewGesture;
use super::list::DragList;
use super::types::{BoardError, BoardEvent, SavedState};
use super::Board;
use crate::animation::Animation;

/// Scroll offset that is static, animating toward a target, or following a pointer gesture.
#[derive(Debug)]
pub enum ViewOffset {
    Static(f64),
    Animation(Animation),
    Gesture(ViewGesture),
}

impl ViewOffset {
    /// Returns the current value, which may lie outside the scrollable range.
    pub fn current(&self) -> f64 {
        match self {
            ViewOffset::Static(offset) => *offset,
            ViewOffset::Animation(anim) => anim.value(),
            ViewOffset::Gesture(gesture) => gesture.current_view_offset,
        }
    }

    pub fn is_gesture(&self) -> bool {
        matches!(self, ViewOffset::Gesture(_))
    }

    pub fn is_animation_ongoing(&self) -> bool {
        matches!(self, ViewOffset::Animation(_))
    }

    /// Cancels the ongoing gesture, keeping the current value.
    pub fn cancel_gesture(&mut self) {
        if let ViewOffset::Gesture(gesture) = self {
            *self = ViewOffset::Static(gesture.current_view_offset);
        }
    }

    /// Stops any animation or gesture, keeping the current value.
    pub fn stop_anim_and_gesture(&mut self) {
        *self = ViewOffset::Static(self.current());
    }
}

impl<L: DragList> Board<L> {
    /// Current horizontal scroll offset.
    pub fn scroll_x(&self) -> f64 {
        self.view_offset.current().clamp(0., self.max_scroll_x())
    }

    pub fn max_scroll_x(&self) -> f64 {
        f64::max(0., self.content_width - self.view_size.x)
    }

    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    pub fn is_view_animating(&self) -> bool {
        self.view_offset.is_animation_ongoing()
    }

    /// Scroll offset that puts a column at the snap anchor, before clamping to bounds.
    fn snap_x(&self, index: usize) -> f64 {
        let data = &self.data[index];
        let view_width = self.view_size.x;

        match self.options.snap_anchor {
            SnapAnchor::Left => data.x - data.margin_left,
            SnapAnchor::Center => {
                let free = view_width - data.width - data.margin_left - data.margin_right;
                data.x - data.margin_left - free / 2.
            }
            SnapAnchor::Right => data.right() + data.margin_right - view_width,
        }
    }

    /// Column whose snap position is nearest to the current scroll offset.
    ///
    /// Ties go to the earlier column.
    pub fn closest_snap_column(&self) -> usize {
        let scroll = self.scroll_x();
        (0..self.data.len())
            .min_by_key(|&idx| OrderedFloat((self.snap_x(idx) - scroll).abs()))
            .unwrap_or(0)
    }

    /// Scrolls so that `index` sits at the snap anchor and makes it the current column.
    pub fn scroll_to_column(&mut self, index: usize, animate: bool) -> Result<(), BoardError> {
        if index >= self.columns.len() {
            return Err(BoardError::ColumnOutOfRange {
                index,
                count: self.columns.len(),
            });
        }

        self.snap_to_column(index, animate);
        Ok(())
    }

    pub(super) fn snap_to_column(&mut self, index: usize, animate: bool) {
        let target = self.snap_x(index).clamp(0., self.max_scroll_x());

        if animate {
            self.animate_view_offset(target);
        } else {
            self.view_offset = ViewOffset::Static(target);
        }

        self.set_current_column(index);
    }

    /// Snaps to the column closest to the current offset.
    pub fn snap_to_closest_column(&mut self, animate: bool) {
        if self.columns.is_empty() {
            return;
        }

        let index = self.closest_snap_column();
        self.snap_to_column(index, animate);
    }

    fn animate_view_offset(&mut self, target: f64) {
        let current = self.scroll_x();

        // Starting a new animation replaces the one in flight.
        self.view_offset = if (current - target).abs() < 0.5 {
            ViewOffset::Static(target)
        } else {
            let config = self.options.animations.view_scroll();
            ViewOffset::Animation(Animation::new(self.clock.clone(), current, target, config))
        };
    }

    /// Scrolls by `delta`, clamped to bounds, stopping any animation.
    pub(super) fn scroll_by(&mut self, delta: f64) {
        let offset = (self.scroll_x() + delta).clamp(0., self.max_scroll_x());
        self.view_offset = ViewOffset::Static(offset);
    }

    pub(super) fn set_current_column(&mut self, index: usize) {
        if index == self.current_column {
            return;
        }

        let old = self.current_column;
        self.current_column = index;
        debug!(old, new = index, "focused column changed");
        self.emit(BoardEvent::FocusedColumnChanged { old, new: index });
    }

    // =========================================================================
    // Saved state
    // =========================================================================

    pub fn save_state(&self) -> SavedState {
        let current_column = if self.snap_on_scroll_effective() {
            self.current_column
        } else {
            self.closest_snap_column()
        };
        SavedState { current_column }
    }

    /// Restores a saved state once its column has been laid out.
    pub fn restore_state(&mut self, state: SavedState) {
        self.pending_restore = Some(state);
        self.apply_pending_restore();
    }

    pub(super) fn apply_pending_restore(&mut self) {
        let Some(state) = self.pending_restore else {
            return;
        };

        if self.view_size.x <= 0. || state.current_column >= self.columns.len() {
            return;
        }

        debug!(column = state.current_column, "restoring saved board state");
        self.pending_restore = None;
        self.snap_to_column(state.current_column, false);
    }
}
