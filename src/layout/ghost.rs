//! Floating stand-in for the element being dragged.
//!
//! While a drag is active the real row or column is hidden and the ghost is drawn in its place,
//! following the pointer. When the drag ends the ghost settles onto the destination and hides
//! itself, releasing its target.

use dragboard_config::DragEntrance;
use glam::DVec2;

use super::list::ItemId;
use super::types::ColumnId;
use crate::animation::{Animation, Clock};
use crate::utils::Rectangle;

bitflags::bitflags! {
    /// Axes along which the ghost follows the pointer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DragAxes: u8 {
        const HORIZONTAL = 1;
        const VERTICAL = 1 << 1;
    }
}

/// The element a ghost substitutes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostTarget {
    Item(ItemId),
    Column(ColumnId),
}

#[derive(Debug)]
pub struct DragGhost {
    clock: Clock,
    target: Option<GhostTarget>,
    axes: DragAxes,
    size: DVec2,
    /// Center of the real element when the drag started, in the ghost frame.
    real_start: DVec2,
    /// Followed center in the ghost frame, before the offset.
    pos: DVec2,
    /// Constant added to the pointer so the grab point stays under it.
    touch_delta: DVec2,
    /// Translation from the ghost frame to board content coordinates.
    offset: DVec2,
    entrance: Option<EntranceAnimation>,
    drop: Option<DropAnimation>,
}

/// Extra displacement that decays to zero after a snap-to-touch start.
#[derive(Debug)]
struct EntranceAnimation {
    delta: DVec2,
    anim: Animation,
}

/// Settling onto the destination, in content coordinates.
#[derive(Debug)]
struct DropAnimation {
    from: DVec2,
    to: DVec2,
    anim: Animation,
}

impl DragGhost {
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            target: None,
            axes: DragAxes::all(),
            size: DVec2::ZERO,
            real_start: DVec2::ZERO,
            pos: DVec2::ZERO,
            touch_delta: DVec2::ZERO,
            offset: DVec2::ZERO,
            entrance: None,
            drop: None,
        }
    }

    pub fn axes(&self) -> DragAxes {
        self.axes
    }

    pub fn set_axes(&mut self, axes: DragAxes) {
        self.axes = axes;
    }

    pub fn target(&self) -> Option<GhostTarget> {
        self.target
    }

    pub fn is_visible(&self) -> bool {
        self.target.is_some()
    }

    /// Whether the ghost is following the pointer, as opposed to settling or hidden.
    pub fn is_dragging(&self) -> bool {
        self.target.is_some() && self.drop.is_none()
    }

    /// Shows the ghost over `real`, grabbed at `touch`.
    ///
    /// `real` and `touch` are in the ghost frame; `offset` maps that frame to content
    /// coordinates.
    pub fn start(
        &mut self,
        target: GhostTarget,
        real: Rectangle,
        touch: DVec2,
        offset: DVec2,
        entrance: DragEntrance,
        config: dragboard_config::Animation,
    ) {
        self.target = Some(target);
        self.size = real.size;
        self.real_start = real.center();
        self.offset = offset;
        self.drop = None;

        match entrance {
            DragEntrance::SnapToTouch => {
                self.touch_delta = DVec2::ZERO;
                self.entrance = Some(EntranceAnimation {
                    delta: self.real_start - touch,
                    anim: Animation::new(self.clock.clone(), 1., 0., config),
                });
            }
            DragEntrance::SnapToOrigin => {
                self.touch_delta = self.real_start - touch;
                self.entrance = None;
            }
        }

        self.set_position(touch);
    }

    /// Follows the pointer at `touch`, in the ghost frame.
    pub fn set_position(&mut self, touch: DVec2) {
        let pos = touch + self.touch_delta;
        self.pos = DVec2::new(
            if self.axes.contains(DragAxes::HORIZONTAL) {
                pos.x
            } else {
                self.real_start.x
            },
            if self.axes.contains(DragAxes::VERTICAL) {
                pos.y
            } else {
                self.real_start.y
            },
        );
    }

    pub fn set_offset(&mut self, offset: DVec2) {
        self.offset = offset;
    }

    /// Current center in board content coordinates.
    pub fn center(&self) -> DVec2 {
        if let Some(drop) = &self.drop {
            return drop.from.lerp(drop.to, drop.anim.value());
        }

        let mut center = self.pos + self.offset;
        if let Some(entrance) = &self.entrance {
            let delta = entrance.delta * entrance.anim.value();
            if self.axes.contains(DragAxes::HORIZONTAL) {
                center.x += delta.x;
            }
            if self.axes.contains(DragAxes::VERTICAL) {
                center.y += delta.y;
            }
        }
        center
    }

    /// Current bounds in board content coordinates, if visible.
    pub fn rect(&self) -> Option<Rectangle> {
        self.target?;
        Some(Rectangle::from_size(self.size).centered_at(self.center()))
    }

    /// Starts settling onto `dest`, given in content coordinates.
    pub fn end(&mut self, dest: Rectangle, config: dragboard_config::Animation) {
        if self.target.is_none() {
            return;
        }

        let from = self.center();
        self.entrance = None;
        self.drop = Some(DropAnimation {
            from,
            to: dest.center(),
            anim: Animation::new(self.clock.clone(), 0., 1., config),
        });
    }

    pub fn hide(&mut self) {
        self.target = None;
        self.entrance = None;
        self.drop = None;
    }

    pub fn advance_animations(&mut self) {
        if self.entrance.as_ref().is_some_and(|e| e.anim.is_done()) {
            self.entrance = None;
        }

        if self.drop.as_ref().is_some_and(|d| d.anim.is_done()) {
            trace!(ghost = ?self.target, "ghost settled");
            self.hide();
        }
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.entrance.is_some() || self.drop.is_some()
    }
}
