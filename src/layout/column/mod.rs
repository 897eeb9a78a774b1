//! Board columns.
//!
//! A column is a vertical list with an optional header above it and an optional footer below
//! it. The chrome belongs to the column value, so reordering columns moves all three together.

use dragboard_config::ColumnWidth;
use glam::DVec2;

use super::list::DragList;
use super::types::ColumnId;
use crate::animation::{Animation, Clock};
use crate::utils::Rectangle;

#[derive(Debug)]
pub(crate) struct MoveAnimation {
    pub anim: Animation,
    pub from: f64,
}

/// A header or footer view attached to a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chrome {
    /// Host-side key of the view, used for reverse lookups.
    pub key: u64,
    pub height: f64,
}

/// Per-column settings supplied when the column is added.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnProperties {
    /// Overrides the board default column width.
    pub width: Option<ColumnWidth>,
    pub header: Option<Chrome>,
    pub footer: Option<Chrome>,
    /// Whether the column has a handle from which the whole column can be dragged.
    pub has_drag_handle: bool,
}

#[derive(Debug)]
pub struct Column<L> {
    pub(crate) id: ColumnId,
    pub(crate) list: L,
    pub(crate) properties: ColumnProperties,
    pub(crate) drag_enabled: bool,
    /// Animation of the render offset while columns swap places.
    pub(crate) move_animation: Option<MoveAnimation>,
}

/// Cached horizontal geometry of a column, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnData {
    /// Left edge of the column itself, excluding its margin.
    pub x: f64,
    pub width: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

impl<L: DragList> Column<L> {
    pub(crate) fn new(id: ColumnId, list: L, properties: ColumnProperties) -> Self {
        Self {
            id,
            list,
            properties,
            drag_enabled: true,
            move_animation: None,
        }
    }

    pub fn id(&self) -> ColumnId {
        self.id
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn properties(&self) -> &ColumnProperties {
        &self.properties
    }

    pub fn is_drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    pub fn header_height(&self) -> f64 {
        self.properties.header.map_or(0., |header| header.height)
    }

    pub fn footer_height(&self) -> f64 {
        self.properties.footer.map_or(0., |footer| footer.height)
    }

    pub fn list_height(&self, view_height: f64) -> f64 {
        f64::max(0., view_height - self.header_height() - self.footer_height())
    }

    /// Horizontal offset to draw the column at, relative to its laid out position.
    pub fn render_offset(&self) -> f64 {
        self.move_animation
            .as_ref()
            .map_or(0., |move_| move_.from * move_.anim.value())
    }

    pub(crate) fn animate_move_from(
        &mut self,
        from_x_offset: f64,
        clock: Clock,
        config: dragboard_config::Animation,
    ) {
        let current_offset = self.render_offset();

        let anim = Animation::new(clock, 1., 0., config);
        self.move_animation = Some(MoveAnimation {
            anim,
            from: from_x_offset + current_offset,
        });
    }

    pub(crate) fn advance_animations(&mut self) {
        if let Some(move_) = &self.move_animation {
            if move_.anim.is_done() {
                self.move_animation = None;
            }
        }
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.move_animation.is_some()
    }
}

impl ColumnData {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.
    }

    /// Full column bounds in content coordinates.
    pub fn rect(&self, view_height: f64) -> Rectangle {
        Rectangle::new(DVec2::new(self.x, 0.), DVec2::new(self.width, view_height))
    }
}
