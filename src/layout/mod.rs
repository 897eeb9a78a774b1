//! Board layout and interaction.
//!
//! A board is a horizontally scrolling strip of columns. Every column wraps a vertical
//! [`DragList`] with optional header and footer chrome. The board owns the single drag session
//! at a time: an item drag moves one item within and across columns, a column drag reorders
//! whole columns. While a drag is active a [`DragGhost`] substitutes for the dragged element and
//! the [`AutoScroller`] scrolls the view when the pointer rests near an edge.
//!
//! All coordinates are logical pixels. View coordinates have their origin at the top-left
//! corner of the visible board area. Content coordinates have their origin at the left edge of
//! the first column margin, so a content x equals a view x plus the current scroll offset.

use std::rc::Rc;

use dragboard_config::{ColumnWidth, Config, DragEntrance, SnapAnchor};
use glam::DVec2;

use self::auto_scroll::{AutoScrollMode, AutoScroller};
use self::column::{Column, ColumnData};
use self::ghost::{DragGhost, GhostTarget};
use self::list::{DragList, ItemId};
use self::types::{BoardCallback, BoardEvent, DragSession, Orientation, SavedState};
use self::view_offset::ViewOffset;
use crate::animation::Clock;
use crate::utils::{round_logical_in_physical, Rectangle};

pub mod auto_scroll;
pub mod column;
mod drag;
pub mod ghost;
mod gesture;
pub mod list;
mod operations;
pub mod types;
mod view_offset;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Width of columns that don't set their own.
    pub column_width: ColumnWidth,
    pub column_spacing: f64,
    /// Outer margin before the first and after the last column.
    pub board_edge: f64,
    pub snap_anchor: SnapAnchor,
    pub snap_on_scroll: bool,
    pub snap_on_drag: bool,
    /// Whether the two snapping flags also apply in landscape orientation.
    pub snap_in_landscape: bool,
    pub drag_entrance: DragEntrance,
    pub column_drag_entrance: DragEntrance,
    pub row_height: f64,
    pub auto_scroll: dragboard_config::AutoScroll,
    pub animations: dragboard_config::Animations,
    pub gestures: dragboard_config::Gestures,
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        let board = &config.board;

        Self {
            column_width: board.default_column_width.resolve(),
            column_spacing: board.column_spacing.0,
            board_edge: board.board_edge.0,
            snap_anchor: board.snap_anchor,
            snap_on_scroll: board.snap_on_scroll,
            snap_on_drag: board.snap_on_drag,
            snap_in_landscape: board.snap_in_landscape,
            drag_entrance: board.drag_entrance,
            column_drag_entrance: board.column_drag_entrance,
            row_height: board.row_height.0,
            auto_scroll: config.auto_scroll,
            animations: config.animations,
            gestures: config.gestures,
        }
    }
}

pub struct Board<L: DragList> {
    /// Columns in display order.
    columns: Vec<Column<L>>,
    /// Cached layout of every column. Same length as `columns`.
    data: Vec<ColumnData>,
    /// Total width of all columns including margins.
    content_width: f64,
    /// Index of the column the board last snapped to.
    current_column: usize,
    /// Horizontal scroll offset of the view into the content.
    view_offset: ViewOffset,
    drag: Option<DragSession>,
    item_ghost: DragGhost,
    column_ghost: DragGhost,
    auto_scroller: AutoScroller,
    /// Set when the auto-scroller needs a new repeating timer.
    auto_scroll_requested: bool,
    /// Last pointer position in view coordinates.
    pointer: DVec2,
    drag_enabled: bool,
    view_size: DVec2,
    scale: f64,
    /// Saved state waiting for its column to be laid out.
    pending_restore: Option<SavedState>,
    callback: Option<Box<dyn BoardCallback>>,
    subscribers: Vec<async_channel::Sender<BoardEvent>>,
    next_column_id: u64,
    clock: Clock,
    options: Rc<Options>,
}

impl<L: DragList> Board<L> {
    pub fn new(view_size: DVec2, scale: f64, clock: Clock, options: Rc<Options>) -> Self {
        let mut auto_scroller = AutoScroller::new(&options.auto_scroll);
        auto_scroller.set_mode(AutoScrollMode::Position);

        let mut board = Self {
            columns: Vec::new(),
            data: Vec::new(),
            content_width: 0.,
            current_column: 0,
            view_offset: ViewOffset::Static(0.),
            drag: None,
            item_ghost: DragGhost::new(clock.clone()),
            column_ghost: DragGhost::new(clock.clone()),
            auto_scroller,
            auto_scroll_requested: false,
            pointer: DVec2::ZERO,
            drag_enabled: true,
            view_size,
            scale,
            pending_restore: None,
            callback: None,
            subscribers: Vec::new(),
            next_column_id: 0,
            clock,
            options,
        };
        board.update_auto_scroll_mode();
        board
    }

    pub fn options(&self) -> &Rc<Options> {
        &self.options
    }

    pub fn update_options(&mut self, options: Rc<Options>) {
        self.auto_scroller.update_config(&options.auto_scroll);
        self.options = options;
        self.update_column_data();
        self.update_auto_scroll_mode();
    }

    /// Applies `f` to a copy of the current options.
    pub fn modify_options(&mut self, f: impl FnOnce(&mut Options)) {
        let mut options = Options::clone(&self.options);
        f(&mut options);
        self.update_options(Rc::new(options));
    }

    pub fn set_view_size(&mut self, size: DVec2, scale: f64) {
        if self.view_size == size && self.scale == scale {
            return;
        }

        debug!(width = size.x, height = size.y, scale, "board view resized");
        self.view_size = size;
        self.scale = scale;
        self.update_column_data();
        self.update_auto_scroll_mode();
    }

    pub fn view_size(&self) -> DVec2 {
        self.view_size
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_size(self.view_size)
    }

    pub fn snap_on_scroll_effective(&self) -> bool {
        self.options.snap_on_scroll
            && (self.orientation() == Orientation::Portrait || self.options.snap_in_landscape)
    }

    pub fn snap_on_drag_effective(&self) -> bool {
        self.options.snap_on_drag
            && (self.orientation() == Orientation::Portrait || self.options.snap_in_landscape)
    }

    pub fn set_callback(&mut self, callback: Box<dyn BoardCallback>) {
        self.callback = Some(callback);
    }

    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    /// Returns a channel receiving every board event from now on.
    pub fn subscribe(&mut self) -> async_channel::Receiver<BoardEvent> {
        let (tx, rx) = async_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn is_drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column<L>> {
        self.columns.iter()
    }

    pub fn column(&self, index: usize) -> Option<&Column<L>> {
        self.columns.get(index)
    }

    pub fn list(&self, index: usize) -> Option<&L> {
        self.columns.get(index).map(|column| &column.list)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Total number of items on the board.
    pub fn item_count(&self) -> usize {
        self.columns.iter().map(|column| column.list.len()).sum()
    }

    pub fn column_item_count(&self, index: usize) -> Option<usize> {
        self.list(index).map(DragList::len)
    }

    pub fn column_index(&self, id: types::ColumnId) -> Option<usize> {
        self.columns.iter().position(|column| column.id == id)
    }

    /// Finds the column and row holding the item with `id`.
    pub fn find_item(&self, id: ItemId) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(idx, column)| Some((idx, column.list.row_of(id)?)))
    }

    pub fn column_of_header(&self, key: u64) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.properties.header.is_some_and(|h| h.key == key))
    }

    pub fn column_of_footer(&self, key: u64) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| column.properties.footer.is_some_and(|f| f.key == key))
    }

    pub fn current_column(&self) -> usize {
        self.current_column
    }

    /// The focused column, which is only tracked while snapping on scroll.
    pub fn focused_column(&self) -> usize {
        if !self.snap_on_scroll_effective() {
            return 0;
        }
        self.current_column
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_dragging_column(&self) -> bool {
        self.drag.as_ref().is_some_and(DragSession::is_column)
    }

    pub fn item_ghost(&self) -> &DragGhost {
        &self.item_ghost
    }

    pub fn column_ghost(&self) -> &DragGhost {
        &self.column_ghost
    }

    /// Whether the real element is currently drawn by one of the ghosts instead.
    pub fn is_substituted(&self, target: GhostTarget) -> bool {
        self.item_ghost.target() == Some(target) || self.column_ghost.target() == Some(target)
    }

    /// Item ghost bounds in view coordinates, aligned to physical pixels.
    pub fn item_ghost_rect(&self) -> Option<Rectangle> {
        self.item_ghost.rect().map(|rect| self.content_to_view(rect))
    }

    /// Column ghost bounds in view coordinates, aligned to physical pixels.
    pub fn column_ghost_rect(&self) -> Option<Rectangle> {
        self.column_ghost.rect().map(|rect| self.content_to_view(rect))
    }

    /// Column bounds in view coordinates, including the move animation offset.
    pub fn column_rect(&self, index: usize) -> Option<Rectangle> {
        let column = self.columns.get(index)?;
        let rect = self.data[index]
            .rect(self.view_size.y)
            .translated(DVec2::new(column.render_offset(), 0.));
        Some(self.content_to_view(rect))
    }

    fn content_to_view(&self, rect: Rectangle) -> Rectangle {
        let rect = rect.translated(DVec2::new(-self.scroll_x(), 0.));
        Rectangle::new(
            DVec2::new(
                round_logical_in_physical(self.scale, rect.loc.x),
                round_logical_in_physical(self.scale, rect.loc.y),
            ),
            rect.size,
        )
    }

    /// Top-left corner of a column's list viewport in content coordinates.
    fn list_origin(&self, index: usize) -> DVec2 {
        DVec2::new(self.data[index].x, self.columns[index].header_height())
    }

    /// Converts a view position into the list coordinates of a column.
    fn list_local(&self, index: usize, pos: DVec2) -> DVec2 {
        pos + DVec2::new(self.scroll_x(), 0.) - self.list_origin(index)
    }

    /// Column whose bounds contain the content x coordinate.
    fn column_at(&self, x: f64) -> Option<usize> {
        self.data
            .iter()
            .position(|data| data.x <= x && x < data.right())
    }

    // =========================================================================
    // Layout
    // =========================================================================

    fn update_column_data(&mut self) {
        let count = self.columns.len();
        let half_spacing = self.options.column_spacing / 2.;
        let edge = self.options.board_edge;
        let default_width = self.options.column_width;
        let view_size = self.view_size;

        self.data.clear();
        let mut x = 0.;
        for (idx, column) in self.columns.iter_mut().enumerate() {
            let margin_left = if idx == 0 { edge } else { half_spacing };
            let margin_right = if idx + 1 == count { edge } else { half_spacing };
            let width = column
                .properties
                .width
                .unwrap_or(default_width)
                .resolve(view_size.x)
                .max(0.);

            x += margin_left;
            self.data.push(ColumnData {
                x,
                width,
                margin_left,
                margin_right,
            });
            x += width + margin_right;

            let list_height = column.list_height(view_size.y);
            column.list.set_viewport(DVec2::new(width, list_height));
        }
        self.content_width = x;

        if let ViewOffset::Static(offset) = &mut self.view_offset {
            *offset = offset.clamp(0., f64::max(0., x - view_size.x));
        }

        if self.current_column >= count {
            self.set_current_column(count.saturating_sub(1));
        }

        self.apply_pending_restore();
    }

    fn update_auto_scroll_mode(&mut self) {
        let mode = if self.snap_on_drag_effective() {
            AutoScrollMode::Column
        } else {
            AutoScrollMode::Position
        };
        self.auto_scroller.set_mode(mode);
    }

    // =========================================================================
    // Animations
    // =========================================================================

    /// Advances animations to the current clock time, once per frame.
    pub fn advance_animations(&mut self) {
        if let ViewOffset::Animation(anim) = &self.view_offset {
            if anim.is_done() {
                let value = anim.value();
                self.view_offset = ViewOffset::Static(value.clamp(0., self.max_scroll_x()));
            }
        }

        for column in &mut self.columns {
            column.advance_animations();
        }

        self.item_ghost.advance_animations();
        self.column_ghost.advance_animations();

        // The view may have moved under a still pointer.
        self.reconcile_ghost();
    }

    pub fn are_animations_ongoing(&self) -> bool {
        self.view_offset.is_animation_ongoing()
            || self.columns.iter().any(Column::are_animations_ongoing)
            || self.item_ghost.are_animations_ongoing()
            || self.column_ghost.are_animations_ongoing()
    }

    fn emit(&mut self, event: BoardEvent) {
        trace!(?event, "board event");
        self.subscribers.retain(|tx| tx.try_send(event).is_ok());
    }

    #[cfg(test)]
    fn verify_invariants(&self) {
        use std::collections::HashSet;

        assert_eq!(
            self.columns.len(),
            self.data.len(),
            "every column must have layout data"
        );

        let mut x = 0.;
        for data in &self.data {
            x += data.margin_left;
            assert_eq!(data.x, x, "column data must be up to date");
            x += data.width + data.margin_right;
        }
        assert_eq!(self.content_width, x);

        let mut column_ids = HashSet::new();
        let mut item_ids = HashSet::new();
        for column in &self.columns {
            assert!(column_ids.insert(column.id), "column ids must be unique");

            for row in 0..column.list.len() {
                let id = column.list.item_id(row).unwrap();
                assert!(item_ids.insert(id), "item {id:?} must be on the board once");
            }
        }

        if self.columns.is_empty() {
            assert_eq!(self.current_column, 0);
        } else {
            assert!(self.current_column < self.columns.len());
        }

        let scroll = self.scroll_x();
        assert!(
            (0. ..=self.max_scroll_x()).contains(&scroll),
            "scroll offset {scroll} must stay within bounds"
        );

        match self.drag {
            None => {
                for column in &self.columns {
                    assert!(
                        !column.list.is_dragging(),
                        "lists can only drag during an item drag session"
                    );
                }
                assert!(!self.item_ghost.is_dragging());
                assert!(!self.column_ghost.is_dragging());
                assert!(!self.auto_scroller.is_auto_scrolling());
            }
            Some(DragSession::Item(drag)) => {
                assert!(drag.start_column < self.columns.len());
                assert!(drag.column < self.columns.len());

                for (idx, column) in self.columns.iter().enumerate() {
                    assert_eq!(
                        column.list.is_dragging(),
                        idx == drag.column,
                        "only the list holding the dragged item can drag"
                    );
                }
                assert_eq!(
                    self.columns[drag.column].list.drag_item_id(),
                    Some(drag.item)
                );
                assert_eq!(self.item_ghost.target(), Some(GhostTarget::Item(drag.item)));
                assert!(self.item_ghost.is_dragging());
                assert!(!self.column_ghost.is_dragging());
            }
            Some(DragSession::Column(drag)) => {
                assert!(drag.start_index < self.columns.len());
                assert_eq!(self.columns[drag.index].id, drag.column);

                for column in &self.columns {
                    assert!(!column.list.is_dragging());
                }
                assert_eq!(
                    self.column_ghost.target(),
                    Some(GhostTarget::Column(drag.column))
                );
                assert!(self.column_ghost.is_dragging());
                assert!(!self.item_ghost.is_dragging());
            }
        }
    }
}
