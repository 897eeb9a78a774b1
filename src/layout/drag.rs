//! Drag sessions: pointer routing, target tracking, edge auto-scroll and drop.

use std::time::Duration;

use glam::DVec2;

use super::auto_scroll::AutoScrollStep;
use super::ghost::GhostTarget;
use super::list::{DragList, ItemId, ListDragEvent};
use super::types::{
    BoardEvent, ColumnDrag, ColumnId, DragSession, ItemDrag, Orientation, ScrollDirection,
};
use super::Board;
use crate::input::{PointerAction, PointerEvent};

impl<L: DragList> Board<L> {
    /// Routes a pointer event to the drag session or to view scrolling.
    ///
    /// Returns `true` if the board consumed the event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if self.columns.is_empty() {
            return false;
        }

        self.pointer = event.pos;

        let Some(session) = &mut self.drag else {
            return self.handle_scroll_pointer(event);
        };
        session.set_pointer(event.pos);

        match event.action {
            // While auto-scrolling, the scroll ticks update the drag target.
            PointerAction::Move if !self.auto_scroller.is_auto_scrolling() => {
                self.update_drag_target();
            }
            PointerAction::Move | PointerAction::Down => (),
            PointerAction::Up | PointerAction::Cancel => self.end_drag(),
        }

        true
    }

    pub fn set_drag_enabled(&mut self, enabled: bool) {
        self.drag_enabled = enabled;
    }

    /// Starts dragging the item with `id` from the last pointer position.
    ///
    /// Returns `false` if dragging is disabled, the item is unknown, a drag is already active, or
    /// the callback vetoes the drag.
    pub fn start_item_drag(&mut self, id: ItemId) -> bool {
        if self.drag.is_some() || !self.drag_enabled {
            return false;
        }

        let Some((column, row)) = self.find_item(id) else {
            return false;
        };

        if !self.columns[column].drag_enabled {
            return false;
        }

        if let Some(callback) = &self.callback {
            if !callback.can_drag_item(column, row) {
                debug!(item = id.get(), column, row, "item drag vetoed");
                return false;
            }
        }

        let pos = self.list_local(column, self.pointer);
        let origin = self.list_origin(column);
        let list = &mut self.columns[column].list;
        let Some(ListDragEvent::Started { row, .. }) = list.start_drag(row, pos) else {
            return false;
        };
        let real = list.row_rect(row).unwrap_or_default();

        self.view_offset.cancel_gesture();
        self.item_ghost.start(
            GhostTarget::Item(id),
            real,
            pos,
            origin,
            self.options.drag_entrance,
            self.options.animations.ghost_entrance(),
        );

        self.drag = Some(DragSession::Item(ItemDrag {
            item: id,
            start_column: column,
            start_row: row,
            column,
            row,
            pointer: self.pointer,
        }));

        debug!(item = id.get(), column, row, "started item drag");
        self.emit(BoardEvent::ItemDragStarted { column, row });
        true
    }

    /// Starts dragging the column at `index` from the last pointer position.
    ///
    /// Only columns with a drag handle can be dragged.
    pub fn start_column_drag(&mut self, index: usize) -> bool {
        if self.drag.is_some() || !self.drag_enabled {
            return false;
        }

        let Some(column) = self.columns.get(index) else {
            return false;
        };

        if !column.properties.has_drag_handle || !column.drag_enabled {
            return false;
        }

        if let Some(callback) = &self.callback {
            if !callback.can_drag_column(index) {
                debug!(index, "column drag vetoed");
                return false;
            }
        }

        let id = column.id;
        let real = self.data[index].rect(self.view_size.y);
        let touch = self.pointer + DVec2::new(self.scroll_x(), 0.);

        self.view_offset.cancel_gesture();
        self.column_ghost.start(
            GhostTarget::Column(id),
            real,
            touch,
            DVec2::ZERO,
            self.options.column_drag_entrance,
            self.options.animations.ghost_entrance(),
        );

        self.drag = Some(DragSession::Column(ColumnDrag {
            column: id,
            start_index: index,
            index,
            pointer: self.pointer,
        }));

        debug!(index, "started column drag");
        self.emit(BoardEvent::ColumnDragStarted { index });
        true
    }

    /// Ends the active drag as if the pointer was released where it is.
    pub fn cancel_drag(&mut self) -> bool {
        if self.drag.is_none() {
            return false;
        }

        self.end_drag();
        true
    }

    // =========================================================================
    // Drag target
    // =========================================================================

    /// Re-evaluates the drop target under the pointer and the edge auto-scroll.
    pub(super) fn update_drag_target(&mut self) {
        match self.drag {
            Some(DragSession::Item(drag)) => self.update_item_drag(drag),
            Some(DragSession::Column(drag)) => self.update_column_drag(drag),
            None => return,
        }

        self.update_edge_auto_scroll();
    }

    fn update_item_drag(&mut self, mut drag: ItemDrag) {
        let reported = (drag.column, drag.row);
        let pointer_x = drag.pointer.x + self.scroll_x();

        if let Some(target) = self.column_at(pointer_x) {
            if target != drag.column {
                self.move_dragged_item(&mut drag, target);
            }
        }

        let pos = self.list_local(drag.column, drag.pointer);
        let origin = self.list_origin(drag.column);
        let (start_column, start_row, column) = (drag.start_column, drag.start_row, drag.column);

        let callback = self.callback.as_deref();
        let event = self.columns[column].list.drag_to(pos, &mut |row| {
            callback.map_or(true, |cb| {
                cb.can_drop_item(start_column, start_row, column, row)
            })
        });

        self.item_ghost.set_offset(origin);
        self.item_ghost.set_position(pos);

        if let Some(ListDragEvent::Dragging { row, .. }) = event {
            drag.row = row;
        }
        self.drag = Some(DragSession::Item(drag));

        if (drag.column, drag.row) != reported {
            self.emit(BoardEvent::ItemPositionChanged {
                from_column: start_column,
                from_row: start_row,
                column: drag.column,
                row: drag.row,
            });
        }
    }

    /// Hands the dragged item over to the list of column `target`, if allowed.
    fn move_dragged_item(&mut self, drag: &mut ItemDrag, target: usize) {
        let pos = self.list_local(target, drag.pointer);
        let row = self.columns[target].list.drag_position_for_y(pos.y);

        if let Some(callback) = &self.callback {
            if !callback.can_drop_item(drag.start_column, drag.start_row, target, row) {
                return;
            }
        }

        let Some(item) = self.columns[drag.column].list.remove_drag_item_and_end() else {
            warn!(column = drag.column, "dragged item missing from its list");
            return;
        };
        self.columns[target]
            .list
            .add_drag_item_and_start(pos.y, item, drag.item);

        trace!(from = drag.column, to = target, row, "moved dragged item");
        drag.column = target;
        drag.row = row;
    }

    fn update_column_drag(&mut self, mut drag: ColumnDrag) {
        let pointer_x = drag.pointer.x + self.scroll_x();
        let mut moved = Vec::new();

        // One slot at a time, once the pointer passes the neighbour's midpoint. The displaced
        // column's midpoint then lies behind the pointer, so the order can't flip back.
        while let Some(target) = self.column_drag_step(drag.index, pointer_x) {
            let allowed = self
                .callback
                .as_ref()
                .map_or(true, |cb| cb.can_drop_column(drag.index, target));
            if !allowed {
                break;
            }

            self.move_dragged_column(drag.index, target);
            moved.push((drag.index, target));
            drag.index = target;
        }

        self.column_ghost
            .set_position(drag.pointer + DVec2::new(self.scroll_x(), 0.));
        self.drag = Some(DragSession::Column(drag));

        for (old, new) in moved {
            self.emit(BoardEvent::ColumnDragPositionChanged { old, new });
        }
    }

    /// Neighbour slot the dragged column at `index` should move into for a content x.
    fn column_drag_step(&self, index: usize, pointer_x: f64) -> Option<usize> {
        let next = index + 1;
        if next < self.data.len() && pointer_x > self.data[next].center_x() {
            return Some(next);
        }

        let prev = index.checked_sub(1)?;
        (pointer_x < self.data[prev].center_x()).then_some(prev)
    }

    fn move_dragged_column(&mut self, from: usize, to: usize) {
        let old_x: Vec<(ColumnId, f64)> = self
            .columns
            .iter()
            .zip(&self.data)
            .map(|(column, data)| (column.id, data.x))
            .collect();

        let column = self.columns.remove(from);
        self.columns.insert(to, column);
        self.update_column_data();

        // Columns that changed slots slide over from where they were drawn.
        let config = self.options.animations.column_slide();
        for (idx, column) in self.columns.iter_mut().enumerate() {
            if idx == to {
                continue;
            }

            let Some(&(_, x)) = old_x.iter().find(|(id, _)| *id == column.id) else {
                continue;
            };
            let delta = x - self.data[idx].x;
            if delta != 0. {
                column.animate_move_from(delta, self.clock.clone(), config);
            }
        }

        trace!(from, to, "moved dragged column");
    }

    /// Keeps the ghost under the pointer while the view moves.
    pub(super) fn reconcile_ghost(&mut self) {
        match self.drag {
            Some(DragSession::Item(drag)) => {
                let pos = self.list_local(drag.column, drag.pointer);
                let origin = self.list_origin(drag.column);
                self.item_ghost.set_offset(origin);
                self.item_ghost.set_position(pos);
            }
            Some(DragSession::Column(drag)) => {
                let touch = drag.pointer + DVec2::new(self.scroll_x(), 0.);
                self.column_ghost.set_position(touch);
            }
            None => (),
        }
    }

    // =========================================================================
    // Auto-scroll
    // =========================================================================

    fn update_edge_auto_scroll(&mut self) {
        let Some(session) = &self.drag else {
            return;
        };
        let pointer = session.pointer();

        let view_width = self.view_size.x;
        let fraction = match self.orientation() {
            Orientation::Portrait => self.options.auto_scroll.edge_portrait.0,
            Orientation::Landscape => self.options.auto_scroll.edge_landscape.0,
        };
        let edge = view_width * fraction;
        let scroll = self.scroll_x();

        if pointer.x > view_width - edge && scroll < self.max_scroll_x() {
            self.start_auto_scroll(ScrollDirection::Right);
        } else if pointer.x < edge && scroll > 0. {
            self.start_auto_scroll(ScrollDirection::Left);
        } else {
            self.auto_scroller.stop();
        }
    }

    fn start_auto_scroll(&mut self, direction: ScrollDirection) {
        if self.auto_scroller.start(direction, self.clock.now()) {
            self.auto_scroll_requested = true;
        }
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.auto_scroller.is_auto_scrolling()
    }

    pub fn auto_scroll_interval(&self) -> Duration {
        self.auto_scroller.interval()
    }

    /// Returns `true` once after the auto-scroller started a new repeat chain.
    ///
    /// Event-loop hosts arm a repeating timer calling [`Board::on_auto_scroll_tick`] when this
    /// returns `true`.
    pub fn take_auto_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.auto_scroll_requested)
    }

    /// Runs one auto-scroll tick at the current clock time.
    ///
    /// Returns `false` when the repeat chain is over and the timer should be dropped.
    pub fn on_auto_scroll_tick(&mut self) -> bool {
        let now = self.clock.now();
        self.auto_scroll_tick(now)
    }

    /// Runs every auto-scroll tick that is due on a manually driven clock.
    pub fn advance_auto_scroll(&mut self) {
        let now = self.clock.now();
        while let Some(deadline) = self.auto_scroller.next_tick() {
            if deadline > now {
                break;
            }
            self.auto_scroll_tick(deadline);
        }
    }

    fn auto_scroll_tick(&mut self, now: Duration) -> bool {
        let Some(step) = self.auto_scroller.tick(now) else {
            return false;
        };

        if self.drag.is_none() {
            self.auto_scroller.stop();
            return true;
        }

        match step {
            AutoScrollStep::Position(delta) => self.scroll_by(delta),
            AutoScrollStep::Column(0) => (),
            AutoScrollStep::Column(step) => {
                let target = self.current_column as i64 + i64::from(step);
                if let Ok(target) = usize::try_from(target) {
                    if target < self.columns.len() {
                        self.snap_to_column(target, true);
                    }
                }
            }
        }

        self.update_drag_target();
        true
    }

    // =========================================================================
    // Drop
    // =========================================================================

    fn end_drag(&mut self) {
        self.auto_scroller.stop();
        self.view_offset.stop_anim_and_gesture();

        let Some(session) = self.drag.take() else {
            return;
        };

        let (end_column, changed_column) = match session {
            DragSession::Item(drag) => {
                let origin = self.list_origin(drag.column);
                let list = &mut self.columns[drag.column].list;
                let row = list.end_drag().map_or(drag.row, |event| event.row());

                match list.row_rect(row) {
                    Some(rect) => {
                        let config = self.options.animations.ghost_drop();
                        self.item_ghost.end(rect.translated(origin), config);
                    }
                    None => self.item_ghost.hide(),
                }

                debug!(
                    item = drag.item.get(),
                    from_column = drag.start_column,
                    from_row = drag.start_row,
                    to_column = drag.column,
                    to_row = row,
                    "ended item drag"
                );
                self.emit(BoardEvent::ItemDragEnded {
                    from_column: drag.start_column,
                    from_row: drag.start_row,
                    to_column: drag.column,
                    to_row: row,
                });
                (drag.column, drag.column != drag.start_column)
            }
            DragSession::Column(drag) => {
                let dest = self.data[drag.index].rect(self.view_size.y);
                let config = self.options.animations.ghost_drop();
                self.column_ghost.end(dest, config);

                debug!(from = drag.start_index, to = drag.index, "ended column drag");
                self.emit(BoardEvent::ColumnDragEnded {
                    from: drag.start_index,
                    to: drag.index,
                });
                (drag.index, false)
            }
        };

        if self.snap_on_scroll_effective() || (changed_column && self.snap_on_drag_effective()) {
            self.snap_to_column(end_column, true);
        }
    }
}
