//! Structural edits of the board and its configuration.
//!
//! Structural edits are refused with [`BoardError::DragInProgress`] while a drag session is
//! active, so the indices held by the session stay valid.

use dragboard_config::{ColumnWidth, DragEntrance, SnapAnchor};

use super::column::{Column, ColumnProperties};
use super::ghost::DragAxes;
use super::list::{DragList, ItemId};
use super::types::{BoardError, ColumnId};
use super::view_offset::ViewOffset;
use super::Board;

impl<L: DragList> Board<L> {
    fn ensure_no_drag(&self) -> Result<(), BoardError> {
        if self.drag.is_some() {
            return Err(BoardError::DragInProgress);
        }
        Ok(())
    }

    fn check_column(&self, index: usize) -> Result<(), BoardError> {
        if index >= self.columns.len() {
            return Err(BoardError::ColumnOutOfRange {
                index,
                count: self.columns.len(),
            });
        }
        Ok(())
    }

    /// Checks that `row` is an existing row, or the end position when `allow_end` is set.
    fn check_row(&self, column: usize, row: usize, allow_end: bool) -> Result<(), BoardError> {
        self.check_column(column)?;

        let len = self.columns[column].list.len();
        let in_range = if allow_end { row <= len } else { row < len };
        if !in_range {
            return Err(BoardError::RowOutOfRange { column, row, len });
        }
        Ok(())
    }

    // =========================================================================
    // Columns
    // =========================================================================

    pub fn add_column(
        &mut self,
        list: L,
        properties: ColumnProperties,
    ) -> Result<ColumnId, BoardError> {
        self.insert_column(self.columns.len(), list, properties)
    }

    pub fn insert_column(
        &mut self,
        index: usize,
        list: L,
        properties: ColumnProperties,
    ) -> Result<ColumnId, BoardError> {
        self.ensure_no_drag()?;
        if index > self.columns.len() {
            return Err(BoardError::ColumnOutOfRange {
                index,
                count: self.columns.len(),
            });
        }

        let id = ColumnId(self.next_column_id);
        self.next_column_id += 1;

        self.columns.insert(index, Column::new(id, list, properties));
        self.update_column_data();

        debug!(index, id = id.get(), "inserted column");
        Ok(id)
    }

    /// Removes a column, returning its list.
    pub fn remove_column(&mut self, index: usize) -> Result<L, BoardError> {
        self.ensure_no_drag()?;
        self.check_column(index)?;

        let column = self.columns.remove(index);
        self.update_column_data();

        debug!(index, id = column.id.get(), "removed column");
        Ok(column.list)
    }

    /// Removes every column, returning their lists in order.
    pub fn clear_board(&mut self) -> Result<Vec<L>, BoardError> {
        self.ensure_no_drag()?;

        let lists = self.columns.drain(..).map(|column| column.list).collect();
        self.view_offset = ViewOffset::Static(0.);
        self.update_column_data();

        debug!("cleared board");
        Ok(lists)
    }

    pub fn move_column(&mut self, from: usize, to: usize) -> Result<(), BoardError> {
        self.ensure_no_drag()?;
        self.check_column(from)?;
        self.check_column(to)?;

        if from != to {
            let column = self.columns.remove(from);
            self.columns.insert(to, column);
            self.update_column_data();

            // The current column keeps pointing at the same column.
            let current = self.current_column;
            let current = if current == from {
                to
            } else if from < current && current <= to {
                current - 1
            } else if to <= current && current < from {
                current + 1
            } else {
                current
            };
            self.set_current_column(current);
        }
        Ok(())
    }

    pub fn set_column_drag_enabled(
        &mut self,
        index: usize,
        enabled: bool,
    ) -> Result<(), BoardError> {
        self.check_column(index)?;
        self.columns[index].drag_enabled = enabled;
        Ok(())
    }

    // =========================================================================
    // Items
    // =========================================================================

    pub fn insert_item(
        &mut self,
        column: usize,
        row: usize,
        item: L::Item,
        scroll_to_item: bool,
    ) -> Result<(), BoardError> {
        self.ensure_no_drag()?;
        self.check_row(column, row, true)?;

        self.columns[column].list.insert(row, item);
        if scroll_to_item {
            self.scroll_to_item(column, row, false)?;
        }
        Ok(())
    }

    /// Appends an item to the end of a column.
    pub fn add_item(
        &mut self,
        column: usize,
        item: L::Item,
        scroll_to_item: bool,
    ) -> Result<(), BoardError> {
        self.check_column(column)?;
        let row = self.columns[column].list.len();
        self.insert_item(column, row, item, scroll_to_item)
    }

    pub fn remove_item(&mut self, column: usize, row: usize) -> Result<L::Item, BoardError> {
        self.ensure_no_drag()?;
        self.check_row(column, row, false)?;

        Ok(self.columns[column].list.remove(row))
    }

    pub fn remove_item_by_id(&mut self, id: ItemId) -> Result<L::Item, BoardError> {
        let (column, row) = self.find_item(id).ok_or(BoardError::UnknownItem(id))?;
        self.remove_item(column, row)
    }

    /// Moves an item to `to_row` of `to_column`.
    ///
    /// Within a single column `to_row` is the final row of the item.
    pub fn move_item(
        &mut self,
        from_column: usize,
        from_row: usize,
        to_column: usize,
        to_row: usize,
        scroll_to_item: bool,
    ) -> Result<(), BoardError> {
        self.ensure_no_drag()?;
        self.check_row(from_column, from_row, false)?;
        self.check_row(to_column, to_row, from_column != to_column)?;

        let item = self.columns[from_column].list.remove(from_row);
        self.columns[to_column].list.insert(to_row, item);

        if scroll_to_item {
            self.scroll_to_item(to_column, to_row, false)?;
        }
        Ok(())
    }

    pub fn move_item_by_id(
        &mut self,
        id: ItemId,
        to_column: usize,
        to_row: usize,
        scroll_to_item: bool,
    ) -> Result<(), BoardError> {
        let (column, row) = self.find_item(id).ok_or(BoardError::UnknownItem(id))?;
        self.move_item(column, row, to_column, to_row, scroll_to_item)
    }

    /// Replaces the item at a position, returning the old one.
    pub fn replace_item(
        &mut self,
        column: usize,
        row: usize,
        item: L::Item,
        scroll_to_item: bool,
    ) -> Result<L::Item, BoardError> {
        self.ensure_no_drag()?;
        self.check_row(column, row, false)?;

        let list = &mut self.columns[column].list;
        let old = list.remove(row);
        list.insert(row, item);

        if scroll_to_item {
            self.scroll_to_item(column, row, false)?;
        }
        Ok(old)
    }

    pub fn replace_item_by_id(
        &mut self,
        id: ItemId,
        item: L::Item,
        scroll_to_item: bool,
    ) -> Result<L::Item, BoardError> {
        let (column, row) = self.find_item(id).ok_or(BoardError::UnknownItem(id))?;
        self.replace_item(column, row, item, scroll_to_item)
    }

    /// Brings a column to the snap anchor and scrolls its list to the row.
    pub fn scroll_to_item(
        &mut self,
        column: usize,
        row: usize,
        animate: bool,
    ) -> Result<(), BoardError> {
        self.ensure_no_drag()?;
        self.check_row(column, row, false)?;

        self.view_offset.stop_anim_and_gesture();
        self.snap_to_column(column, animate);
        self.columns[column].list.scroll_to_row(row, animate);
        Ok(())
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn set_column_width(&mut self, width: ColumnWidth) {
        self.modify_options(|options| options.column_width = width);
    }

    pub fn set_column_spacing(&mut self, spacing: f64) {
        self.modify_options(|options| options.column_spacing = spacing.max(0.));
    }

    pub fn set_board_edge(&mut self, edge: f64) {
        self.modify_options(|options| options.board_edge = edge.max(0.));
    }

    pub fn set_snap_anchor(&mut self, anchor: SnapAnchor) {
        self.modify_options(|options| options.snap_anchor = anchor);
    }

    pub fn set_snap_on_scroll(&mut self, snap: bool) {
        self.modify_options(|options| options.snap_on_scroll = snap);
    }

    pub fn set_snap_on_drag(&mut self, snap: bool) {
        self.modify_options(|options| options.snap_on_drag = snap);
    }

    pub fn set_snap_in_landscape(&mut self, snap: bool) {
        self.modify_options(|options| options.snap_in_landscape = snap);
    }

    pub fn set_drag_entrance(&mut self, entrance: DragEntrance) {
        self.modify_options(|options| options.drag_entrance = entrance);
    }

    pub fn set_column_drag_entrance(&mut self, entrance: DragEntrance) {
        self.modify_options(|options| options.column_drag_entrance = entrance);
    }

    /// Restricts the axes along which the item ghost follows the pointer.
    pub fn set_item_ghost_axes(&mut self, axes: DragAxes) {
        self.item_ghost.set_axes(axes);
    }
}
