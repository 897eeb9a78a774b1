//! The per-column list contract and a reference row list.
//!
//! The board never looks inside a list beyond this contract. Any vertically scrolling list
//! that can report rows, insert and remove them, and carry its own drag state can serve as a
//! column.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::utils::Rectangle;

/// Stable identity of an item across moves between rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Payload stored in a board list.
pub trait BoardItem: fmt::Debug {
    fn id(&self) -> ItemId;
}

/// Drag progress reported by a list back to the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListDragEvent {
    Started { row: usize, pos: DVec2 },
    Dragging { row: usize, pos: DVec2 },
    Ended { row: usize },
}

impl ListDragEvent {
    pub fn row(&self) -> usize {
        match *self {
            ListDragEvent::Started { row, .. }
            | ListDragEvent::Dragging { row, .. }
            | ListDragEvent::Ended { row } => row,
        }
    }
}

/// A vertically scrolling list forming the body of one column.
///
/// Positions passed to the list are in its own coordinate space: the origin is the top-left
/// corner of the list viewport.
pub trait DragList: fmt::Debug {
    type Item: BoardItem;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn item(&self, row: usize) -> Option<&Self::Item>;

    fn item_id(&self, row: usize) -> Option<ItemId> {
        self.item(row).map(BoardItem::id)
    }

    fn row_of(&self, id: ItemId) -> Option<usize> {
        (0..self.len()).find(|&row| self.item_id(row) == Some(id))
    }

    /// Inserts `item` at `row`, which must be at most `len()`.
    fn insert(&mut self, row: usize, item: Self::Item);

    /// Removes the item at `row`, which must be less than `len()`.
    fn remove(&mut self, row: usize) -> Self::Item;

    /// Informs the list about its viewport size.
    fn set_viewport(&mut self, size: DVec2);

    fn scroll_to_row(&mut self, row: usize, animate: bool);

    /// Rectangle of `row` in list coordinates, if the row exists.
    fn row_rect(&self, row: usize) -> Option<Rectangle>;

    fn is_dragging(&self) -> bool;

    fn drag_item_id(&self) -> Option<ItemId>;

    /// Row where an item dropped at vertical position `y` would be inserted.
    fn drag_position_for_y(&self, y: f64) -> usize;

    /// Begins dragging the item at `row`.
    ///
    /// Returns `None` if the row does not exist or a drag is already active.
    fn start_drag(&mut self, row: usize, pos: DVec2) -> Option<ListDragEvent>;

    /// Moves the active drag to `pos`, reordering when `can_drop` allows the new row.
    fn drag_to(
        &mut self,
        pos: DVec2,
        can_drop: &mut dyn FnMut(usize) -> bool,
    ) -> Option<ListDragEvent>;

    /// Finishes the active drag, leaving the item where it is.
    fn end_drag(&mut self) -> Option<ListDragEvent>;

    /// Takes the dragged item out of the list and clears the drag state.
    fn remove_drag_item_and_end(&mut self) -> Option<Self::Item>;

    /// Inserts `item` as the dragged row at vertical position `y`, beginning a drag.
    fn add_drag_item_and_start(&mut self, y: f64, item: Self::Item, id: ItemId);
}

/// Fixed-height rows stacked from the top, scrolled vertically.
#[derive(Debug)]
pub struct RowList<T> {
    items: Vec<T>,
    row_height: f64,
    viewport: DVec2,
    scroll_y: f64,
    drag: Option<RowDrag>,
}

#[derive(Debug, Clone, Copy)]
struct RowDrag {
    id: ItemId,
    row: usize,
}

impl<T: BoardItem> RowList<T> {
    pub fn new(items: Vec<T>, row_height: f64) -> Self {
        Self {
            items,
            row_height: row_height.max(1.),
            viewport: DVec2::ZERO,
            scroll_y: 0.,
            drag: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn max_scroll_y(&self) -> f64 {
        f64::max(0., self.items.len() as f64 * self.row_height - self.viewport.y)
    }

    /// Row under `y`, clamped to existing rows.
    fn row_at(&self, y: f64) -> usize {
        let row = ((y + self.scroll_y) / self.row_height).floor().max(0.) as usize;
        row.min(self.items.len().saturating_sub(1))
    }
}

impl<T: BoardItem> DragList for RowList<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn item(&self, row: usize) -> Option<&T> {
        self.items.get(row)
    }

    fn insert(&mut self, row: usize, item: T) {
        if let Some(drag) = &mut self.drag {
            if row <= drag.row {
                drag.row += 1;
            }
        }
        self.items.insert(row, item);
    }

    fn remove(&mut self, row: usize) -> T {
        if let Some(drag) = self.drag {
            if drag.row == row {
                self.drag = None;
            } else if row < drag.row {
                self.drag = Some(RowDrag {
                    row: drag.row - 1,
                    ..drag
                });
            }
        }
        let item = self.items.remove(row);
        self.scroll_y = self.scroll_y.min(self.max_scroll_y());
        item
    }

    fn set_viewport(&mut self, size: DVec2) {
        self.viewport = size;
        self.scroll_y = self.scroll_y.min(self.max_scroll_y());
    }

    // Rows jump into view; this list has no scroll physics.
    fn scroll_to_row(&mut self, row: usize, _animate: bool) {
        let top = row as f64 * self.row_height;
        let bottom = top + self.row_height;

        if top < self.scroll_y {
            self.scroll_y = top;
        } else if bottom > self.scroll_y + self.viewport.y {
            self.scroll_y = bottom - self.viewport.y;
        }
        self.scroll_y = self.scroll_y.clamp(0., self.max_scroll_y());
    }

    fn row_rect(&self, row: usize) -> Option<Rectangle> {
        if row >= self.items.len() {
            return None;
        }

        Some(Rectangle::new(
            DVec2::new(0., row as f64 * self.row_height - self.scroll_y),
            DVec2::new(self.viewport.x, self.row_height),
        ))
    }

    fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn drag_item_id(&self) -> Option<ItemId> {
        self.drag.map(|drag| drag.id)
    }

    fn drag_position_for_y(&self, y: f64) -> usize {
        // Above the middle of a row inserts before it, below the middle inserts after it.
        let row = ((y + self.scroll_y) / self.row_height + 0.5).floor().max(0.) as usize;
        row.min(self.items.len())
    }

    fn start_drag(&mut self, row: usize, pos: DVec2) -> Option<ListDragEvent> {
        if self.drag.is_some() {
            return None;
        }

        let id = self.items.get(row)?.id();
        self.drag = Some(RowDrag { id, row });
        Some(ListDragEvent::Started { row, pos })
    }

    fn drag_to(
        &mut self,
        pos: DVec2,
        can_drop: &mut dyn FnMut(usize) -> bool,
    ) -> Option<ListDragEvent> {
        let mut drag = self.drag?;

        let target = self.row_at(pos.y);
        if target != drag.row && can_drop(target) {
            let item = self.items.remove(drag.row);
            self.items.insert(target, item);
            drag.row = target;
            self.drag = Some(drag);
        }

        Some(ListDragEvent::Dragging {
            row: drag.row,
            pos,
        })
    }

    fn end_drag(&mut self) -> Option<ListDragEvent> {
        let drag = self.drag.take()?;
        Some(ListDragEvent::Ended { row: drag.row })
    }

    fn remove_drag_item_and_end(&mut self) -> Option<T> {
        let drag = self.drag.take()?;
        let item = self.items.remove(drag.row);
        self.scroll_y = self.scroll_y.min(self.max_scroll_y());
        Some(item)
    }

    fn add_drag_item_and_start(&mut self, y: f64, item: T, id: ItemId) {
        let row = self.drag_position_for_y(y);
        self.items.insert(row, item);
        self.drag = Some(RowDrag { id, row });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Card(u64);

    impl BoardItem for Card {
        fn id(&self) -> ItemId {
            ItemId(self.0)
        }
    }

    fn list(ids: &[u64]) -> RowList<Card> {
        let mut list = RowList::new(ids.iter().copied().map(Card).collect(), 10.);
        list.set_viewport(DVec2::new(100., 50.));
        list
    }

    fn ids(list: &RowList<Card>) -> Vec<u64> {
        list.items().iter().map(|card| card.0).collect()
    }

    #[test]
    fn drag_position_splits_rows_in_half() {
        let list = list(&[1, 2, 3]);
        assert_eq!(list.drag_position_for_y(0.), 0);
        assert_eq!(list.drag_position_for_y(4.9), 0);
        assert_eq!(list.drag_position_for_y(5.), 1);
        assert_eq!(list.drag_position_for_y(14.), 1);
        assert_eq!(list.drag_position_for_y(-20.), 0);
        assert_eq!(list.drag_position_for_y(1000.), 3);
    }

    #[test]
    fn drag_reorders_within_list() {
        let mut list = list(&[1, 2, 3]);
        assert_eq!(
            list.start_drag(0, DVec2::new(5., 5.)),
            Some(ListDragEvent::Started {
                row: 0,
                pos: DVec2::new(5., 5.)
            })
        );
        assert_eq!(list.drag_item_id(), Some(ItemId(1)));

        let event = list.drag_to(DVec2::new(5., 25.), &mut |_| true);
        assert_eq!(event.map(|e| e.row()), Some(2));
        assert_eq!(ids(&list), [2, 3, 1]);

        assert_eq!(list.end_drag(), Some(ListDragEvent::Ended { row: 2 }));
        assert!(!list.is_dragging());
    }

    #[test]
    fn vetoed_row_keeps_order() {
        let mut list = list(&[1, 2, 3]);
        list.start_drag(0, DVec2::ZERO);

        let event = list.drag_to(DVec2::new(5., 25.), &mut |row| row != 2);
        assert_eq!(event.map(|e| e.row()), Some(0));
        assert_eq!(ids(&list), [1, 2, 3]);
    }

    #[test]
    fn second_drag_is_refused() {
        let mut list = list(&[1, 2]);
        assert!(list.start_drag(0, DVec2::ZERO).is_some());
        assert!(list.start_drag(1, DVec2::ZERO).is_none());
        assert!(list.start_drag(5, DVec2::ZERO).is_none());
    }

    #[test]
    fn drag_item_moves_between_lists() {
        let mut from = list(&[1, 2]);
        let mut to = list(&[3]);

        from.start_drag(1, DVec2::ZERO);
        let id = from.drag_item_id().unwrap();
        let item = from.remove_drag_item_and_end().unwrap();
        assert!(!from.is_dragging());

        to.add_drag_item_and_start(0., item, id);
        assert_eq!(ids(&from), [1]);
        assert_eq!(ids(&to), [2, 3]);
        assert_eq!(to.drag_item_id(), Some(ItemId(2)));
        assert_eq!(to.end_drag(), Some(ListDragEvent::Ended { row: 0 }));
    }

    #[test]
    fn structural_changes_track_drag_row() {
        let mut list = list(&[1, 2, 3]);
        list.start_drag(1, DVec2::ZERO);

        list.insert(0, Card(9));
        assert_eq!(list.end_drag(), Some(ListDragEvent::Ended { row: 2 }));
    }

    #[test]
    fn scroll_to_row_brings_row_into_view() {
        let mut list = list(&[1, 2, 3, 4, 5, 6, 7, 8]);
        list.scroll_to_row(7, false);
        assert_eq!(list.scroll_y(), 30.);
        assert_eq!(
            list.row_rect(7),
            Some(Rectangle::new(DVec2::new(0., 40.), DVec2::new(100., 10.)))
        );

        list.scroll_to_row(0, true);
        assert_eq!(list.scroll_y(), 0.);
        assert_eq!(list.row_rect(8), None);
    }
}
