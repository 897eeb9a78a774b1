//! Shared types used across the board modules.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::list::ItemId;

/// Stable identity of a column, independent of its current index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(pub(crate) u64);

impl ColumnId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Horizontal direction of view movement, named after the columns it reveals.
///
/// `Right` scrolls toward later columns, `Left` toward earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

impl ScrollDirection {
    pub fn sign(self) -> f64 {
        match self {
            ScrollDirection::Left => -1.,
            ScrollDirection::Right => 1.,
        }
    }
}

/// Whether the board view is wider than it is tall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn from_size(size: DVec2) -> Self {
        if size.x > size.y {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// The drag session currently owned by the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragSession {
    Item(ItemDrag),
    Column(ColumnDrag),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemDrag {
    pub item: ItemId,
    pub start_column: usize,
    pub start_row: usize,
    /// Column whose list currently holds the dragged item.
    pub column: usize,
    /// Last reported row within `column`.
    pub row: usize,
    /// Pointer position in view coordinates.
    pub pointer: DVec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnDrag {
    pub column: ColumnId,
    pub start_index: usize,
    /// Index the dragged column currently occupies.
    pub index: usize,
    /// Pointer position in view coordinates.
    pub pointer: DVec2,
}

impl DragSession {
    pub fn pointer(&self) -> DVec2 {
        match self {
            DragSession::Item(drag) => drag.pointer,
            DragSession::Column(drag) => drag.pointer,
        }
    }

    pub fn set_pointer(&mut self, pointer: DVec2) {
        match self {
            DragSession::Item(drag) => drag.pointer = pointer,
            DragSession::Column(drag) => drag.pointer = pointer,
        }
    }

    pub fn is_column(&self) -> bool {
        matches!(self, DragSession::Column(_))
    }
}

/// Notification emitted by the board to its subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    ItemDragStarted {
        column: usize,
        row: usize,
    },
    ItemPositionChanged {
        from_column: usize,
        from_row: usize,
        column: usize,
        row: usize,
    },
    ItemDragEnded {
        from_column: usize,
        from_row: usize,
        to_column: usize,
        to_row: usize,
    },
    FocusedColumnChanged {
        old: usize,
        new: usize,
    },
    ColumnDragStarted {
        index: usize,
    },
    ColumnDragPositionChanged {
        old: usize,
        new: usize,
    },
    ColumnDragEnded {
        from: usize,
        to: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {index} is out of range for {count} columns")]
    ColumnOutOfRange { index: usize, count: usize },
    #[error("row {row} is out of range for column {column} with {len} items")]
    RowOutOfRange {
        column: usize,
        row: usize,
        len: usize,
    },
    #[error("no item with id {} on the board", .0.get())]
    UnknownItem(ItemId),
    #[error("the board is in the middle of a drag")]
    DragInProgress,
}

/// Board state that survives the host view being recreated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedState {
    pub current_column: usize,
}

/// Vetoes for drags, consulted synchronously by the board.
///
/// Every method allows the action by default.
pub trait BoardCallback {
    fn can_drag_item(&self, column: usize, row: usize) -> bool {
        let _ = (column, row);
        true
    }

    fn can_drop_item(
        &self,
        from_column: usize,
        from_row: usize,
        to_column: usize,
        to_row: usize,
    ) -> bool {
        let _ = (from_column, from_row, to_column, to_row);
        true
    }

    fn can_drag_column(&self, index: usize) -> bool {
        let _ = index;
        true
    }

    fn can_drop_column(&self, old: usize, new: usize) -> bool {
        let _ = (old, new);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_externally_tagged() {
        let event = BoardEvent::ColumnDragEnded { from: 0, to: 2 };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"ColumnDragEnded":{"from":0,"to":2}}"#
        );
    }

    #[test]
    fn error_messages() {
        let err = BoardError::ColumnOutOfRange { index: 4, count: 3 };
        assert_eq!(err.to_string(), "column 4 is out of range for 3 columns");
        assert_eq!(
            BoardError::UnknownItem(ItemId(7)).to_string(),
            "no item with id 7 on the board"
        );
    }

    #[test]
    fn orientation_from_size() {
        assert_eq!(
            Orientation::from_size(DVec2::new(1920., 1080.)),
            Orientation::Landscape
        );
        assert_eq!(
            Orientation::from_size(DVec2::new(500., 500.)),
            Orientation::Portrait
        );
    }
}
