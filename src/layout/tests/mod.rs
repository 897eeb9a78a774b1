use std::rc::Rc;
use std::time::Duration;

use dragboard_config::{Animations, ColumnWidth, SnapAnchor};
use glam::DVec2;
use proptest::prelude::*;
use proptest_derive::Arbitrary;

use super::column::ColumnProperties;
use super::list::{BoardItem, ItemId, RowList};
use super::types::BoardEvent;
use super::view_offset::ViewOffset;
use super::*;
use crate::input::{PointerAction, PointerEvent};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TestItem(u64);

impl BoardItem for TestItem {
    fn id(&self) -> ItemId {
        ItemId(self.0)
    }
}

type TestBoard = Board<RowList<TestItem>>;

const VIEW: DVec2 = DVec2::new(400., 800.);
const ROW_HEIGHT: f64 = 50.;
const COLUMN_WIDTH: f64 = 300.;

/// Fixed-width columns snapping to the left edge, with instant animations.
fn test_options() -> Options {
    Options {
        column_width: ColumnWidth::Fixed(COLUMN_WIDTH),
        snap_anchor: SnapAnchor::Left,
        row_height: ROW_HEIGHT,
        animations: Animations {
            off: true,
            ..Default::default()
        },
        ..Options::default()
    }
}

/// Creates a board with one column per entry, holding that many items.
///
/// Item ids count up from 1 across the columns.
fn make_board(view: DVec2, items: &[usize], options: Options) -> (TestBoard, Clock) {
    let clock = Clock::with_time(Duration::ZERO);
    let mut board = Board::new(view, 1., clock.clone(), Rc::new(options));

    let mut next_id = 1;
    for &count in items {
        let items = (0..count)
            .map(|_| {
                next_id += 1;
                TestItem(next_id - 1)
            })
            .collect();
        board
            .add_column(
                RowList::new(items, ROW_HEIGHT),
                ColumnProperties {
                    has_drag_handle: true,
                    ..Default::default()
                },
            )
            .unwrap();
    }

    (board, clock)
}

fn pointer(board: &mut TestBoard, clock: &Clock, action: PointerAction, x: f64, y: f64) -> bool {
    board.handle_pointer(PointerEvent::new(action, x, y, clock.now()))
}

/// Moves the clock forward and runs everything that became due, like a frame would.
fn advance(board: &mut TestBoard, clock: &mut Clock, ms: u64) {
    let now = clock.now() + Duration::from_millis(ms);
    clock.set_unadjusted(now);
    board.advance_auto_scroll();
    board.advance_animations();
}

fn drain(events: &async_channel::Receiver<BoardEvent>) -> Vec<BoardEvent> {
    let mut rv = Vec::new();
    while let Ok(event) = events.try_recv() {
        rv.push(event);
    }
    rv
}

fn item_ids(board: &TestBoard, column: usize) -> Vec<u64> {
    board
        .list(column)
        .unwrap()
        .items()
        .iter()
        .map(|item| item.0)
        .collect()
}

fn column_ids(board: &TestBoard) -> Vec<u64> {
    board.columns().map(|column| column.id().get()).collect()
}

#[derive(Debug)]
#[allow(dead_code)]
struct BoardSnapshot {
    scroll_x: i64,
    current_column: usize,
    columns: Vec<Vec<u64>>,
}

fn snapshot(board: &TestBoard) -> BoardSnapshot {
    BoardSnapshot {
        scroll_x: board.scroll_x().round() as i64,
        current_column: board.current_column(),
        columns: (0..board.column_count())
            .map(|idx| item_ids(board, idx))
            .collect(),
    }
}

fn arbitrary_anchor() -> impl Strategy<Value = SnapAnchor> {
    prop_oneof![
        Just(SnapAnchor::Left),
        Just(SnapAnchor::Center),
        Just(SnapAnchor::Right),
    ]
}

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Op {
    AddColumn {
        #[proptest(strategy = "0..4usize")]
        items: usize,
    },
    InsertColumn {
        #[proptest(strategy = "0..5usize")]
        index: usize,
        #[proptest(strategy = "0..4usize")]
        items: usize,
    },
    RemoveColumn {
        #[proptest(strategy = "0..5usize")]
        index: usize,
    },
    MoveColumn {
        #[proptest(strategy = "0..5usize")]
        from: usize,
        #[proptest(strategy = "0..5usize")]
        to: usize,
    },
    InsertItem {
        #[proptest(strategy = "0..5usize")]
        column: usize,
        #[proptest(strategy = "0..6usize")]
        row: usize,
    },
    RemoveItem {
        #[proptest(strategy = "0..5usize")]
        column: usize,
        #[proptest(strategy = "0..6usize")]
        row: usize,
    },
    MoveItem {
        #[proptest(strategy = "0..5usize")]
        from_column: usize,
        #[proptest(strategy = "0..6usize")]
        from_row: usize,
        #[proptest(strategy = "0..5usize")]
        to_column: usize,
        #[proptest(strategy = "0..6usize")]
        to_row: usize,
    },
    PointerDown {
        #[proptest(strategy = "-20f64..440.")]
        x: f64,
        #[proptest(strategy = "-20f64..820.")]
        y: f64,
    },
    PointerMove {
        #[proptest(strategy = "-20f64..440.")]
        x: f64,
        #[proptest(strategy = "-20f64..820.")]
        y: f64,
    },
    PointerUp,
    PointerCancel,
    StartItemDrag {
        #[proptest(strategy = "1..40u64")]
        id: u64,
    },
    StartColumnDrag {
        #[proptest(strategy = "0..5usize")]
        index: usize,
    },
    CancelDrag,
    AdvanceTime {
        #[proptest(strategy = "0..400u64")]
        ms: u64,
    },
    SetSnapOnScroll {
        snap: bool,
    },
    SetSnapOnDrag {
        snap: bool,
    },
    SetSnapAnchor {
        #[proptest(strategy = "arbitrary_anchor()")]
        anchor: SnapAnchor,
    },
    SetColumnSpacing {
        #[proptest(strategy = "0f64..60.")]
        spacing: f64,
    },
    SetViewSize {
        #[proptest(strategy = "100f64..1200.")]
        width: f64,
        #[proptest(strategy = "100f64..1200.")]
        height: f64,
    },
}

struct TestState {
    board: TestBoard,
    clock: Clock,
    next_id: u64,
}

impl TestState {
    fn new() -> Self {
        let clock = Clock::with_time(Duration::ZERO);
        let board = Board::new(VIEW, 1., clock.clone(), Rc::new(Options::default()));
        Self {
            board,
            clock,
            next_id: 1,
        }
    }

    fn new_item(&mut self) -> TestItem {
        self.next_id += 1;
        TestItem(self.next_id - 1)
    }

    fn new_list(&mut self, items: usize) -> RowList<TestItem> {
        let items = (0..items).map(|_| self.new_item()).collect();
        RowList::new(items, ROW_HEIGHT)
    }

    fn pointer(&mut self, action: PointerAction, x: f64, y: f64) {
        pointer(&mut self.board, &self.clock, action, x, y);
    }

    /// Applies the op, returning the expected change in the total item count.
    fn apply(&mut self, op: Op) -> isize {
        let properties = ColumnProperties {
            has_drag_handle: true,
            ..Default::default()
        };

        match op {
            Op::AddColumn { items } => {
                let list = self.new_list(items);
                match self.board.add_column(list, properties) {
                    Ok(_) => items as isize,
                    Err(_) => 0,
                }
            }
            Op::InsertColumn { index, items } => {
                let list = self.new_list(items);
                match self.board.insert_column(index, list, properties) {
                    Ok(_) => items as isize,
                    Err(_) => 0,
                }
            }
            Op::RemoveColumn { index } => match self.board.remove_column(index) {
                Ok(list) => -(list.len() as isize),
                Err(_) => 0,
            },
            Op::MoveColumn { from, to } => {
                let _ = self.board.move_column(from, to);
                0
            }
            Op::InsertItem { column, row } => {
                let item = self.new_item();
                match self.board.insert_item(column, row, item, true) {
                    Ok(()) => 1,
                    Err(_) => 0,
                }
            }
            Op::RemoveItem { column, row } => match self.board.remove_item(column, row) {
                Ok(_) => -1,
                Err(_) => 0,
            },
            Op::MoveItem {
                from_column,
                from_row,
                to_column,
                to_row,
            } => {
                let moved = self.board.list(from_column).and_then(|l| l.item_id(from_row));
                if self
                    .board
                    .move_item(from_column, from_row, to_column, to_row, false)
                    .is_ok()
                {
                    let moved = moved.unwrap();
                    assert_eq!(
                        self.board.find_item(moved),
                        Some((to_column, to_row)),
                        "moved item must keep its identity"
                    );
                }
                0
            }
            Op::PointerDown { x, y } => {
                self.pointer(PointerAction::Down, x, y);
                0
            }
            Op::PointerMove { x, y } => {
                self.pointer(PointerAction::Move, x, y);
                0
            }
            Op::PointerUp => {
                let pos = self.board.pointer;
                self.pointer(PointerAction::Up, pos.x, pos.y);
                0
            }
            Op::PointerCancel => {
                let pos = self.board.pointer;
                self.pointer(PointerAction::Cancel, pos.x, pos.y);
                0
            }
            Op::StartItemDrag { id } => {
                self.board.start_item_drag(ItemId(id));
                0
            }
            Op::StartColumnDrag { index } => {
                self.board.start_column_drag(index);
                0
            }
            Op::CancelDrag => {
                self.board.cancel_drag();
                0
            }
            Op::AdvanceTime { ms } => {
                advance(&mut self.board, &mut self.clock, ms);
                0
            }
            Op::SetSnapOnScroll { snap } => {
                self.board.set_snap_on_scroll(snap);
                0
            }
            Op::SetSnapOnDrag { snap } => {
                self.board.set_snap_on_drag(snap);
                0
            }
            Op::SetSnapAnchor { anchor } => {
                self.board.set_snap_anchor(anchor);
                0
            }
            Op::SetColumnSpacing { spacing } => {
                self.board.set_column_spacing(spacing);
                0
            }
            Op::SetViewSize { width, height } => {
                self.board.set_view_size(DVec2::new(width, height), 1.);
                0
            }
        }
    }
}

#[track_caller]
fn check_ops(ops: impl IntoIterator<Item = Op>) -> TestBoard {
    let mut state = TestState::new();

    for op in ops {
        let before = state.board.item_count() as isize;
        let delta = state.apply(op);
        assert_eq!(
            state.board.item_count() as isize,
            before + delta,
            "item count must only change through structural edits, op: {op:?}"
        );
        state.board.verify_invariants();
    }

    state.board
}

#[test]
fn operations_on_empty_board() {
    check_ops([
        Op::PointerDown { x: 10., y: 10. },
        Op::PointerMove { x: 100., y: 10. },
        Op::PointerUp,
        Op::StartItemDrag { id: 1 },
        Op::StartColumnDrag { index: 0 },
        Op::RemoveColumn { index: 0 },
        Op::AdvanceTime { ms: 100 },
    ]);
}

#[test]
fn item_drag_across_every_column() {
    let board = check_ops([
        Op::AddColumn { items: 2 },
        Op::AddColumn { items: 1 },
        Op::AddColumn { items: 0 },
        Op::PointerDown { x: 20., y: 20. },
        Op::StartItemDrag { id: 1 },
        Op::PointerMove { x: 390., y: 20. },
        Op::AdvanceTime { ms: 0 },
        Op::AdvanceTime { ms: 50 },
        Op::AdvanceTime { ms: 1500 },
        Op::AdvanceTime { ms: 50 },
        Op::PointerMove { x: 200., y: 300. },
        Op::PointerUp,
        Op::AdvanceTime { ms: 1000 },
    ]);

    assert_eq!(board.item_count(), 3);
    assert!(board.find_item(ItemId(1)).is_some());
    assert!(!board.is_dragging());
}

#[test]
fn structural_snapshot() {
    let board = check_ops([
        Op::AddColumn { items: 2 },
        Op::AddColumn { items: 1 },
        Op::AddColumn { items: 0 },
        Op::MoveColumn { from: 0, to: 2 },
        Op::MoveItem {
            from_column: 2,
            from_row: 1,
            to_column: 1,
            to_row: 0,
        },
    ]);

    insta::assert_debug_snapshot!(snapshot(&board), @r"
    BoardSnapshot {
        scroll_x: 0,
        current_column: 2,
        columns: [
            [
                3,
            ],
            [
                2,
            ],
            [
                1,
            ],
        ],
    }
    ");
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        ..ProptestConfig::default()
    })]

    #[test]
    fn random_operations_dont_panic(ops: Vec<Op>) {
        check_ops(ops);
    }

    #[test]
    fn snapping_twice_is_stable(
        widths in prop::collection::vec(50f64..600., 1..6),
        spacing in 0f64..40.,
        edge in 0f64..40.,
        anchor in arbitrary_anchor(),
        start in 0f64..=1.,
    ) {
        let options = Options {
            column_spacing: spacing,
            board_edge: edge,
            snap_anchor: anchor,
            ..test_options()
        };
        let (mut board, _clock) = make_board(VIEW, &[], options);
        for width in widths {
            let properties = ColumnProperties {
                width: Some(ColumnWidth::Fixed(width)),
                ..Default::default()
            };
            board.add_column(RowList::new(Vec::new(), ROW_HEIGHT), properties).unwrap();
        }

        board.view_offset = ViewOffset::Static(board.max_scroll_x() * start);

        board.snap_to_closest_column(true);
        board.advance_animations();
        let first = board.scroll_x();

        board.snap_to_closest_column(true);
        board.advance_animations();
        prop_assert_eq!(board.scroll_x(), first);
    }
}
