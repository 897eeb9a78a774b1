//! Replaying recorded pointer traces against a demo board.
//!
//! A trace is a JSON array of steps, each scheduled at its offset from the start of the replay:
//!
//! ```json
//! [
//!     { "kind": "down", "at_ms": 0, "x": 100, "y": 20 },
//!     { "kind": "start-item-drag", "at_ms": 0, "item": 1 },
//!     { "kind": "move", "at_ms": 50, "x": 350, "y": 20 },
//!     { "kind": "up", "at_ms": 100, "x": 350, "y": 20 }
//! ]
//! ```

use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, LoopSignal};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::animation::Clock;
use crate::input::{PointerAction, PointerEvent};
use crate::layout::column::ColumnProperties;
use crate::layout::list::{BoardItem, ItemId, RowList};
use crate::layout::types::BoardEvent;
use crate::layout::{Board, Options};
use crate::runtime::{self, BoardHost, BoardTimers};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TraceStep {
    Down { at_ms: u64, x: f64, y: f64 },
    Move { at_ms: u64, x: f64, y: f64 },
    Up { at_ms: u64, x: f64, y: f64 },
    Cancel { at_ms: u64, x: f64, y: f64 },
    StartItemDrag { at_ms: u64, item: u64 },
    StartColumnDrag { at_ms: u64, column: usize },
}

impl TraceStep {
    pub fn at(&self) -> Duration {
        let at_ms = match *self {
            TraceStep::Down { at_ms, .. }
            | TraceStep::Move { at_ms, .. }
            | TraceStep::Up { at_ms, .. }
            | TraceStep::Cancel { at_ms, .. }
            | TraceStep::StartItemDrag { at_ms, .. }
            | TraceStep::StartColumnDrag { at_ms, .. } => at_ms,
        };
        Duration::from_millis(at_ms)
    }
}

/// Reads a trace from a JSON file.
pub fn load_trace(path: &Path) -> anyhow::Result<Vec<TraceStep>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("error reading {path:?}"))?;
    serde_json::from_str(&text).with_context(|| format!("error parsing trace {path:?}"))
}

/// Shape of the demo board a trace runs against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardSetup {
    pub columns: usize,
    pub items_per_column: usize,
    pub view_size: DVec2,
    pub scale: f64,
}

#[derive(Debug)]
pub struct DemoItem {
    id: ItemId,
}

impl BoardItem for DemoItem {
    fn id(&self) -> ItemId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutcome {
    pub events: Vec<BoardEvent>,
    /// Item ids of every column, in display order.
    pub columns: Vec<Vec<u64>>,
    pub current_column: usize,
    pub scroll_x: f64,
}

struct ReplayState {
    board: Board<RowList<DemoItem>>,
    timers: BoardTimers,
    remaining: usize,
    signal: LoopSignal,
}

impl BoardHost for ReplayState {
    type List = RowList<DemoItem>;

    fn board(&mut self) -> &mut Board<RowList<DemoItem>> {
        &mut self.board
    }

    fn timers(&mut self) -> &mut BoardTimers {
        &mut self.timers
    }
}

impl ReplayState {
    fn apply(&mut self, step: TraceStep) {
        let now = self.board.clock().now();
        let pointer = |action, x, y| PointerEvent::new(action, x, y, now);

        match step {
            TraceStep::Down { x, y, .. } => {
                self.board.handle_pointer(pointer(PointerAction::Down, x, y));
            }
            TraceStep::Move { x, y, .. } => {
                self.board.handle_pointer(pointer(PointerAction::Move, x, y));
            }
            TraceStep::Up { x, y, .. } => {
                self.board.handle_pointer(pointer(PointerAction::Up, x, y));
            }
            TraceStep::Cancel { x, y, .. } => {
                self.board.handle_pointer(pointer(PointerAction::Cancel, x, y));
            }
            TraceStep::StartItemDrag { item, .. } => {
                if !self.board.start_item_drag(ItemId(item)) {
                    warn!(item, "item drag did not start");
                }
            }
            TraceStep::StartColumnDrag { column, .. } => {
                if !self.board.start_column_drag(column) {
                    warn!(column, "column drag did not start");
                }
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.remaining == 0 && self.timers.is_idle()
    }
}

fn demo_board(setup: &BoardSetup, options: Rc<Options>) -> anyhow::Result<Board<RowList<DemoItem>>> {
    let row_height = options.row_height;
    let mut board = Board::new(setup.view_size, setup.scale, Clock::default(), options);

    let mut next_id = 1;
    for _ in 0..setup.columns {
        let items = (next_id..next_id + setup.items_per_column as u64)
            .map(|id| DemoItem { id: ItemId(id) })
            .collect();
        next_id += setup.items_per_column as u64;

        let properties = ColumnProperties {
            has_drag_handle: true,
            ..Default::default()
        };
        board.add_column(RowList::new(items, row_height), properties)?;
    }

    Ok(board)
}

/// Runs `steps` against a fresh demo board in real time, returning what happened.
pub fn replay(
    setup: &BoardSetup,
    options: Rc<Options>,
    steps: Vec<TraceStep>,
) -> anyhow::Result<ReplayOutcome> {
    let mut event_loop: EventLoop<'static, ReplayState> =
        EventLoop::try_new().context("error creating event loop")?;
    let handle = event_loop.handle();

    let mut board = demo_board(setup, options)?;
    let events = board.subscribe();

    let mut state = ReplayState {
        board,
        timers: BoardTimers::default(),
        remaining: steps.len(),
        signal: event_loop.get_signal(),
    };

    let start = Instant::now();
    for step in steps {
        let timer = Timer::from_deadline(start + step.at());
        let handle_ = handle.clone();
        handle
            .insert_source(timer, move |_, _, state| {
                trace!(?step, "replaying trace step");
                state.apply(step);
                runtime::schedule(&handle_, state);
                state.remaining -= 1;
                TimeoutAction::Drop
            })
            .map_err(|err| anyhow!("error scheduling trace step: {}", err.error))?;
    }

    if !state.is_finished() {
        event_loop
            .run(None, &mut state, |state| {
                if state.is_finished() {
                    state.signal.stop();
                }
            })
            .context("error running event loop")?;
    }

    if state.board.is_dragging() {
        warn!("trace ended in the middle of a drag");
    }

    let board = &state.board;
    let columns = board
        .columns()
        .map(|column| {
            column
                .list()
                .items()
                .iter()
                .map(|item| item.id.get())
                .collect()
        })
        .collect();

    let mut outcome = ReplayOutcome {
        events: Vec::new(),
        columns,
        current_column: board.current_column(),
        scroll_x: board.scroll_x(),
    };
    while let Ok(event) = events.try_recv() {
        outcome.events.push(event);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use dragboard_config::ColumnWidth;

    use super::*;

    fn setup() -> BoardSetup {
        BoardSetup {
            columns: 2,
            items_per_column: 3,
            view_size: DVec2::new(400., 800.),
            scale: 1.,
        }
    }

    fn options() -> Rc<Options> {
        let mut options = Options {
            column_width: ColumnWidth::Fixed(300.),
            row_height: 50.,
            ..Options::default()
        };
        options.animations.off = true;
        Rc::new(options)
    }

    #[test]
    fn parses_trace_steps() {
        let steps: Vec<TraceStep> = serde_json::from_str(
            r#"[
                { "kind": "down", "at_ms": 0, "x": 100, "y": 20.5 },
                { "kind": "start-column-drag", "at_ms": 5, "column": 1 },
                { "kind": "cancel", "at_ms": 10, "x": 0, "y": 0 }
            ]"#,
        )
        .unwrap();

        assert_eq!(
            steps,
            [
                TraceStep::Down {
                    at_ms: 0,
                    x: 100.,
                    y: 20.5
                },
                TraceStep::StartColumnDrag {
                    at_ms: 5,
                    column: 1
                },
                TraceStep::Cancel {
                    at_ms: 10,
                    x: 0.,
                    y: 0.
                },
            ]
        );
        assert_eq!(steps[1].at(), Duration::from_millis(5));
    }

    #[test]
    fn replays_item_drag_between_columns() {
        let steps = vec![
            TraceStep::Down {
                at_ms: 0,
                x: 100.,
                y: 20.,
            },
            TraceStep::StartItemDrag { at_ms: 0, item: 1 },
            TraceStep::Move {
                at_ms: 10,
                x: 350.,
                y: 20.,
            },
            TraceStep::Up {
                at_ms: 20,
                x: 350.,
                y: 20.,
            },
        ];

        let outcome = replay(&setup(), options(), steps).unwrap();

        assert_eq!(outcome.columns, [vec![2, 3], vec![1, 4, 5, 6]]);
        assert_eq!(outcome.current_column, 1);
        assert_eq!(
            outcome.events.first(),
            Some(&BoardEvent::ItemDragStarted { column: 0, row: 0 })
        );
        assert!(outcome.events.contains(&BoardEvent::ItemDragEnded {
            from_column: 0,
            from_row: 0,
            to_column: 1,
            to_row: 0,
        }));
    }

    #[test]
    fn empty_trace_returns_initial_board() {
        let outcome = replay(&setup(), options(), Vec::new()).unwrap();

        assert!(outcome.events.is_empty());
        assert_eq!(outcome.columns, [vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(outcome.scroll_x, 0.);
    }
}
