//! Driving a board from a calloop event loop.
//!
//! The board never arms timers itself. After delivering input, the host calls [`schedule`],
//! which turns pending auto-scroll requests and running animations into loop timers.

use std::time::Duration;

use calloop::timer::{TimeoutAction, Timer};
use calloop::{LoopHandle, RegistrationToken};

use crate::layout::list::DragList;
use crate::layout::Board;

/// Interval between animation frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Event loop state owning a board.
pub trait BoardHost: Sized + 'static {
    type List: DragList + 'static;

    fn board(&mut self) -> &mut Board<Self::List>;

    fn timers(&mut self) -> &mut BoardTimers;
}

/// Loop timers running on behalf of one board.
#[derive(Debug, Default)]
pub struct BoardTimers {
    auto_scroll: Option<RegistrationToken>,
    frame: Option<RegistrationToken>,
}

impl BoardTimers {
    /// Whether no timer is armed.
    pub fn is_idle(&self) -> bool {
        self.auto_scroll.is_none() && self.frame.is_none()
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.auto_scroll.is_some()
    }

    /// Removes every armed timer.
    pub fn cancel<S>(&mut self, handle: &LoopHandle<'static, S>) {
        if let Some(token) = self.auto_scroll.take() {
            handle.remove(token);
        }
        if let Some(token) = self.frame.take() {
            handle.remove(token);
        }
    }
}

/// Arms the timers the board needs after a batch of input.
pub fn schedule<S: BoardHost>(handle: &LoopHandle<'static, S>, state: &mut S) {
    let board = state.board();
    if board.take_auto_scroll_request() {
        let interval = board.auto_scroll_interval();
        schedule_auto_scroll(handle, state, interval);
    }

    ensure_frames(handle, state);
}

fn schedule_auto_scroll<S: BoardHost>(
    handle: &LoopHandle<'static, S>,
    state: &mut S,
    interval: Duration,
) {
    // The board asks for a new chain only after the previous one ended.
    if let Some(token) = state.timers().auto_scroll.take() {
        handle.remove(token);
    }

    let handle_ = handle.clone();
    let res = handle.insert_source(Timer::immediate(), move |_, _, state: &mut S| {
        let keep_going = state.board().on_auto_scroll_tick();

        // Column steps and target changes start animations.
        ensure_frames(&handle_, state);

        if keep_going {
            TimeoutAction::ToDuration(interval)
        } else {
            trace!("auto-scroll timer finished");
            state.timers().auto_scroll = None;
            TimeoutAction::Drop
        }
    });

    match res {
        Ok(token) => state.timers().auto_scroll = Some(token),
        Err(err) => warn!("error inserting auto-scroll timer: {}", err.error),
    }
}

/// Arms the frame timer if the board is animating and no frame timer runs yet.
pub fn ensure_frames<S: BoardHost>(handle: &LoopHandle<'static, S>, state: &mut S) {
    if state.timers().frame.is_some() || !state.board().are_animations_ongoing() {
        return;
    }

    let timer = Timer::from_duration(FRAME_INTERVAL);
    let res = handle.insert_source(timer, |_, _, state: &mut S| {
        let board = state.board();
        board.advance_animations();

        if board.are_animations_ongoing() {
            TimeoutAction::ToDuration(FRAME_INTERVAL)
        } else {
            state.timers().frame = None;
            TimeoutAction::Drop
        }
    });

    match res {
        Ok(token) => state.timers().frame = Some(token),
        Err(err) => warn!("error inserting frame timer: {}", err.error),
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use calloop::EventLoop;
    use glam::DVec2;

    use super::*;
    use crate::animation::Clock;
    use crate::input::{PointerAction, PointerEvent};
    use crate::layout::column::ColumnProperties;
    use crate::layout::list::{BoardItem, ItemId, RowList};
    use crate::layout::Options;

    #[derive(Debug)]
    struct Card(u64);

    impl BoardItem for Card {
        fn id(&self) -> ItemId {
            ItemId(self.0)
        }
    }

    struct Host {
        board: Board<RowList<Card>>,
        timers: BoardTimers,
    }

    impl BoardHost for Host {
        type List = RowList<Card>;

        fn board(&mut self) -> &mut Board<RowList<Card>> {
            &mut self.board
        }

        fn timers(&mut self) -> &mut BoardTimers {
            &mut self.timers
        }
    }

    fn host() -> Host {
        let mut options = Options {
            snap_on_drag: false,
            snap_on_scroll: false,
            ..Options::default()
        };
        options.animations.off = true;
        options.column_width = dragboard_config::ColumnWidth::Fixed(300.);

        let mut board = Board::new(
            DVec2::new(400., 800.),
            1.,
            Clock::default(),
            Rc::new(options),
        );
        let mut next_id = 1;
        for count in [2, 1, 1] {
            let items = (0..count)
                .map(|_| {
                    next_id += 1;
                    Card(next_id - 1)
                })
                .collect();
            board
                .add_column(RowList::new(items, 50.), ColumnProperties::default())
                .unwrap();
        }

        Host {
            board,
            timers: BoardTimers::default(),
        }
    }

    fn send(host: &mut Host, action: PointerAction, x: f64, y: f64) {
        let time = host.board.clock().now();
        host.board
            .handle_pointer(PointerEvent::new(action, x, y, time));
    }

    #[test]
    fn auto_scroll_timer_runs_until_release() {
        let mut event_loop: EventLoop<'static, Host> = EventLoop::try_new().unwrap();
        let handle = event_loop.handle();
        let mut host = host();

        send(&mut host, PointerAction::Down, 100., 20.);
        assert!(host.board.start_item_drag(ItemId(1)));
        send(&mut host, PointerAction::Move, 390., 20.);
        schedule(&handle, &mut host);
        assert!(host.timers.is_auto_scrolling());

        event_loop
            .dispatch(Some(Duration::from_millis(50)), &mut host)
            .unwrap();
        assert!(host.board.scroll_x() > 0.);

        send(&mut host, PointerAction::Up, 390., 20.);
        schedule(&handle, &mut host);

        for _ in 0..50 {
            if host.timers.is_idle() {
                break;
            }
            event_loop
                .dispatch(Some(Duration::from_millis(20)), &mut host)
                .unwrap();
        }
        assert!(host.timers.is_idle());

        let scroll = host.board.scroll_x();
        event_loop
            .dispatch(Some(Duration::from_millis(30)), &mut host)
            .unwrap();
        assert_eq!(host.board.scroll_x(), scroll);
    }

    #[test]
    fn idle_board_arms_nothing() {
        let event_loop: EventLoop<'static, Host> = EventLoop::try_new().unwrap();
        let mut host = host();

        schedule(&event_loop.handle(), &mut host);
        assert!(host.timers.is_idle());
    }
}
