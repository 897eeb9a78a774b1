//! Repeating edge scroll during drags.
//!
//! The scroller itself only keeps the schedule. Every tick yields an [`AutoScrollStep`] that the
//! board applies and follows with a drag target update. Ticks come from a repeating timer
//! (see `crate::runtime`) or from [`super::Board::advance_auto_scroll`] on a manual clock.

use std::time::Duration;

use super::types::ScrollDirection;

/// How a tick moves the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoScrollMode {
    /// Continuous scroll by a fixed distance every tick.
    Position,
    /// Whole-column steps, limited by a cooldown.
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutoScrollStep {
    /// Scroll the view by this many logical pixels.
    Position(f64),
    /// Move the current column by this many columns, zero while cooling down.
    Column(i32),
}

#[derive(Debug)]
pub struct AutoScroller {
    mode: AutoScrollMode,
    is_auto_scrolling: bool,
    direction: ScrollDirection,
    /// Distance of one position step in logical pixels.
    speed: f64,
    interval: Duration,
    column_cooldown: Duration,
    last_column_step: Option<Duration>,
    /// Deadline of the next tick while a repeat chain is alive.
    next_tick: Option<Duration>,
}

impl AutoScroller {
    pub fn new(config: &dragboard_config::AutoScroll) -> Self {
        Self {
            mode: AutoScrollMode::Position,
            is_auto_scrolling: false,
            direction: ScrollDirection::Right,
            speed: config.speed.0,
            interval: Duration::from_millis(u64::from(config.interval_ms.max(1))),
            column_cooldown: Duration::from_millis(u64::from(config.column_cooldown_ms)),
            last_column_step: None,
            next_tick: None,
        }
    }

    pub fn update_config(&mut self, config: &dragboard_config::AutoScroll) {
        self.speed = config.speed.0;
        self.interval = Duration::from_millis(u64::from(config.interval_ms.max(1)));
        self.column_cooldown = Duration::from_millis(u64::from(config.column_cooldown_ms));
    }

    pub fn mode(&self) -> AutoScrollMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: AutoScrollMode) {
        self.mode = mode;
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.is_auto_scrolling
    }

    pub fn direction(&self) -> Option<ScrollDirection> {
        self.is_auto_scrolling.then_some(self.direction)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_tick(&self) -> Option<Duration> {
        self.next_tick
    }

    /// Starts scrolling toward `direction`, with the first tick due at `now`.
    ///
    /// Does nothing if already scrolling. Returns `true` when a new repeat chain must be
    /// scheduled; a chain left over from a recent stop is reused instead.
    pub fn start(&mut self, direction: ScrollDirection, now: Duration) -> bool {
        if self.is_auto_scrolling {
            return false;
        }

        trace!(?direction, "starting auto-scroll");
        self.is_auto_scrolling = true;
        self.direction = direction;

        if self.next_tick.is_some() {
            return false;
        }
        self.next_tick = Some(now);
        true
    }

    /// Stops scrolling. The next scheduled tick ends the repeat chain.
    pub fn stop(&mut self) {
        if self.is_auto_scrolling {
            trace!("stopping auto-scroll");
        }
        self.is_auto_scrolling = false;
    }

    /// Runs one tick at `now`.
    ///
    /// Returns `None` once stopped, which also ends the repeat chain.
    pub fn tick(&mut self, now: Duration) -> Option<AutoScrollStep> {
        if !self.is_auto_scrolling {
            self.next_tick = None;
            return None;
        }

        self.next_tick = Some(now + self.interval);

        let step = match self.mode {
            AutoScrollMode::Position => AutoScrollStep::Position(self.direction.sign() * self.speed),
            AutoScrollMode::Column => {
                let ready = self
                    .last_column_step
                    .map_or(true, |last| now.saturating_sub(last) > self.column_cooldown);
                if ready {
                    self.last_column_step = Some(now);
                    AutoScrollStep::Column(self.direction.sign() as i32)
                } else {
                    AutoScrollStep::Column(0)
                }
            }
        };
        Some(step)
    }
}
