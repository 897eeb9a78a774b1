use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Shareable clock driving every animation of a board.
///
/// A default clock follows monotonic time. Tests and replays create a clock with
/// [`Clock::with_time`] and move it forward by hand.
#[derive(Debug, Clone)]
pub struct Clock {
    inner: Rc<RefCell<ClockInner>>,
}

#[derive(Debug)]
struct ClockInner {
    source: TimeSource,
}

#[derive(Debug)]
enum TimeSource {
    Monotonic(Instant),
    Manual(Duration),
}

impl Default for Clock {
    fn default() -> Self {
        Self::from_source(TimeSource::Monotonic(Instant::now()))
    }
}

impl Clock {
    /// Creates a manually driven clock starting at `time`.
    pub fn with_time(time: Duration) -> Self {
        Self::from_source(TimeSource::Manual(time))
    }

    fn from_source(source: TimeSource) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ClockInner { source })),
        }
    }

    pub fn now(&self) -> Duration {
        match self.inner.borrow().source {
            TimeSource::Monotonic(start) => start.elapsed(),
            TimeSource::Manual(time) => time,
        }
    }

    /// Pins the clock to `time`, switching it to manual mode.
    pub fn set_unadjusted(&mut self, time: Duration) {
        self.inner.borrow_mut().source = TimeSource::Manual(time);
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Clock {}
