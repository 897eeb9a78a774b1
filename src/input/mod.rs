use std::time::Duration;

use glam::DVec2;
use serde::{Deserialize, Serialize};

pub mod swipe_tracker;

/// Phase of a single-pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// A pointer or touch event in board view coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub pos: DVec2,
    /// Event timestamp, on the same timeline as the board clock.
    pub time: Duration,
}

impl PointerEvent {
    pub fn new(action: PointerAction, x: f64, y: f64, time: Duration) -> Self {
        Self {
            action,
            pos: DVec2::new(x, y),
            time,
        }
    }
}
