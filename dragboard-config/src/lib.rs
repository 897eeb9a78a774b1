//! Board configuration, written in KDL.
//!
//! ```kdl
//! board {
//!     default-column-width { proportion 0.87; }
//!     column-spacing 16
//!     snap-anchor "left"
//! }
//! ```

use std::ffi::OsStr;
use std::path::Path;

use miette::{Context, IntoDiagnostic};
use tracing::debug;

mod animations;
mod board;
mod gestures;
pub mod utils;

pub use crate::animations::{Animation, AnimationPart, Animations, Curve};
pub use crate::board::{Board, ColumnWidth, ColumnWidthPart, DragEntrance, SnapAnchor};
pub use crate::gestures::{AutoScroll, Gestures};
pub use crate::utils::FloatOrInt;

#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub board: Board,
    #[knuffel(child, default)]
    pub auto_scroll: AutoScroll,
    #[knuffel(child, default)]
    pub animations: Animations,
    #[knuffel(child, default)]
    pub gestures: Gestures,
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let config = Self::parse(
            path.file_name()
                .and_then(OsStr::to_str)
                .unwrap_or("config.kdl"),
            &contents,
        )
        .context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        knuffel::parse(filename, text)
    }
}
