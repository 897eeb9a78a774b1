use crate::FloatOrInt;

/// Fallback column width when the config sets neither a proportion nor a fixed width.
const DEFAULT_COLUMN_PROPORTION: f64 = 0.87;

#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Board {
    #[knuffel(child, default)]
    pub default_column_width: ColumnWidthPart,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(0.))]
    pub column_spacing: FloatOrInt<0, 65535>,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(0.))]
    pub board_edge: FloatOrInt<0, 65535>,
    #[knuffel(child, unwrap(argument), default)]
    pub snap_anchor: SnapAnchor,
    #[knuffel(child, unwrap(argument), default = true)]
    pub snap_on_scroll: bool,
    #[knuffel(child, unwrap(argument), default = true)]
    pub snap_on_drag: bool,
    #[knuffel(child, unwrap(argument), default = false)]
    pub snap_in_landscape: bool,
    #[knuffel(child, unwrap(argument), default = DragEntrance::SnapToTouch)]
    pub drag_entrance: DragEntrance,
    #[knuffel(child, unwrap(argument), default = DragEntrance::SnapToOrigin)]
    pub column_drag_entrance: DragEntrance,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(64.))]
    pub row_height: FloatOrInt<1, 65535>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            default_column_width: ColumnWidthPart::default(),
            column_spacing: FloatOrInt(0.),
            board_edge: FloatOrInt(0.),
            snap_anchor: SnapAnchor::default(),
            snap_on_scroll: true,
            snap_on_drag: true,
            snap_in_landscape: false,
            drag_entrance: DragEntrance::SnapToTouch,
            column_drag_entrance: DragEntrance::SnapToOrigin,
            row_height: FloatOrInt(64.),
        }
    }
}

/// Column width as written in the config.
///
/// `fixed` wins over `proportion` when both are present.
#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq)]
pub struct ColumnWidthPart {
    #[knuffel(child, unwrap(argument))]
    pub proportion: Option<FloatOrInt<0, 1>>,
    #[knuffel(child, unwrap(argument))]
    pub fixed: Option<FloatOrInt<1, 65535>>,
}

impl ColumnWidthPart {
    pub fn resolve(&self) -> ColumnWidth {
        if let Some(fixed) = self.fixed {
            return ColumnWidth::Fixed(fixed.0);
        }

        ColumnWidth::Proportion(self.proportion.map_or(DEFAULT_COLUMN_PROPORTION, |p| p.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    /// Fraction of the board view width.
    Proportion(f64),
    /// Width in logical pixels.
    Fixed(f64),
}

impl Default for ColumnWidth {
    fn default() -> Self {
        Self::Proportion(DEFAULT_COLUMN_PROPORTION)
    }
}

impl ColumnWidth {
    pub fn resolve(self, view_width: f64) -> f64 {
        match self {
            ColumnWidth::Proportion(proportion) => (view_width * proportion).floor(),
            ColumnWidth::Fixed(width) => width,
        }
    }
}

/// Which part of a column lines up with the same part of the view when snapping.
#[derive(knuffel::DecodeScalar, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SnapAnchor {
    Left,
    #[default]
    Center,
    Right,
}

/// How the drag ghost appears when a drag starts.
#[derive(knuffel::DecodeScalar, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEntrance {
    /// The ghost centers under the pointer, animating there from the original position.
    SnapToTouch,
    /// The ghost stays exactly over the original and follows pointer deltas.
    SnapToOrigin,
}
