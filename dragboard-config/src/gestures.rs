use crate::FloatOrInt;

/// Edge-triggered scrolling while something is being dragged.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct AutoScroll {
    /// Pixels per tick in position mode, before applying the display scale.
    #[knuffel(child, unwrap(argument), default = FloatOrInt(8.))]
    pub speed: FloatOrInt<0, 1000>,
    #[knuffel(child, unwrap(argument), default = 12)]
    pub interval_ms: u32,
    /// Minimum time between two column steps in column mode.
    #[knuffel(child, unwrap(argument), default = 1000)]
    pub column_cooldown_ms: u32,
    /// Width of the edge zones as a fraction of the view width.
    #[knuffel(child, unwrap(argument), default = FloatOrInt(0.06))]
    pub edge_portrait: FloatOrInt<0, 1>,
    #[knuffel(child, unwrap(argument), default = FloatOrInt(0.14))]
    pub edge_landscape: FloatOrInt<0, 1>,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self {
            speed: FloatOrInt(8.),
            interval_ms: 12,
            column_cooldown_ms: 1000,
            edge_portrait: FloatOrInt(0.06),
            edge_landscape: FloatOrInt(0.14),
        }
    }
}

#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Gestures {
    /// Release velocity in logical pixels per second above which a scroll counts as a fling.
    #[knuffel(child, unwrap(argument), default = FloatOrInt(50.))]
    pub fling_min_velocity: FloatOrInt<0, 100000>,
    /// Per-millisecond velocity retention of a free (non-snapping) fling.
    #[knuffel(child, unwrap(argument), default = FloatOrInt(0.997))]
    pub fling_deceleration: FloatOrInt<0, 1>,
}

impl Default for Gestures {
    fn default() -> Self {
        Self {
            fling_min_velocity: FloatOrInt(50.),
            fling_deceleration: FloatOrInt(0.997),
        }
    }
}
