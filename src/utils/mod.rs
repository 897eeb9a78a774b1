use glam::DVec2;

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    pub loc: DVec2,
    pub size: DVec2,
}

impl Rectangle {
    pub fn new(loc: DVec2, size: DVec2) -> Self {
        Self { loc, size }
    }

    pub fn from_size(size: DVec2) -> Self {
        Self {
            loc: DVec2::ZERO,
            size,
        }
    }

    pub fn center(&self) -> DVec2 {
        self.loc + self.size / 2.
    }

    pub fn translated(self, by: DVec2) -> Self {
        Self {
            loc: self.loc + by,
            size: self.size,
        }
    }

    /// Rectangle of the same size centered on `center`.
    pub fn centered_at(self, center: DVec2) -> Self {
        Self {
            loc: center - self.size / 2.,
            size: self.size,
        }
    }
}

/// Rounds a logical coordinate to the physical pixel grid of `scale`.
pub fn round_logical_in_physical(scale: f64, logical: f64) -> f64 {
    (logical * scale).round() / scale
}
