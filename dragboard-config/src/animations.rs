const VIEW_SCROLL_DURATION_MS: u32 = 325;
const GHOST_DURATION_MS: u32 = 250;
const COLUMN_SLIDE_DURATION_MS: u32 = 350;

#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq)]
pub struct Animations {
    #[knuffel(child)]
    pub off: bool,
    #[knuffel(child, default)]
    pub view_scroll: AnimationPart,
    #[knuffel(child, default)]
    pub ghost_entrance: AnimationPart,
    #[knuffel(child, default)]
    pub ghost_drop: AnimationPart,
    #[knuffel(child, default)]
    pub column_slide: AnimationPart,
}

impl Animations {
    pub fn view_scroll(&self) -> Animation {
        self.view_scroll.resolve(self.off, VIEW_SCROLL_DURATION_MS)
    }

    pub fn ghost_entrance(&self) -> Animation {
        self.ghost_entrance.resolve(self.off, GHOST_DURATION_MS)
    }

    pub fn ghost_drop(&self) -> Animation {
        self.ghost_drop.resolve(self.off, GHOST_DURATION_MS)
    }

    pub fn column_slide(&self) -> Animation {
        self.column_slide.resolve(self.off, COLUMN_SLIDE_DURATION_MS)
    }
}

#[derive(knuffel::Decode, Debug, Default, Clone, Copy, PartialEq)]
pub struct AnimationPart {
    #[knuffel(child)]
    pub off: bool,
    #[knuffel(child, unwrap(argument))]
    pub duration_ms: Option<u32>,
    #[knuffel(child, unwrap(argument))]
    pub curve: Option<Curve>,
}

impl AnimationPart {
    fn resolve(&self, all_off: bool, default_duration_ms: u32) -> Animation {
        Animation {
            off: all_off || self.off,
            duration_ms: self.duration_ms.unwrap_or(default_duration_ms),
            curve: self.curve.unwrap_or_default(),
        }
    }
}

/// Fully resolved animation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub off: bool,
    pub duration_ms: u32,
    pub curve: Curve,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            off: false,
            duration_ms: GHOST_DURATION_MS,
            curve: Curve::default(),
        }
    }
}

#[derive(knuffel::DecodeScalar, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    #[default]
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
}
