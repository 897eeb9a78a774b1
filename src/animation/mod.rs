use std::time::Duration;

use keyframe::functions::{EaseOutCubic, EaseOutQuad};
use keyframe::EasingFunction;

mod clock;

pub use self::clock::Clock;

/// Remaining distance in logical pixels below which a deceleration is considered finished.
const DECELERATION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct Animation {
    from: f64,
    to: f64,
    is_off: bool,
    duration: Duration,
    start_time: Duration,
    clock: Clock,
    kind: Kind,
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Easing {
        curve: Curve,
    },
    Deceleration {
        initial_velocity: f64,
        deceleration_rate: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
}

impl Animation {
    pub fn new(clock: Clock, from: f64, to: f64, config: dragboard_config::Animation) -> Self {
        let mut rv = Self::ease(
            clock,
            from,
            to,
            u64::from(config.duration_ms),
            Curve::from(config.curve),
        );

        if config.off {
            rv.is_off = true;
            rv.duration = Duration::ZERO;
        }

        rv
    }

    pub fn ease(clock: Clock, from: f64, to: f64, duration_ms: u64, curve: Curve) -> Self {
        let start_time = clock.now();

        Self {
            from,
            to,
            is_off: false,
            duration: Duration::from_millis(duration_ms),
            start_time,
            clock,
            kind: Kind::Easing { curve },
        }
    }

    /// Exponential deceleration from `initial_velocity` (units per second).
    ///
    /// `deceleration_rate` is the fraction of velocity kept after every millisecond.
    pub fn decelerate(
        clock: Clock,
        from: f64,
        initial_velocity: f64,
        deceleration_rate: f64,
    ) -> Self {
        let coeff = 1000. * deceleration_rate.ln();
        let duration_s = if initial_velocity == 0. || coeff >= 0. {
            0.
        } else {
            let s = (-coeff * DECELERATION_THRESHOLD / initial_velocity.abs()).ln() / coeff;
            s.max(0.)
        };
        let to = if coeff < 0. {
            from - initial_velocity / coeff
        } else {
            from
        };

        let start_time = clock.now();

        Self {
            from,
            to,
            is_off: false,
            duration: Duration::from_secs_f64(duration_s),
            start_time,
            clock,
            kind: Kind::Deceleration {
                initial_velocity,
                deceleration_rate,
            },
        }
    }

    pub fn is_done(&self) -> bool {
        if self.is_off {
            return true;
        }

        self.clock.now() >= self.start_time + self.duration
    }

    pub fn value(&self) -> f64 {
        if self.is_done() {
            return self.to;
        }

        let passed = self.clock.now().saturating_sub(self.start_time);

        match self.kind {
            Kind::Easing { curve } => {
                let x = passed.as_secs_f64() / self.duration.as_secs_f64();
                curve.y(x) * (self.to - self.from) + self.from
            }
            Kind::Deceleration {
                initial_velocity,
                deceleration_rate,
            } => {
                let coeff = 1000. * deceleration_rate.ln();
                let t = passed.as_secs_f64();
                self.from + initial_velocity * ((coeff * t).exp() - 1.) / coeff
            }
        }
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Curve {
    pub fn y(self, x: f64) -> f64 {
        match self {
            Curve::Linear => x,
            Curve::EaseOutQuad => EaseOutQuad.y(x),
            Curve::EaseOutCubic => EaseOutCubic.y(x),
            Curve::EaseOutExpo => 1. - 2f64.powf(-10. * x),
        }
    }
}

impl From<dragboard_config::Curve> for Curve {
    fn from(value: dragboard_config::Curve) -> Self {
        match value {
            dragboard_config::Curve::Linear => Curve::Linear,
            dragboard_config::Curve::EaseOutQuad => Curve::EaseOutQuad,
            dragboard_config::Curve::EaseOutCubic => Curve::EaseOutCubic,
            dragboard_config::Curve::EaseOutExpo => Curve::EaseOutExpo,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn config(duration_ms: u32) -> dragboard_config::Animation {
        dragboard_config::Animation {
            off: false,
            duration_ms,
            curve: dragboard_config::Curve::Linear,
        }
    }

    #[test]
    fn linear_progress() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::new(clock.clone(), 100., 200., config(100));

        assert_eq!(anim.value(), 100.);
        clock.set_unadjusted(Duration::from_millis(25));
        assert_abs_diff_eq!(anim.value(), 125., epsilon = 1e-9);
        clock.set_unadjusted(Duration::from_millis(100));
        assert!(anim.is_done());
        assert_eq!(anim.value(), 200.);
    }

    #[test]
    fn off_completes_immediately() {
        let clock = Clock::with_time(Duration::ZERO);
        let mut config = config(300);
        config.off = true;

        let anim = Animation::new(clock, 0., 10., config);
        assert!(anim.is_done());
        assert_eq!(anim.value(), 10.);
    }

    #[test]
    fn deceleration_converges_to_projected_end() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::decelerate(clock.clone(), 0., 1000., 0.997);

        let coeff = 1000. * 0.997f64.ln();
        assert_abs_diff_eq!(anim.to(), -1000. / coeff, epsilon = 1e-9);
        assert!(anim.to() > 0.);

        clock.set_unadjusted(Duration::from_millis(100));
        let mid = anim.value();
        assert!(mid > 0. && mid < anim.to());

        clock.set_unadjusted(anim.duration());
        assert!(anim.is_done());
        assert_eq!(anim.value(), anim.to());
    }

    #[test]
    fn zero_velocity_deceleration_is_done() {
        let clock = Clock::with_time(Duration::ZERO);
        let anim = Animation::decelerate(clock, 42., 0., 0.997);
        assert!(anim.is_done());
        assert_eq!(anim.value(), 42.);
    }
}
