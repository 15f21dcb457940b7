use super::{StarfieldConfig, Viewport};
use crate::RandSource;
use core::f64::consts::TAU;

/// A twinkling point star.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// Radius in device pixels.
    pub radius: f64,
    /// Flicker angular speed, radians per second.
    pub twinkle: f64,
    pub base_alpha: f64,
    pub phase: f64,
}

impl Star {
    pub(crate) fn scatter<R: RandSource>(
        rng: &mut R,
        viewport: &Viewport,
        config: &StarfieldConfig,
    ) -> Self {
        let [r_lo, r_hi] = config.star_radius;
        let [tw_lo, tw_hi] = config.twinkle_speed;
        let [a_lo, a_hi] = config.base_alpha;
        Self {
            x: rng.range(0.0, viewport.width),
            y: rng.range(0.0, viewport.height),
            radius: rng.range(r_lo, r_hi) * viewport.dpr,
            twinkle: rng.range(tw_lo, tw_hi),
            base_alpha: rng.range(a_lo, a_hi),
            phase: rng.unit() * TAU,
        }
    }

    /// Flicker level in `[0, 1]` at animation time `t` seconds.
    pub fn flicker(&self, t: f64) -> f64 {
        ((self.phase + t * self.twinkle).sin() + 1.0) / 2.0
    }

    /// Opacity at animation time `t`; never below 60% of `base_alpha`.
    pub fn alpha(&self, t: f64) -> f64 {
        self.base_alpha * (0.6 + 0.4 * self.flicker(t))
    }
}
