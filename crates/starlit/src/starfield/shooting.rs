use super::{Point, StarfieldConfig, Viewport};
use crate::RandSource;

/// A shooting star crossing the sky in a straight line.
#[derive(Clone, Debug, PartialEq)]
pub struct ShootingStar {
    /// Head position.
    pub x: f64,
    pub y: f64,
    /// Trail length in device pixels.
    pub length: f64,
    /// Heading in radians.
    pub angle: f64,
    /// Device pixels per second.
    pub speed: f64,
    /// Seconds since spawn.
    pub life: f64,
    /// Seconds to live.
    pub ttl: f64,
}

impl ShootingStar {
    pub(crate) fn spawn<R: RandSource>(
        rng: &mut R,
        viewport: &Viewport,
        config: &StarfieldConfig,
    ) -> Self {
        let [len_lo, len_hi] = config.shooting_length;
        let [ang_lo, ang_hi] = config.shooting_angle;
        let [spd_lo, spd_hi] = config.shooting_speed;
        let [ttl_lo, ttl_hi] = config.shooting_ttl;
        Self {
            x: rng.range(0.1 * viewport.width, 0.9 * viewport.width),
            y: rng.range(0.05 * viewport.height, 0.45 * viewport.height),
            length: rng.range(len_lo, len_hi) * viewport.dpr,
            angle: rng.range(ang_lo, ang_hi),
            speed: rng.range(spd_lo, spd_hi) * viewport.dpr,
            life: 0.0,
            ttl: rng.range(ttl_lo, ttl_hi),
        }
    }

    /// Ages the star by `dt` seconds and moves it along its heading.
    ///
    /// Returns `false` once the star has outlived its ttl; it is not moved on
    /// that step.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.life += dt;
        if self.life > self.ttl {
            return false;
        }
        let (sin, cos) = self.angle.sin_cos();
        self.x += cos * self.speed * dt;
        self.y += sin * self.speed * dt;
        true
    }

    /// Remaining brightness, `1` at spawn falling linearly to `0` at ttl.
    pub fn fade(&self) -> f64 {
        (1.0 - self.life / self.ttl).max(0.0)
    }

    pub fn head(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// End of the trail, `length` pixels behind the head.
    pub fn tail(&self) -> Point {
        let (sin, cos) = self.angle.sin_cos();
        Point::new(self.x - cos * self.length, self.y - sin * self.length)
    }
}

/// Decides when the next shooting star is due.
///
/// The interval is fixed when the schedule is created. Time is accumulated
/// from clamped frame deltas, so a backgrounded tab does not come back to a
/// burst of queued spawns.
#[derive(Clone, Debug, PartialEq)]
pub struct ShootingSchedule {
    interval: f64,
    elapsed: f64,
}

impl ShootingSchedule {
    pub(crate) fn new<R: RandSource>(rng: &mut R, config: &StarfieldConfig) -> Self {
        let ms = config.shooting_interval_ms + rng.unit() * config.shooting_jitter_ms;
        Self::with_interval(ms / 1000.0)
    }

    /// A schedule firing every `interval` seconds. Non-positive intervals are
    /// raised to one millisecond.
    pub fn with_interval(interval: f64) -> Self {
        Self {
            interval: if interval.is_finite() { interval.max(0.001) } else { f64::MAX },
            elapsed: 0.0,
        }
    }

    /// Seconds between spawns.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Adds `dt` seconds and returns how many spawns fell due.
    pub fn tick(&mut self, dt: f64) -> usize {
        self.elapsed += dt;
        let mut due = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            due += 1;
        }
        due
    }
}
