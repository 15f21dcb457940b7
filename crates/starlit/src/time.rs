#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use std::time::{Instant, SystemTime, UNIX_EPOCH};
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use web_time::{Instant, SystemTime, UNIX_EPOCH};

/// Largest frame step, in seconds. A tab that was backgrounded for a minute
/// resumes as if a single ~30fps frame had passed.
pub const MAX_FRAME_DELTA: f64 = 0.033;

/// A trait for time sources that return a monotonic or wall-clock timestamp.
///
/// This abstraction allows you to plug in a real system clock, a monotonic
/// timer, or a mocked time source in tests.
///
/// The timestamp type `T` is generic (`u64` for wall-clock stamps, `f64` for
/// high resolution animation time), and the unit is **milliseconds**.
///
/// # Example
///
/// ```
/// use starlit::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<u64> for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in milliseconds since the source's origin.
    fn current_millis(&self) -> T;
}

/// Wall-clock milliseconds since the Unix epoch.
///
/// A system clock set before 1970 reports `0` rather than panicking.
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource<u64> for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}

/// High resolution milliseconds elapsed since construction, the native
/// stand-in for a browser's `performance.now()`.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicNow {
    start: Instant,
}

impl Default for MonotonicNow {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl TimeSource<f64> for MonotonicNow {
    fn current_millis(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Timing of a single animation frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame, clamped to `[0, MAX_FRAME_DELTA]`.
    pub dt: f64,
    /// Absolute animation time in seconds; drives the flicker phase.
    pub t: f64,
}

/// Turns host frame timestamps into clamped frame deltas.
///
/// The first tick is measured against the timestamp the clock was created
/// with, so a host should create the clock right before scheduling its first
/// frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last: f64,
    max_dt: f64,
}

impl FrameClock {
    pub fn new(now_ms: f64) -> Self {
        Self::with_max_delta(now_ms, MAX_FRAME_DELTA)
    }

    /// Creates a clock whose deltas never exceed `max_dt` seconds.
    ///
    /// A negative `max_dt` is treated as zero and a non-finite one falls back
    /// to [`MAX_FRAME_DELTA`]. A non-finite `now_ms` leaves the clock unset
    /// until the first finite tick.
    pub fn with_max_delta(now_ms: f64, max_dt: f64) -> Self {
        Self {
            last: now_ms,
            max_dt: sanitize_max_delta(max_dt),
        }
    }

    /// Advances the clock to `now_ms`.
    ///
    /// Timestamps that go backwards produce a zero delta; the clock still
    /// moves to the new timestamp so the next delta is measured from it.
    /// Non-finite timestamps are ignored.
    pub fn tick(&mut self, now_ms: f64) -> FrameTime {
        if !now_ms.is_finite() {
            let t = if self.last.is_finite() { self.last } else { 0.0 };
            return FrameTime {
                dt: 0.0,
                t: t / 1000.0,
            };
        }
        if !self.last.is_finite() {
            self.last = now_ms;
        }
        let raw = (now_ms - self.last) / 1000.0;
        self.last = now_ms;
        FrameTime {
            dt: clamp_delta(raw, self.max_dt),
            t: now_ms / 1000.0,
        }
    }

    pub fn last_millis(&self) -> f64 {
        self.last
    }
}

pub(crate) fn sanitize_max_delta(max_dt: f64) -> f64 {
    if max_dt.is_finite() {
        max_dt.max(0.0)
    } else {
        MAX_FRAME_DELTA
    }
}

/// Clamps a frame delta into `[0, max_dt]`, mapping NaN to zero.
///
/// `max_dt` must already be sanitized.
pub(crate) fn clamp_delta(dt: f64, max_dt: f64) -> f64 {
    if dt.is_nan() || dt <= 0.0 {
        0.0
    } else {
        dt.min(max_dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_measures_from_previous_frame() {
        let mut clock = FrameClock::new(1000.0);
        let frame = clock.tick(1016.0);
        assert!((frame.dt - 0.016).abs() < 1e-9);
        assert!((frame.t - 1.016).abs() < 1e-9);
        assert_eq!(clock.last_millis(), 1016.0);
    }

    #[test]
    fn tick_clamps_long_gaps() {
        let mut clock = FrameClock::new(0.0);
        // A tab hidden for a whole minute.
        let frame = clock.tick(60_000.0);
        assert_eq!(frame.dt, MAX_FRAME_DELTA);
        let frame = clock.tick(60_010.0);
        assert!((frame.dt - 0.010).abs() < 1e-9);
    }

    #[test]
    fn tick_never_goes_negative() {
        let mut clock = FrameClock::new(500.0);
        let frame = clock.tick(400.0);
        assert_eq!(frame.dt, 0.0);
        let frame = clock.tick(f64::NAN);
        assert_eq!(frame.dt, 0.0);
        let frame = clock.tick(410.0);
        assert!((frame.dt - 0.010).abs() < 1e-9);
    }

    #[test]
    fn max_delta_is_sanitized() {
        let mut clock = FrameClock::with_max_delta(0.0, -1.0);
        assert_eq!(clock.tick(1000.0).dt, 0.0);

        for max_dt in [f64::NAN, f64::INFINITY] {
            let mut clock = FrameClock::with_max_delta(0.0, max_dt);
            assert_eq!(clock.tick(60_000.0).dt, MAX_FRAME_DELTA);
        }
    }

    #[test]
    fn non_finite_origin_waits_for_a_real_timestamp() {
        let mut clock = FrameClock::new(f64::NAN);
        let frame = clock.tick(f64::NAN);
        assert_eq!(frame.dt, 0.0);
        assert_eq!(frame.t, 0.0);

        let frame = clock.tick(5000.0);
        assert_eq!(frame.dt, 0.0);
        assert_eq!(clock.last_millis(), 5000.0);
        let frame = clock.tick(5016.0);
        assert!((frame.dt - 0.016).abs() < 1e-9);
    }

    #[test]
    fn system_clock_is_after_2025() {
        // 2025-01-01T00:00:00Z
        assert!(SystemClock.current_millis() > 1_735_689_600_000);
    }

    #[test]
    fn monotonic_now_does_not_go_backwards() {
        let now = MonotonicNow::default();
        let a = now.current_millis();
        let b = now.current_millis();
        assert!(b >= a);
    }
}
