use crate::time::MAX_FRAME_DELTA;
use core::f64::consts::PI;

/// Highest device pixel ratio the backing store is scaled by.
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

/// Tunables of a [`Starfield`](super::Starfield).
///
/// `[lo, hi]` pairs are sampled uniformly from `[lo, hi)`. Lengths, radii and
/// speeds are in CSS pixels and get scaled by the device pixel ratio.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StarfieldConfig {
    /// Number of point stars. At least one is always created so that a
    /// focus star exists.
    pub star_count: usize,
    pub star_radius: [f64; 2],
    /// Flicker angular speed, radians per second.
    pub twinkle_speed: [f64; 2],
    pub base_alpha: [f64; 2],

    /// Shooting star interval: `base + [0, jitter)`, chosen once per field.
    pub shooting_interval_ms: f64,
    pub shooting_jitter_ms: f64,
    pub shooting_length: [f64; 2],
    /// Heading in radians; `[0.6π, 0.9π)` points down and to the left.
    pub shooting_angle: [f64; 2],
    /// CSS pixels per second.
    pub shooting_speed: [f64; 2],
    /// Lifetime in seconds.
    pub shooting_ttl: [f64; 2],
    pub trail_width: f64,
    pub head_radius: f64,
    pub head_min_alpha: f64,

    /// Progress added to the focus animation on every frame.
    pub focus_step: f64,
    /// Extra radius of the focus star at full progress, CSS pixels.
    pub focus_growth: f64,
    /// Glow alpha of the focus star at full progress.
    pub focus_glow: f64,
    /// Glow radius as a multiple of the star radius.
    pub glow_radius_factor: f64,
    /// Frame time between focus completion and the reveal.
    pub reveal_delay_ms: f64,

    pub max_frame_delta: f64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            star_count: 180,
            star_radius: [0.5, 1.8],
            twinkle_speed: [0.5, 1.2],
            base_alpha: [0.35, 0.95],
            shooting_interval_ms: 4200.0,
            shooting_jitter_ms: 1200.0,
            shooting_length: [120.0, 220.0],
            shooting_angle: [PI * 0.6, PI * 0.9],
            shooting_speed: [600.0, 900.0],
            shooting_ttl: [0.8, 1.4],
            trail_width: 1.3,
            head_radius: 1.8,
            head_min_alpha: 0.3,
            focus_step: 0.012,
            focus_growth: 2.4,
            focus_glow: 0.6,
            glow_radius_factor: 8.0,
            reveal_delay_ms: 250.0,
            max_frame_delta: MAX_FRAME_DELTA,
        }
    }
}

impl StarfieldConfig {
    /// Number of frames the focus animation takes to complete.
    pub fn focus_frames(&self) -> u32 {
        if self.focus_step <= 0.0 || !self.focus_step.is_finite() {
            return 1;
        }
        (1.0 / self.focus_step).ceil().max(1.0) as u32
    }
}

/// Size of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Backing-store width in device pixels.
    pub width: f64,
    /// Backing-store height in device pixels.
    pub height: f64,
    /// Device pixel ratio after capping.
    pub dpr: f64,
}

impl Viewport {
    /// Builds a viewport from the CSS size of the window, capping the device
    /// pixel ratio at [`MAX_DEVICE_PIXEL_RATIO`].
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        Self::with_max_ratio(css_width, css_height, device_pixel_ratio, MAX_DEVICE_PIXEL_RATIO)
    }

    /// Like [`Viewport::new`] with an explicit ratio cap. A ratio that is not
    /// a positive number is treated as `1`.
    pub fn with_max_ratio(css_width: f64, css_height: f64, device_pixel_ratio: f64, max: f64) -> Self {
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        let dpr = ratio.min(max);
        Self {
            width: (css_width.max(0.0) * dpr).floor(),
            height: (css_height.max(0.0) * dpr).floor(),
            dpr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_caps_pixel_ratio() {
        let vp = Viewport::new(1280.0, 720.0, 3.0);
        assert_eq!(vp.dpr, 2.0);
        assert_eq!(vp.width, 2560.0);
        assert_eq!(vp.height, 1440.0);
    }

    #[test]
    fn viewport_floors_backing_size() {
        let vp = Viewport::new(333.3, 100.7, 1.5);
        assert_eq!(vp.width, 499.0);
        assert_eq!(vp.height, 151.0);
    }

    #[test]
    fn viewport_rejects_bogus_ratio() {
        assert_eq!(Viewport::new(10.0, 10.0, 0.0).dpr, 1.0);
        assert_eq!(Viewport::new(10.0, 10.0, f64::NAN).dpr, 1.0);
    }

    #[test]
    fn default_focus_takes_84_frames() {
        assert_eq!(StarfieldConfig::default().focus_frames(), 84);
    }
}
