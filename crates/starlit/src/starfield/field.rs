use super::{
    Canvas, Color, Focus, Paint, Point, RadialGradient, ShootingSchedule, ShootingStar, Star,
    StarfieldConfig, Viewport,
};
use crate::{FrameClock, FrameTime, RandSource, ThreadRandom, clamp_delta, sanitize_max_delta};
#[cfg(feature = "tracing")]
use tracing::{debug, info};

const VIGNETTE_INNER: Color = Color::rgba(20, 26, 54, 0.28);
const VIGNETTE_OUTER: Color = Color::rgba(7, 10, 22, 0.0);
const GLOW_INNER: Color = Color::rgba(200, 220, 255, 0.36);
const GLOW_OUTER: Color = Color::rgba(200, 220, 255, 0.0);
const TRAIL: Color = Color::rgb(0xe9, 0xf0, 0xff);

/// What happened during one call to [`Starfield::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub time: FrameTime,
    /// Shooting stars spawned this frame.
    pub spawned: usize,
    /// Shooting stars that expired this frame.
    pub expired: usize,
    /// The focus swell completed this frame.
    pub focus_completed: bool,
    /// The reveal fired this frame. True on exactly one frame per field.
    pub revealed: bool,
}

type RevealHook = Box<dyn FnOnce()>;

/// An animated starfield with one focus star.
///
/// The host drives it once per animation frame, typically from
/// `requestAnimationFrame`, through [`Starfield::frame`]. All state lives in
/// the field; nothing is shared between fields.
///
/// # Example
///
/// ```
/// use starlit::SeededRandom;
/// use starlit::starfield::{DisplayList, Starfield, StarfieldConfig, Viewport};
///
/// let viewport = Viewport::new(800.0, 600.0, 1.0);
/// let mut field = Starfield::new(viewport, StarfieldConfig::default(), SeededRandom::new(1));
/// let mut canvas = DisplayList::new();
///
/// let mut reveals = 0;
/// for frame in 0..600 {
///     canvas.reset();
///     if field.frame(frame as f64 * 16.0, &mut canvas).revealed {
///         reveals += 1;
///     }
/// }
/// assert_eq!(reveals, 1);
/// ```
pub struct Starfield<R = ThreadRandom> {
    config: StarfieldConfig,
    viewport: Viewport,
    stars: Vec<Star>,
    shooting: Vec<ShootingStar>,
    schedule: ShootingSchedule,
    focus: Focus,
    clock: Option<FrameClock>,
    on_reveal: Option<RevealHook>,
    rng: R,
}

impl<R: RandSource> Starfield<R> {
    /// Scatters the stars, picks the focus star and fixes the shooting
    /// interval.
    pub fn new(viewport: Viewport, config: StarfieldConfig, mut rng: R) -> Self {
        let count = config.star_count.max(1);
        let stars: Vec<Star> = (0..count)
            .map(|_| Star::scatter(&mut rng, &viewport, &config))
            .collect();
        let focus = Focus::new(rng.index(stars.len()), &config);
        let schedule = ShootingSchedule::new(&mut rng, &config);

        #[cfg(feature = "tracing")]
        info!(
            stars = stars.len(),
            focus = focus.index(),
            shooting_interval = schedule.interval(),
            "starfield created"
        );

        Self {
            config,
            viewport,
            stars,
            shooting: Vec::new(),
            schedule,
            focus,
            clock: None,
            on_reveal: None,
            rng,
        }
    }

    /// Registers a callback run on the reveal frame.
    ///
    /// Being `FnOnce`, it runs at most once; registering after the reveal
    /// has already fired means it never runs.
    pub fn on_reveal(mut self, hook: impl FnOnce() + 'static) -> Self {
        self.on_reveal = Some(Box::new(hook));
        self
    }

    /// Changes the surface size. Existing stars keep their positions.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Advances the field to host timestamp `now_ms` and paints it.
    ///
    /// The first call only establishes the time origin and advances by a zero
    /// delta; afterwards deltas are clamped to `max_frame_delta`.
    pub fn frame<C: Canvas + ?Sized>(&mut self, now_ms: f64, canvas: &mut C) -> FrameReport {
        let max_dt = self.config.max_frame_delta;
        let clock = self
            .clock
            .get_or_insert_with(|| FrameClock::with_max_delta(now_ms, max_dt));
        let time = clock.tick(now_ms);
        let report = self.advance(time);
        self.paint(time.t, canvas);
        report
    }

    /// Runs the simulation for one frame without painting.
    ///
    /// `time.dt` is clamped to `[0, max_frame_delta]` the same way
    /// [`Starfield::frame`] clamps host deltas; NaN counts as zero.
    pub fn advance(&mut self, time: FrameTime) -> FrameReport {
        let dt = clamp_delta(time.dt, sanitize_max_delta(self.config.max_frame_delta));
        let time = FrameTime { dt, t: time.t };

        let focus = self.focus.advance(dt);

        let mut expired = 0;
        self.shooting.retain_mut(|s| {
            let alive = s.advance(dt);
            if !alive {
                expired += 1;
            }
            alive
        });

        let spawned = self.schedule.tick(dt);
        for _ in 0..spawned {
            let star = ShootingStar::spawn(&mut self.rng, &self.viewport, &self.config);
            #[cfg(feature = "tracing")]
            debug!(x = star.x, y = star.y, ttl = star.ttl, "shooting star");
            self.shooting.push(star);
        }

        if focus.revealed {
            #[cfg(feature = "tracing")]
            info!(focus = self.focus.index(), "reveal");
            if let Some(hook) = self.on_reveal.take() {
                hook();
            }
        }

        FrameReport {
            time,
            spawned,
            expired,
            focus_completed: focus.completed,
            revealed: focus.revealed,
        }
    }

    /// Paints the current state at animation time `t` seconds.
    pub fn paint<C: Canvas + ?Sized>(&self, t: f64, canvas: &mut C) {
        let Viewport { width, height, dpr } = self.viewport;

        canvas.clear();
        canvas.fill_rect(
            Point::new(0.0, 0.0),
            width,
            height,
            Paint::Radial(RadialGradient {
                center: Point::new(width * 0.4, height * 0.3),
                radius: width.max(height) * 0.7,
                inner: VIGNETTE_INNER,
                outer: VIGNETTE_OUTER,
            }),
            1.0,
        );

        for (i, star) in self.stars.iter().enumerate() {
            let center = Point::new(star.x, star.y);
            let (radius, glow) = match self.focus.eased() {
                Some(e) if i == self.focus.index() => (
                    star.radius + e * self.config.focus_growth * dpr,
                    e * self.config.focus_glow,
                ),
                _ => (star.radius, 0.0),
            };

            canvas.fill_circle(center, radius, Paint::Solid(Color::WHITE), star.alpha(t));

            if glow > 0.0 {
                let halo = radius * self.config.glow_radius_factor;
                canvas.fill_circle(
                    center,
                    halo,
                    Paint::Radial(RadialGradient {
                        center,
                        radius: halo,
                        inner: GLOW_INNER,
                        outer: GLOW_OUTER,
                    }),
                    glow,
                );
            }
        }

        for s in &self.shooting {
            let fade = s.fade();
            canvas.stroke_line(s.head(), s.tail(), self.config.trail_width * dpr, TRAIL, fade);
            canvas.fill_circle(
                s.head(),
                self.config.head_radius * dpr,
                Paint::Solid(Color::WHITE),
                fade.max(self.config.head_min_alpha),
            );
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn shooting_stars(&self) -> &[ShootingStar] {
        &self.shooting
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn is_revealed(&self) -> bool {
        self.focus.is_revealed()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    /// Seconds between shooting stars for this field.
    pub fn shooting_interval(&self) -> f64 {
        self.schedule.interval()
    }
}

impl Starfield<ThreadRandom> {
    /// A field with the default configuration and the thread-local RNG.
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self::new(viewport, StarfieldConfig::default(), ThreadRandom)
    }
}
