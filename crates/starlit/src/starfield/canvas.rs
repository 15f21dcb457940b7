use core::fmt;

/// A point in backing-store pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An sRGB color with straight alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Formats as a CSS color, ready for a 2D canvas context.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// A two-stop radial gradient from `inner` at `center` to `outer` at
/// `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub radius: f64,
    pub inner: Color,
    pub outer: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Radial(RadialGradient),
}

/// A 2D drawing surface.
///
/// Every call carries its own global alpha so implementations never need to
/// track state between calls.
pub trait Canvas {
    /// Clears the whole surface to transparent.
    fn clear(&mut self);

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, paint: Paint, alpha: f64);

    fn fill_circle(&mut self, center: Point, radius: f64, paint: Paint, alpha: f64);

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color, alpha: f64);
}

/// One recorded [`Canvas`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        origin: Point,
        width: f64,
        height: f64,
        paint: Paint,
        alpha: f64,
    },
    FillCircle {
        center: Point,
        radius: f64,
        paint: Paint,
        alpha: f64,
    },
    StrokeLine {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
        alpha: f64,
    },
}

/// A [`Canvas`] that records draw calls for a host to replay.
///
/// A web host can build one per frame and forward the commands to a
/// `CanvasRenderingContext2D`; tests inspect it directly.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Empties the list while keeping its allocation.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn drain(&mut self) -> impl Iterator<Item = DrawCommand> + '_ {
        self.commands.drain(..)
    }
}

impl Canvas for DisplayList {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, paint: Paint, alpha: f64) {
        self.commands.push(DrawCommand::FillRect {
            origin,
            width,
            height,
            paint,
            alpha,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: Paint, alpha: f64) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint,
            alpha,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color, alpha: f64) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
            alpha,
        });
    }
}
