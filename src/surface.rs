//! Immediate-mode drawing interface the scene renders through, and a
//! recorder implementation that keeps the calls instead of producing pixels.

use std::fmt;

use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Rgba(Rgba),
    Hsl(Hsl),
}

impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Self::Rgba(c)
    }
}

impl From<Hsl> for Color {
    fn from(c: Hsl) -> Self {
        Self::Hsl(c)
    }
}

/// CSS color syntax, as accepted by canvas style setters.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgba(c) => write!(f, "rgba({}, {}, {}, {})", c.r, c.g, c.b, c.a.clamp(0.0, 1.0)),
            Self::Hsl(c) => write!(f, "hsl({}, {}%, {}%)", c.h, c.s, c.l),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: DVec2,
    pub radius: f64,
    /// `(offset, color)` pairs with offsets in `[0, 1]`.
    pub stops: Vec<(f32, Color)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Radial(RadialGradient),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: impl Into<Color>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

/// The subset of a 2D canvas context the scene needs.
pub trait Surface {
    /// Current drawable size in pixels.
    fn size(&self) -> DVec2;

    fn save(&mut self);
    fn restore(&mut self);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_shadow(&mut self, color: Color, blur: f64);

    /// Resets the rectangle to transparent black.
    fn clear_rect(&mut self, origin: DVec2, size: DVec2);
    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Color);
    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint);
    fn stroke_circle(&mut self, center: DVec2, radius: f64, stroke: Stroke);
    /// Strokes a polyline through `points`, closing it back to the first
    /// point when `closed` is set.
    fn stroke_path(&mut self, points: &[DVec2], closed: bool, stroke: Stroke);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Save,
    Restore,
    GlobalAlpha(f64),
    Shadow { color: Color, blur: f64 },
    ClearRect { origin: DVec2, size: DVec2 },
    FillRect { origin: DVec2, size: DVec2, color: Color },
    FillCircle { center: DVec2, radius: f64, paint: Paint },
    StrokeCircle { center: DVec2, radius: f64, stroke: Stroke },
    StrokePath { points: Vec<DVec2>, closed: bool, stroke: Stroke },
}

#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    size: DVec2,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: DVec2::new(width, height),
            calls: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = DVec2::new(width, height);
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> DVec2 {
        self.size
    }

    fn save(&mut self) {
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        self.calls.push(DrawCall::Restore);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.calls.push(DrawCall::GlobalAlpha(alpha));
    }

    fn set_shadow(&mut self, color: Color, blur: f64) {
        self.calls.push(DrawCall::Shadow { color, blur });
    }

    fn clear_rect(&mut self, origin: DVec2, size: DVec2) {
        self.calls.push(DrawCall::ClearRect { origin, size });
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: Color) {
        self.calls.push(DrawCall::FillRect { origin, size, color });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        self.calls.push(DrawCall::FillCircle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, stroke: Stroke) {
        self.calls.push(DrawCall::StrokeCircle { center, radius, stroke });
    }

    fn stroke_path(&mut self, points: &[DVec2], closed: bool, stroke: Stroke) {
        self.calls.push(DrawCall::StrokePath {
            points: points.to_vec(),
            closed,
            stroke,
        });
    }
}
