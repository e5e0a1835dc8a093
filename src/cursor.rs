//! Canvas-drawn pointer: an eased head ring, a trailing tail and click
//! ripples.

use glam::DVec2;

use crate::config::CursorConfig;
use crate::surface::{Paint, Rgba, Stroke, Surface};

const ACCENT: Rgba = Rgba::new(102, 126, 234, 1.0);
const HEAD_RADIUS: f64 = 10.0;
const TRAIL_RADIUS: f64 = 4.0;
const RIPPLE_START: f64 = 10.0;
const RIPPLE_END: f64 = 80.0;
const HEAD_ALPHA: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub center: DVec2,
    /// Seconds since the click.
    pub age: f64,
}

#[derive(Clone, Debug)]
pub struct CursorTracker {
    config: CursorConfig,
    pointer: DVec2,
    head: DVec2,
    trail: Vec<DVec2>,
    ripples: Vec<Ripple>,
}

impl CursorTracker {
    pub fn new(config: CursorConfig) -> Self {
        let trail = vec![DVec2::ZERO; config.trail_length];
        Self {
            config,
            pointer: DVec2::ZERO,
            head: DVec2::ZERO,
            trail,
            ripples: Vec::new(),
        }
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer = DVec2::new(x, y);
    }

    pub fn clicked(&mut self) {
        self.ripples.push(Ripple {
            center: self.pointer,
            age: 0.0,
        });
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    pub fn head(&self) -> DVec2 {
        self.head
    }

    pub fn trail(&self) -> &[DVec2] {
        &self.trail
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    /// Eases the head toward the pointer and each trail point toward the
    /// head; later trail points lag less so the tail stays compact.
    pub fn advance(&mut self, dt: f64) {
        self.head += (self.pointer - self.head) * self.config.easing;
        for (i, point) in self.trail.iter_mut().enumerate() {
            let k = 0.05 + i as f64 * 0.005;
            *point += (self.head - *point) * k;
        }

        let lifetime = self.config.ripple_seconds;
        for ripple in &mut self.ripples {
            ripple.age += dt;
        }
        self.ripples.retain(|r| r.age < lifetime);
    }

    /// `(radius, opacity)` of a ripple at its current age.
    pub fn ripple_shape(&self, ripple: &Ripple) -> (f64, f64) {
        let t = (ripple.age / self.config.ripple_seconds).clamp(0.0, 1.0);
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        (RIPPLE_START + (RIPPLE_END - RIPPLE_START) * eased, 1.0 - t)
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let n = self.trail.len() as f64;
        for (i, point) in self.trail.iter().enumerate() {
            let fade = (n - i as f64) / n;
            surface.fill_circle(
                *point,
                TRAIL_RADIUS * fade,
                &Paint::Solid(ACCENT.with_alpha(fade).into()),
            );
        }

        surface.stroke_circle(self.head, HEAD_RADIUS, Stroke::new(ACCENT.with_alpha(HEAD_ALPHA), 2.0));

        for ripple in &self.ripples {
            let (radius, opacity) = self.ripple_shape(ripple);
            surface.stroke_circle(ripple.center, radius, Stroke::new(ACCENT.with_alpha(opacity), 2.0));
        }
    }
}
