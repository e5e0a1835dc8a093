//! Scene primitives. Each type knows how to spawn itself from the seeded
//! source, advance one tick and draw itself onto a [`Surface`].
//!
//! [`Surface`]: crate::surface::Surface

mod geometry;
mod grid;
mod light;
mod particle;
mod tunnel;
mod wave;

pub use geometry::{GeometryObject, Shape};
pub use grid::{GridNode, HolographicGrid};
pub use light::LightSource;
pub use particle::Particle;
pub use tunnel::{QuantumTunnel, TunnelPoint};
pub use wave::EnergyWave;

use glam::DVec2;

/// Drawable area in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

/// Moves `value` to the opposite end once it leaves `[lo, hi]`.
pub fn wrap(value: f64, lo: f64, hi: f64) -> f64 {
    if value < lo {
        hi
    } else if value > hi {
        lo
    } else {
        value
    }
}
