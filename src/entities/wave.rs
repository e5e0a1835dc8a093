use std::f64::consts::TAU;

use glam::DVec2;

use super::Viewport;
use crate::rng::SceneRng;
use crate::surface::{Paint, RadialGradient, Rgba, Surface};

const CORE: Rgba = Rgba::new(79, 172, 254, 1.0);
const HALO: Rgba = Rgba::new(102, 126, 234, 1.0);

/// Expanding ring of light. Grows by `speed` each tick and starts over at a
/// fresh origin once it has outgrown `max_radius`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnergyWave {
    pub origin: DVec2,
    pub radius: f64,
    pub max_radius: f64,
    pub speed: f64,
    pub intensity: f64,
    pub frequency: f64,
    pub phase: f64,
}

impl EnergyWave {
    pub fn spawn(rng: &mut SceneRng, viewport: Viewport) -> Self {
        Self {
            origin: random_origin(rng, viewport),
            radius: 0.0,
            max_radius: rng.between(100.0, 300.0),
            speed: rng.between(1.0, 3.0),
            intensity: rng.between(0.2, 0.5),
            frequency: rng.between(0.01, 0.03),
            phase: rng.angle(),
        }
    }

    /// Returns `true` on the tick the wave resets. The reset fires only once
    /// the radius is strictly greater than `max_radius`; landing exactly on
    /// it keeps the wave alive one more tick.
    pub fn advance(&mut self, viewport: Viewport, rng: &mut SceneRng) -> bool {
        self.radius += self.speed;
        self.phase = (self.phase + self.frequency).rem_euclid(TAU);

        if self.radius > self.max_radius {
            self.radius = 0.0;
            self.origin = random_origin(rng, viewport);
            log::trace!("wave reset at ({:.1}, {:.1})", self.origin.x, self.origin.y);
            return true;
        }
        false
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> bool {
        if self.radius <= 0.0 {
            return false;
        }
        let paint = Paint::Radial(RadialGradient {
            center: self.origin,
            radius: self.radius,
            stops: vec![
                (0.0, CORE.with_alpha(self.intensity).into()),
                (0.5, HALO.with_alpha(self.intensity * 0.5).into()),
                (1.0, CORE.with_alpha(0.0).into()),
            ],
        });
        surface.fill_circle(self.origin, self.radius, &paint);
        true
    }
}

fn random_origin(rng: &mut SceneRng, viewport: Viewport) -> DVec2 {
    DVec2::new(
        rng.between(0.0, viewport.width),
        rng.between(0.0, viewport.height),
    )
}
