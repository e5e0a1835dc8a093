use std::f64::consts::TAU;

use glam::DVec3;

use super::light::{illumination, LightSource};
use super::{wrap, Viewport};
use crate::projection::Projection;
use crate::rng::SceneRng;
use crate::surface::{Hsl, Paint, RadialGradient, Rgba, Surface};

/// Glowing point that drifts through the box `[0,w] x [0,h] x [-depth,depth]`
/// and fades out over its life.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: DVec3,
    pub velocity: DVec3,
    pub size: f64,
    pub color: Hsl,
    /// Remaining visibility in `[0, 1]`.
    pub life: f64,
    pub decay: f64,
    pub rotation: f64,
    pub rotation_speed: f64,
}

impl Particle {
    pub fn spawn(rng: &mut SceneRng, viewport: Viewport, depth: f64) -> Self {
        Self {
            position: random_position(rng, viewport, depth),
            velocity: DVec3::new(rng.spread(2.0), rng.spread(2.0), rng.spread(4.0)),
            size: rng.between(1.0, 4.0),
            color: Hsl {
                h: rng.between(220.0, 280.0),
                s: rng.between(70.0, 100.0),
                l: rng.between(50.0, 80.0),
            },
            life: 1.0,
            decay: rng.between(0.005, 0.015),
            rotation: rng.angle(),
            rotation_speed: rng.spread(0.1),
        }
    }

    /// One tick of motion and decay. Returns `true` when the particle ran out
    /// of life and was respawned.
    pub fn advance(&mut self, viewport: Viewport, depth: f64, rng: &mut SceneRng) -> bool {
        self.position += self.velocity;
        self.rotation = (self.rotation + self.rotation_speed).rem_euclid(TAU);
        self.life -= self.decay;

        self.position.x = wrap(self.position.x, 0.0, viewport.width);
        self.position.y = wrap(self.position.y, 0.0, viewport.height);
        self.position.z = wrap(self.position.z, -depth, depth);

        if self.life <= 0.0 {
            self.life = 1.0;
            self.position = random_position(rng, viewport, depth);
            return true;
        }
        false
    }

    pub fn illumination(&self, lights: &[LightSource]) -> f64 {
        illumination(lights, self.position)
    }

    /// Opacity before projection scaling: dim when unlit, full when lit.
    pub fn base_alpha(&self, lights: &[LightSource]) -> f64 {
        self.life * (0.3 + self.illumination(lights) * 0.7)
    }

    /// Returns `false` when the particle was culled.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        projection: &Projection,
        lights: &[LightSource],
    ) -> bool {
        if self.life <= 0.0 {
            return false;
        }
        let Some(projected) = projection.project(self.position, self.size) else {
            return false;
        };

        let radius = projected.size * 2.0;
        let paint = Paint::Radial(RadialGradient {
            center: projected.point,
            radius,
            stops: vec![(0.0, self.color.into()), (1.0, Rgba::TRANSPARENT.into())],
        });

        surface.save();
        surface.set_global_alpha(self.base_alpha(lights) * projected.scale);
        surface.fill_circle(projected.point, radius, &paint);
        surface.restore();
        true
    }
}

fn random_position(rng: &mut SceneRng, viewport: Viewport, depth: f64) -> DVec3 {
    DVec3::new(
        rng.between(0.0, viewport.width),
        rng.between(0.0, viewport.height),
        rng.between(-depth, depth),
    )
}
