//! Second, lighter particle field drawn on its own canvas behind the hero
//! section. Unlike [`Scene`](crate::Scene) it clears every frame instead of
//! fading, has no lights and colors each particle by its depth.

use glam::{DVec2, DVec3};

use crate::config::HeroConfig;
use crate::entities::{wrap, Viewport};
use crate::error::FxResult;
use crate::projection::Projection;
use crate::rng::SceneRng;
use crate::surface::{Hsl, Paint, Surface};

const BASE_HUE: f64 = 240.0;
const HUE_PER_DEPTH: f64 = 0.1;

#[derive(Clone, Debug, PartialEq)]
pub struct HeroParticle {
    pub position: DVec3,
    pub velocity: DVec3,
    pub size: f64,
    pub opacity: f64,
}

impl HeroParticle {
    fn spawn(rng: &mut SceneRng, viewport: Viewport, depth: f64) -> Self {
        Self {
            position: DVec3::new(
                rng.between(0.0, viewport.width),
                rng.between(0.0, viewport.height),
                rng.between(-depth, depth),
            ),
            velocity: DVec3::new(rng.spread(0.5), rng.spread(0.5), rng.spread(2.0)),
            size: rng.between(1.0, 4.0),
            opacity: rng.between(0.2, 1.0),
        }
    }

    pub fn advance(&mut self, viewport: Viewport, depth: f64) {
        self.position += self.velocity;
        self.position.x = wrap(self.position.x, 0.0, viewport.width);
        self.position.y = wrap(self.position.y, 0.0, viewport.height);
        self.position.z = wrap(self.position.z, -depth, depth);
    }

    /// Blue at the focal plane, drifting toward violet with distance.
    pub fn color(&self) -> Hsl {
        Hsl {
            h: BASE_HUE + self.position.z * HUE_PER_DEPTH,
            s: 70.0,
            l: 60.0,
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, projection: &Projection) -> bool {
        let Some(projected) = projection.project(self.position, self.size) else {
            return false;
        };
        surface.save();
        surface.set_global_alpha(self.opacity * projected.scale);
        surface.fill_circle(projected.point, projected.size, &Paint::Solid(self.color().into()));
        surface.restore();
        true
    }
}

#[derive(Clone, Debug)]
pub struct HeroField {
    config: HeroConfig,
    viewport: Viewport,
    projection: Projection,
    particles: Vec<HeroParticle>,
}

impl HeroField {
    pub fn new(config: HeroConfig, viewport: Viewport, seed: u64) -> FxResult<Self> {
        config.validate()?;
        let mut rng = SceneRng::seeded(seed);
        let particles = (0..config.particle_count)
            .map(|_| HeroParticle::spawn(&mut rng, viewport, config.depth))
            .collect();
        log::debug!(
            "hero field ready: {}x{} with {} particles",
            viewport.width,
            viewport.height,
            config.particle_count
        );
        Ok(Self {
            // depth < perspective, so nothing is ever culled
            projection: Projection::new(config.perspective, 0.0),
            config,
            viewport,
            particles,
        })
    }

    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!("hero resize -> {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
    }

    pub fn tick(&mut self) {
        for particle in &mut self.particles {
            particle.advance(self.viewport, self.config.depth);
        }
    }

    /// Clears the surface and draws every particle. Returns how many were
    /// drawn.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        let size = surface.size();
        surface.clear_rect(DVec2::ZERO, size);
        self.particles
            .iter()
            .filter(|p| p.draw(surface, &self.projection))
            .count()
    }

    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> usize {
        self.tick();
        self.render(surface)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[HeroParticle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [HeroParticle] {
        &mut self.particles
    }
}
