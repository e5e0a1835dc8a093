//! The frame renderer: one owned aggregate holding every animated entity.

use glam::DVec2;

use crate::config::SceneConfig;
use crate::cursor::CursorTracker;
use crate::entities::{
    EnergyWave, GeometryObject, HolographicGrid, LightSource, Particle, QuantumTunnel, Shape,
    Viewport,
};
use crate::error::FxResult;
use crate::projection::Projection;
use crate::rng::SceneRng;
use crate::surface::{Color, Rgba, Surface};

const BLOOM: Rgba = Rgba::new(102, 126, 234, 0.5);
const BLOOM_BLUR: f64 = 10.0;

/// What a single render pass drew and what it culled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles_drawn: usize,
    pub particles_culled: usize,
    pub geometry_drawn: usize,
    pub geometry_culled: usize,
    pub waves_drawn: usize,
    pub tunnel_segments: usize,
    pub grid_nodes: usize,
}

/// Counters accumulated across ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub ticks: u64,
    pub respawns: u64,
    pub wave_resets: u64,
}

#[derive(Clone, Debug)]
pub struct Scene {
    config: SceneConfig,
    viewport: Viewport,
    projection: Projection,
    rng: SceneRng,
    particles: Vec<Particle>,
    geometry: Vec<GeometryObject>,
    lights: Vec<LightSource>,
    waves: Vec<EnergyWave>,
    tunnels: Vec<QuantumTunnel>,
    grid: HolographicGrid,
    cursor: CursorTracker,
    stats: TickStats,
}

impl Scene {
    /// Validates `config` and places every entity using a generator seeded
    /// with `seed`. The same inputs always give the same scene.
    pub fn new(config: SceneConfig, viewport: Viewport, seed: u64) -> FxResult<Self> {
        config.validate()?;
        let mut rng = SceneRng::seeded(seed);

        let particles = (0..config.particle_count)
            .map(|_| Particle::spawn(&mut rng, viewport, config.particle_depth))
            .collect();

        let shapes = config.shapes;
        let mut geometry = Vec::with_capacity(shapes.total());
        for shape in Shape::ALL {
            let count = match shape {
                Shape::Tetrahedron => shapes.tetrahedron,
                Shape::Octahedron => shapes.octahedron,
                Shape::Dodecahedron => shapes.dodecahedron,
                Shape::Torus => shapes.torus,
            };
            for _ in 0..count {
                geometry.push(GeometryObject::spawn(shape, &mut rng, viewport, config.geometry_depth));
            }
        }

        let lights = config
            .lights
            .iter()
            .map(|light| LightSource::from_config(light, viewport))
            .collect();

        let grid = HolographicGrid::build(&mut rng, viewport, config.grid_spacing);
        let waves = (0..config.wave_count)
            .map(|_| EnergyWave::spawn(&mut rng, viewport))
            .collect();
        let tunnels = (0..config.tunnel_count)
            .map(|_| QuantumTunnel::spawn(&mut rng, viewport, config.tunnel_segments))
            .collect();

        let scene = Self {
            projection: Projection::new(config.perspective, config.cull_scale),
            cursor: CursorTracker::new(config.cursor.clone()),
            config,
            viewport,
            rng,
            particles,
            geometry,
            lights,
            waves,
            tunnels,
            grid,
            stats: TickStats::default(),
        };
        log::debug!(
            "scene ready: {}x{} with {} particles, {} solids, {} waves, {} tunnels, {} grid nodes",
            viewport.width,
            viewport.height,
            scene.particles.len(),
            scene.geometry.len(),
            scene.waves.len(),
            scene.tunnels.len(),
            scene.grid.nodes.len(),
        );
        Ok(scene)
    }

    /// Updates the wrap bounds. Entities stay where they are and drift back
    /// in through their own wrap logic.
    pub fn resize(&mut self, viewport: Viewport) {
        log::info!(
            "resize {}x{} -> {}x{}",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.cursor.pointer_moved(x, y);
    }

    pub fn clicked(&mut self) {
        self.cursor.clicked();
    }

    /// Advances every collection by one tick. `dt` is the elapsed time in
    /// seconds and only drives the grid pulse and cursor ripples; motion is
    /// per tick.
    pub fn tick(&mut self, dt: f64) {
        let viewport = self.viewport;
        let config = &self.config;
        let rng = &mut self.rng;

        for particle in &mut self.particles {
            if particle.advance(viewport, config.particle_depth, rng) {
                self.stats.respawns += 1;
            }
        }
        for object in &mut self.geometry {
            object.advance(viewport, config.geometry_depth, config.geometry_margin);
        }
        for wave in &mut self.waves {
            if wave.advance(viewport, rng) {
                self.stats.wave_resets += 1;
            }
        }
        for tunnel in &mut self.tunnels {
            tunnel.advance();
        }
        self.grid.advance(dt);
        self.cursor.advance(dt);
        self.stats.ticks += 1;
    }

    /// Draws the current state, back to front.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> FrameStats {
        let mut stats = FrameStats::default();

        self.grid.draw(surface);
        stats.grid_nodes = self.grid.nodes.len();

        for wave in &self.waves {
            if wave.draw(surface) {
                stats.waves_drawn += 1;
            }
        }
        for tunnel in &self.tunnels {
            stats.tunnel_segments += tunnel.draw(surface);
        }
        for particle in &self.particles {
            if particle.draw(surface, &self.projection, &self.lights) {
                stats.particles_drawn += 1;
            } else {
                stats.particles_culled += 1;
            }
        }
        for object in &self.geometry {
            if object.draw(surface, &self.projection) {
                stats.geometry_drawn += 1;
            } else {
                stats.geometry_culled += 1;
            }
        }

        self.cursor.draw(surface);
        surface.set_shadow(Color::Rgba(BLOOM), BLOOM_BLUR);
        stats
    }

    /// Lays the translucent black fill that turns the previous frame into a
    /// motion trail.
    pub fn fade<S: Surface + ?Sized>(&self, surface: &mut S) {
        let size = surface.size();
        surface.fill_rect(
            DVec2::ZERO,
            size,
            Color::Rgba(Rgba::new(0, 0, 0, self.config.fade_alpha)),
        );
    }

    /// One full frame: fade, update, render.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, dt: f64) -> FrameStats {
        self.fade(surface);
        self.tick(dt);
        self.render(surface)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn stats(&self) -> TickStats {
        self.stats
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn geometry(&self) -> &[GeometryObject] {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut [GeometryObject] {
        &mut self.geometry
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    pub fn waves(&self) -> &[EnergyWave] {
        &self.waves
    }

    pub fn waves_mut(&mut self) -> &mut [EnergyWave] {
        &mut self.waves
    }

    pub fn tunnels(&self) -> &[QuantumTunnel] {
        &self.tunnels
    }

    pub fn grid(&self) -> &HolographicGrid {
        &self.grid
    }

    pub fn cursor(&self) -> &CursorTracker {
        &self.cursor
    }
}
