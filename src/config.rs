//! Tunables for the background scene. Every field has a default, so a JSON
//! config only needs to name the values it overrides.

use serde::{Deserialize, Serialize};

use crate::error::{FxError, FxResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub particle_count: usize,
    /// Half-extent of the particle z range.
    pub particle_depth: f64,
    pub shapes: ShapeCounts,
    /// Half-extent of the initial geometry z range.
    pub geometry_depth: f64,
    pub geometry_margin: f64,
    pub wave_count: usize,
    pub tunnel_count: usize,
    pub tunnel_segments: usize,
    pub grid_spacing: f64,
    pub perspective: f64,
    pub cull_scale: f64,
    /// Alpha of the black fill laid over the previous frame.
    pub fade_alpha: f64,
    pub lights: Vec<LightConfig>,
    pub cursor: CursorConfig,
    pub hero: HeroConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeCounts {
    pub tetrahedron: usize,
    pub octahedron: usize,
    pub dodecahedron: usize,
    pub torus: usize,
}

/// A light placed relative to the viewport: `x`/`y` are fractions of the
/// width and height, `z` is absolute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub intensity: f64,
    pub color: [u8; 3],
    pub radius: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub trail_length: usize,
    pub easing: f64,
    pub ripple_seconds: f64,
}

/// The lighter particle field layered over the hero section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub particle_count: usize,
    /// Particles wrap in z at `±depth`.
    pub depth: f64,
    pub perspective: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: 200,
            particle_depth: 500.0,
            shapes: ShapeCounts::default(),
            geometry_depth: 100.0,
            geometry_margin: 100.0,
            wave_count: 10,
            tunnel_count: 3,
            tunnel_segments: 20,
            grid_spacing: 50.0,
            perspective: 500.0,
            cull_scale: 0.1,
            fade_alpha: 0.05,
            lights: vec![
                LightConfig {
                    x: 0.3,
                    y: 0.2,
                    z: 200.0,
                    intensity: 0.8,
                    color: [102, 126, 234],
                    radius: 300.0,
                },
                LightConfig {
                    x: 0.7,
                    y: 0.8,
                    z: 150.0,
                    intensity: 0.6,
                    color: [245, 87, 108],
                    radius: 250.0,
                },
                LightConfig {
                    x: 0.5,
                    y: 0.5,
                    z: 100.0,
                    intensity: 0.4,
                    color: [79, 172, 254],
                    radius: 400.0,
                },
            ],
            cursor: CursorConfig::default(),
            hero: HeroConfig::default(),
        }
    }
}

impl Default for ShapeCounts {
    fn default() -> Self {
        Self {
            tetrahedron: 5,
            octahedron: 4,
            dodecahedron: 3,
            torus: 2,
        }
    }
}

impl ShapeCounts {
    pub fn total(&self) -> usize {
        self.tetrahedron + self.octahedron + self.dodecahedron + self.torus
    }

    pub fn none() -> Self {
        Self {
            tetrahedron: 0,
            octahedron: 0,
            dodecahedron: 0,
            torus: 0,
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            trail_length: 10,
            easing: 0.1,
            ripple_seconds: 0.6,
        }
    }
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            depth: 250.0,
            perspective: 500.0,
        }
    }
}

impl HeroConfig {
    pub fn validate(&self) -> FxResult<()> {
        if !(self.perspective > 0.0) {
            return Err(FxError::config("hero.perspective", "must be positive"));
        }
        // keeps every particle in front of the camera
        if !(self.depth >= 0.0 && self.depth < self.perspective) {
            return Err(FxError::config(
                "hero.depth",
                format!("must be in [0, {}), got {}", self.perspective, self.depth),
            ));
        }
        Ok(())
    }
}

impl SceneConfig {
    /// A config with every collection empty. Tests and callers that want a
    /// single hand-placed entity start from here.
    pub fn empty() -> Self {
        Self {
            particle_count: 0,
            shapes: ShapeCounts::none(),
            wave_count: 0,
            tunnel_count: 0,
            lights: Vec::new(),
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> FxResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FxResult<()> {
        if !(self.perspective > 0.0) {
            return Err(FxError::config("perspective", "must be positive"));
        }
        if !(self.cull_scale > 0.0 && self.cull_scale <= 1.0) {
            return Err(FxError::config("cull_scale", "must be in (0, 1]"));
        }
        if !(self.grid_spacing > 0.0) {
            return Err(FxError::config("grid_spacing", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.fade_alpha) {
            return Err(FxError::config("fade_alpha", "must be in [0, 1]"));
        }
        if self.particle_depth < 0.0 {
            return Err(FxError::config("particle_depth", "must not be negative"));
        }
        if self.geometry_depth < 0.0 {
            return Err(FxError::config("geometry_depth", "must not be negative"));
        }
        if self.geometry_margin < 0.0 {
            return Err(FxError::config("geometry_margin", "must not be negative"));
        }
        if self.tunnel_count > 0 && self.tunnel_segments < 2 {
            return Err(FxError::config(
                "tunnel_segments",
                format!("need at least 2 points per tunnel, got {}", self.tunnel_segments),
            ));
        }
        if let Some(light) = self.lights.iter().find(|l| !(l.radius > 0.0)) {
            return Err(FxError::config(
                "lights",
                format!("falloff radius must be positive, got {}", light.radius),
            ));
        }
        if !(self.cursor.easing > 0.0 && self.cursor.easing <= 1.0) {
            return Err(FxError::config("cursor.easing", "must be in (0, 1]"));
        }
        if !(self.cursor.ripple_seconds > 0.0) {
            return Err(FxError::config("cursor.ripple_seconds", "must be positive"));
        }
        self.hero.validate()
    }
}
