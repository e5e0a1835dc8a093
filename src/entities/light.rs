use glam::DVec3;

use super::Viewport;
use crate::config::LightConfig;
use crate::surface::Rgba;

/// Point light used to brighten nearby particles. Lights are placed once and
/// never touched by the tick loop.
#[derive(Clone, Debug, PartialEq)]
pub struct LightSource {
    pub position: DVec3,
    pub intensity: f64,
    pub color: Rgba,
    pub radius: f64,
}

impl LightSource {
    pub fn from_config(config: &LightConfig, viewport: Viewport) -> Self {
        Self {
            position: DVec3::new(
                config.x * viewport.width,
                config.y * viewport.height,
                config.z,
            ),
            intensity: config.intensity,
            color: Rgba::rgb(config.color),
            radius: config.radius,
        }
    }

    /// Linear falloff, zero at or beyond `radius`.
    pub fn contribution(&self, point: DVec3) -> f64 {
        let distance = self.position.distance(point);
        if distance < self.radius {
            self.intensity * (1.0 - distance / self.radius)
        } else {
            0.0
        }
    }
}

/// Summed light at `point`, clamped to 1.
pub fn illumination(lights: &[LightSource], point: DVec3) -> f64 {
    lights
        .iter()
        .map(|light| light.contribution(point))
        .sum::<f64>()
        .min(1.0)
}
