use std::f64::consts::{PI, TAU};

use glam::{DVec2, DVec3};

use super::Viewport;
use crate::rng::SceneRng;
use crate::surface::{Rgba, Stroke, Surface};

const TUNNEL_COLOR: Rgba = Rgba::new(245, 87, 108, 1.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TunnelPoint {
    pub position: DVec3,
    /// Horizontal shift applied when drawing.
    pub offset: f64,
}

/// A scattered polyline with a brightness pulse flowing along it.
#[derive(Clone, Debug, PartialEq)]
pub struct QuantumTunnel {
    pub points: Vec<TunnelPoint>,
    pub radius: f64,
    pub length: f64,
    pub rotation: f64,
    pub rotation_speed: f64,
    /// Position of the pulse along the path, in `[0, 1]`.
    pub flow: f64,
    pub flow_speed: f64,
}

impl QuantumTunnel {
    pub fn spawn(rng: &mut SceneRng, viewport: Viewport, segments: usize) -> Self {
        let radius = rng.between(20.0, 50.0);
        let length = rng.between(300.0, 700.0);
        let rotation = rng.angle();
        let rotation_speed = rng.spread(0.01);
        let flow_speed = rng.between(0.02, 0.07);

        let points = (0..segments)
            .map(|j| {
                let t = j as f64 / segments as f64;
                TunnelPoint {
                    position: DVec3::new(
                        rng.between(0.0, viewport.width),
                        rng.between(0.0, viewport.height),
                        t * length - length / 2.0,
                    ),
                    offset: (t * PI * 4.0).sin() * 50.0,
                }
            })
            .collect();

        Self {
            points,
            radius,
            length,
            rotation,
            rotation_speed,
            flow: 0.0,
            flow_speed,
        }
    }

    pub fn advance(&mut self) {
        self.rotation = (self.rotation + self.rotation_speed).rem_euclid(TAU);
        self.flow += self.flow_speed;
        if self.flow > 1.0 {
            self.flow = 0.0;
        }
    }

    /// Brightness of segment `index` in `[0, 1]`.
    pub fn segment_intensity(&self, index: usize) -> f64 {
        let t = index as f64 / self.points.len() as f64 + self.flow;
        (t * TAU).sin() * 0.5 + 0.5
    }

    /// Returns the number of segments stroked.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        let mut drawn = 0;
        for (i, pair) in self.points.windows(2).enumerate() {
            let alpha = self.segment_intensity(i) * 0.5;
            let ends = [screen_point(&pair[0]), screen_point(&pair[1])];
            surface.stroke_path(&ends, false, Stroke::new(TUNNEL_COLOR.with_alpha(alpha), 2.0));
            drawn += 1;
        }
        drawn
    }
}

fn screen_point(point: &TunnelPoint) -> DVec2 {
    DVec2::new(point.position.x + point.offset, point.position.y)
}
