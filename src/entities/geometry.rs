use std::f64::consts::TAU;

use glam::{DVec2, DVec3};

use super::{wrap, Viewport};
use crate::projection::Projection;
use crate::rng::SceneRng;
use crate::surface::{Rgba, Stroke, Surface};

/// The solids a floating wireframe can pretend to be. Each one is drawn as a
/// flat outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Tetrahedron,
    Octahedron,
    Dodecahedron,
    Torus,
}

impl Shape {
    pub const ALL: [Self; 4] = [
        Self::Tetrahedron,
        Self::Octahedron,
        Self::Dodecahedron,
        Self::Torus,
    ];

    fn line_width(self) -> f64 {
        match self {
            Self::Torus => 3.0,
            _ => 2.0,
        }
    }
}

const DODECAHEDRON_SIDES: usize = 12;

#[derive(Clone, Debug, PartialEq)]
pub struct GeometryObject {
    pub shape: Shape,
    pub position: DVec3,
    /// Accumulated rotation about x, y and z, each kept in `[0, 2π)`.
    pub rotation: DVec3,
    pub rotation_speed: DVec3,
    pub size: f64,
    pub color: Rgba,
    pub velocity: DVec3,
}

impl GeometryObject {
    pub fn spawn(shape: Shape, rng: &mut SceneRng, viewport: Viewport, depth: f64) -> Self {
        Self {
            shape,
            position: DVec3::new(
                rng.between(0.0, viewport.width),
                rng.between(0.0, viewport.height),
                rng.between(-depth, depth),
            ),
            rotation: DVec3::ZERO,
            rotation_speed: DVec3::new(rng.spread(0.02), rng.spread(0.02), rng.spread(0.02)),
            size: rng.between(30.0, 80.0),
            color: Rgba::new(
                channel(rng.between(155.0, 255.0)),
                channel(rng.between(100.0, 200.0)),
                channel(rng.between(200.0, 300.0)),
                rng.between(0.3, 0.7),
            ),
            velocity: DVec3::new(rng.spread(0.5), rng.spread(0.5), rng.spread(1.0)),
        }
    }

    /// Moves and spins the object. Positions wrap `margin` beyond the
    /// viewport so objects slide fully off screen before re-entering on the
    /// other side.
    pub fn advance(&mut self, viewport: Viewport, depth: f64, margin: f64) {
        let r = self.rotation + self.rotation_speed;
        self.rotation = DVec3::new(r.x.rem_euclid(TAU), r.y.rem_euclid(TAU), r.z.rem_euclid(TAU));
        self.position += self.velocity;

        self.position.x = wrap(self.position.x, -margin, viewport.width + margin);
        self.position.y = wrap(self.position.y, -margin, viewport.height + margin);
        self.position.z = wrap(self.position.z, -depth - margin, depth + margin);
    }

    /// Outline vertices around `center` for the polygonal shapes. The torus
    /// is two circles and has no vertex list.
    pub fn outline(&self, center: DVec2, size: f64) -> Vec<DVec2> {
        let half = size / 2.0;
        match self.shape {
            Shape::Tetrahedron => {
                let h = size * 0.866;
                vec![
                    center + DVec2::new(0.0, -h / 2.0),
                    center + DVec2::new(-half, h / 2.0),
                    center + DVec2::new(half, h / 2.0),
                ]
            }
            Shape::Octahedron => vec![
                center + DVec2::new(0.0, -half),
                center + DVec2::new(half, 0.0),
                center + DVec2::new(0.0, half),
                center + DVec2::new(-half, 0.0),
            ],
            Shape::Dodecahedron => (0..DODECAHEDRON_SIDES)
                .map(|i| {
                    let angle = i as f64 / DODECAHEDRON_SIDES as f64 * TAU + self.rotation.z;
                    center + DVec2::from_angle(angle) * half
                })
                .collect(),
            Shape::Torus => Vec::new(),
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, projection: &Projection) -> bool {
        let Some(projected) = projection.project(self.position, self.size) else {
            return false;
        };
        let stroke = Stroke::new(self.color, self.shape.line_width());

        surface.save();
        surface.set_global_alpha(self.color.a * projected.scale);
        match self.shape {
            Shape::Torus => {
                surface.stroke_circle(projected.point, projected.size / 2.0, stroke);
                surface.stroke_circle(projected.point, projected.size / 4.0, stroke);
            }
            _ => {
                let points = self.outline(projected.point, projected.size);
                surface.stroke_path(&points, true, stroke);
            }
        }
        surface.restore();
        true
    }
}

fn channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}
