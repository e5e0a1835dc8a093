use std::f64::consts::TAU;

use glam::{DVec2, DVec3};

use super::Viewport;
use crate::rng::SceneRng;
use crate::surface::{Paint, Rgba, Stroke, Surface};

const GRID_COLOR: Rgba = Rgba::new(102, 126, 234, 1.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridNode {
    pub position: DVec3,
    pub intensity: f64,
    pub pulse: f64,
}

/// Regular lattice of pulsing dots, each joined to its eight neighbours.
#[derive(Clone, Debug, PartialEq)]
pub struct HolographicGrid {
    pub columns: usize,
    pub rows: usize,
    pub spacing: f64,
    /// Column-major: node `(c, r)` lives at `c * rows + r`.
    pub nodes: Vec<GridNode>,
    /// Each neighbouring pair once, lower index first.
    pub connections: Vec<(usize, usize)>,
    /// Seconds of pulse time, kept in `[0, 2π)`.
    pub clock: f64,
}

impl HolographicGrid {
    pub fn build(rng: &mut SceneRng, viewport: Viewport, spacing: f64) -> Self {
        let columns = cells(viewport.width, spacing);
        let rows = cells(viewport.height, spacing);

        let mut nodes = Vec::with_capacity(columns * rows);
        for c in 0..columns {
            for r in 0..rows {
                let (cf, rf) = (c as f64, r as f64);
                nodes.push(GridNode {
                    position: DVec3::new(
                        cf * spacing,
                        rf * spacing,
                        (cf * 0.1).sin() * (rf * 0.1).cos() * 20.0,
                    ),
                    intensity: rng.between(0.3, 0.8),
                    pulse: rng.angle(),
                });
            }
        }

        // Diagonals are within 1.5 spacings, so every node links to its full
        // 8-neighbourhood. Only forward offsets are listed to keep pairs unique.
        let mut connections = Vec::new();
        for c in 0..columns {
            for r in 0..rows {
                let from = c * rows + r;
                for (dc, dr) in [(0isize, 1isize), (1, -1), (1, 0), (1, 1)] {
                    let (nc, nr) = (c as isize + dc, r as isize + dr);
                    if nc < columns as isize && nr >= 0 && nr < rows as isize {
                        connections.push((from, nc as usize * rows + nr as usize));
                    }
                }
            }
        }

        Self {
            columns,
            rows,
            spacing,
            nodes,
            connections,
            clock: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        self.clock = (self.clock + dt).rem_euclid(TAU);
    }

    /// Current glow of a node in `[0, intensity]`.
    pub fn glow(&self, node: &GridNode) -> f64 {
        node.intensity * (0.5 + 0.5 * (self.clock + node.pulse).sin())
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for node in &self.nodes {
            let glow = self.glow(node);
            surface.fill_circle(
                node.position.truncate(),
                1.0,
                &Paint::Solid(GRID_COLOR.with_alpha(glow * 0.3).into()),
            );
        }
        for &(a, b) in &self.connections {
            let glow = self.glow(&self.nodes[a]);
            let ends: [DVec2; 2] = [self.nodes[a].position.truncate(), self.nodes[b].position.truncate()];
            surface.stroke_path(&ends, false, Stroke::new(GRID_COLOR.with_alpha(glow * 0.1), 0.5));
        }
    }
}

fn cells(extent: f64, spacing: f64) -> usize {
    if extent <= 0.0 {
        0
    } else {
        (extent / spacing).ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_dimensions_round_up() {
        let mut rng = SceneRng::seeded(2);
        let grid = HolographicGrid::build(&mut rng, Viewport::new(120.0, 100.0), 50.0);
        assert_eq!((grid.columns, grid.rows), (3, 2));
        assert_eq!(grid.nodes.len(), 6);
        assert_eq!(grid.nodes[1].position.truncate(), DVec2::new(0.0, 50.0));
        assert_eq!(grid.nodes[2].position.truncate(), DVec2::new(50.0, 0.0));
    }

    #[test]
    fn connections_cover_the_eight_neighbourhood_once() {
        let mut rng = SceneRng::seeded(2);
        let grid = HolographicGrid::build(&mut rng, Viewport::new(150.0, 150.0), 50.0);
        // 3x3 lattice: 6 vertical + 6 horizontal + 8 diagonal edges
        assert_eq!(grid.connections.len(), 20);
        assert!(grid.connections.iter().all(|&(a, b)| a < b));
    }

    #[test]
    fn empty_viewport_has_no_nodes() {
        let mut rng = SceneRng::seeded(2);
        let grid = HolographicGrid::build(&mut rng, Viewport::default(), 50.0);
        assert!(grid.nodes.is_empty());
        assert!(grid.connections.is_empty());
    }

    #[test]
    fn clock_wraps() {
        let mut rng = SceneRng::seeded(2);
        let mut grid = HolographicGrid::build(&mut rng, Viewport::new(50.0, 50.0), 50.0);
        grid.advance(TAU + 1.0);
        assert!((grid.clock - 1.0).abs() < 1e-12);
    }
}
