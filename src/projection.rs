use glam::{DVec2, DVec3};

/// Pinhole projection: `scale = p / (p + z)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub perspective: f64,
    /// Points whose scale is at or below this are not drawn.
    pub cull_scale: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub point: DVec2,
    pub size: f64,
    pub scale: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            perspective: 500.0,
            cull_scale: 0.1,
        }
    }
}

impl Projection {
    pub fn new(perspective: f64, cull_scale: f64) -> Self {
        Self {
            perspective,
            cull_scale,
        }
    }

    /// Raw scale factor, `None` when the point sits on or behind the camera
    /// plane.
    pub fn scale(&self, z: f64) -> Option<f64> {
        let depth = self.perspective + z;
        (depth > 0.0).then(|| self.perspective / depth)
    }

    /// Projects `position` and a size at that depth, or `None` when the
    /// point is culled.
    pub fn project(&self, position: DVec3, size: f64) -> Option<Projected> {
        let scale = self.scale(position.z)?;
        if scale <= self.cull_scale {
            return None;
        }
        Some(Projected {
            point: position.truncate() * scale,
            size: size * scale,
            scale,
        })
    }
}
