//! The particle entity, wraparound and perspective projection.

use glam::{Vec2, Vec3};

/// A simulated point in viewport-pixel / depth units.
///
/// Position and velocity change every frame. `size` and `opacity` are fixed
/// at spawn and only readable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// `x, y` in viewport pixels, `z` in depth units.
    pub position: Vec3,
    /// Per-frame displacement.
    pub velocity: Vec3,
    size: f32,
    opacity: f32,
}

/// A particle projected into screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Screen position.
    pub center: Vec2,
    /// Core radius after perspective.
    pub radius: f32,
    /// Opacity after perspective.
    pub alpha: f32,
    /// Perspective scale used for this projection.
    pub scale: f32,
}

impl Particle {
    /// Create a particle with fixed render attributes.
    pub fn new(position: Vec3, velocity: Vec3, size: f32, opacity: f32) -> Self {
        Self {
            position,
            velocity,
            size,
            opacity,
        }
    }

    /// Render size before perspective.
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Opacity baseline before perspective.
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Planar (x, y) position, ignoring depth.
    #[inline]
    pub fn planar(&self) -> Vec2 {
        self.position.truncate()
    }

    /// Move by one frame of velocity, then wrap every axis into its range.
    pub fn advance(&mut self, width: f32, height: f32, depth: f32) {
        let p = self.position + self.velocity;
        self.position = Vec3::new(
            wrap_axis(p.x, width),
            wrap_axis(p.y, height),
            wrap_axis(p.z, depth),
        );
    }

    /// Project into screen space with a scalar perspective factor.
    pub fn project(&self, depth: f32) -> Projection {
        let scale = perspective_scale(self.position.z, depth);
        Projection {
            center: self.planar() * scale,
            radius: self.size * scale,
            alpha: self.opacity * scale,
            scale,
        }
    }
}

/// Map `value` into `[0, bound)`, re-entering at the opposite side.
///
/// Overshoots of several bound widths still land inside the range. A
/// non-positive bound has no valid interior and maps everything to 0.
#[inline]
pub fn wrap_axis(value: f32, bound: f32) -> f32 {
    if bound <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    if (0.0..bound).contains(&value) {
        return value;
    }
    let wrapped = value.rem_euclid(bound);
    // rem_euclid rounds tiny negatives up to exactly `bound`
    if wrapped >= bound {
        0.0
    } else {
        wrapped
    }
}

/// Scale factor for a point at depth `z`: `depth / (depth + z)`.
///
/// Nearer points (small `z`) get a factor close to 1.
#[inline]
pub fn perspective_scale(z: f32, depth: f32) -> f32 {
    depth / (depth + z)
}
