//! Field configuration.
//!
//! Every numeric constant the particle field uses lives here, so a host can
//! tune density, motion and link appearance without touching the engine.
//!
//! ```ignore
//! let config = FieldConfig::default()
//!     .with_max_particles(80)
//!     .with_link_distance(120.0);
//! ```

use std::ops::Range;

use crate::error::ConfigError;

/// How the proximity pass finds particle pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStrategy {
    /// Compare every unordered pair. Cost is quadratic in the particle count,
    /// which the density cap keeps small.
    #[default]
    AllPairs,
    /// Bucket particles into cells of `link_distance` and only compare
    /// neighbouring cells.
    Grid,
}

/// Tunable parameters of a particle field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Upper bound on the particle count regardless of viewport area.
    pub max_particles: u32,
    /// Viewport area (in px²) that earns one particle.
    pub area_per_particle: f32,
    /// Depth range `[0, depth)` and the perspective focal constant.
    pub depth: f32,
    /// Planar velocities are drawn from `[-planar_speed, planar_speed]`.
    pub planar_speed: f32,
    /// Depth velocity is drawn from `[-depth_speed, depth_speed]`.
    pub depth_speed: f32,
    /// Render size range.
    pub size_range: Range<f32>,
    /// Opacity baseline range.
    pub opacity_range: Range<f32>,
    /// Planar distance below which two particles are linked.
    pub link_distance: f32,
    /// Alpha multiplier applied to every link.
    pub link_strength: f32,
    /// Glow gradient radius as a multiple of the projected radius.
    pub glow_scale: f32,
    /// Pair search used by the link pass.
    pub link_strategy: LinkStrategy,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            max_particles: 50,
            area_per_particle: 25_000.0,
            depth: 1000.0,
            planar_speed: 0.25,
            depth_speed: 1.0,
            size_range: 1.0..3.0,
            opacity_range: 0.1..0.6,
            link_distance: 150.0,
            link_strength: 0.1,
            glow_scale: 3.0,
            link_strategy: LinkStrategy::AllPairs,
        }
    }
}

impl FieldConfig {
    /// Set the density cap.
    pub fn with_max_particles(mut self, max: u32) -> Self {
        self.max_particles = max;
        self
    }

    /// Set the viewport area that earns one particle.
    pub fn with_area_per_particle(mut self, area: f32) -> Self {
        self.area_per_particle = area;
        self
    }

    /// Set the depth range.
    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    /// Set the maximum planar and depth speeds.
    pub fn with_speeds(mut self, planar: f32, depth: f32) -> Self {
        self.planar_speed = planar;
        self.depth_speed = depth;
        self
    }

    /// Set the render size range.
    pub fn with_size_range(mut self, range: Range<f32>) -> Self {
        self.size_range = range;
        self
    }

    /// Set the opacity baseline range.
    pub fn with_opacity_range(mut self, range: Range<f32>) -> Self {
        self.opacity_range = range;
        self
    }

    /// Set the link distance threshold.
    pub fn with_link_distance(mut self, distance: f32) -> Self {
        self.link_distance = distance;
        self
    }

    /// Set the link alpha multiplier.
    pub fn with_link_strength(mut self, strength: f32) -> Self {
        self.link_strength = strength;
        self
    }

    /// Set the glow radius multiple.
    pub fn with_glow_scale(mut self, scale: f32) -> Self {
        self.glow_scale = scale;
        self
    }

    /// Select the pair search used by the link pass.
    pub fn with_link_strategy(mut self, strategy: LinkStrategy) -> Self {
        self.link_strategy = strategy;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("area_per_particle", self.area_per_particle)?;
        positive("depth", self.depth)?;
        positive("link_distance", self.link_distance)?;
        non_negative("planar_speed", self.planar_speed)?;
        non_negative("depth_speed", self.depth_speed)?;
        non_negative("link_strength", self.link_strength)?;
        non_negative("glow_scale", self.glow_scale)?;
        range("size_range", &self.size_range, 0.0)?;
        range("opacity_range", &self.opacity_range, 0.0)?;
        if self.opacity_range.end > 1.0 {
            return Err(ConfigError::InvalidRange {
                name: "opacity_range",
                start: self.opacity_range.start,
                end: self.opacity_range.end,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn range(name: &'static str, r: &Range<f32>, min: f32) -> Result<(), ConfigError> {
    let ok = r.start.is_finite() && r.end.is_finite() && r.start >= min && r.start < r.end;
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange {
            name,
            start: r.start,
            end: r.end,
        })
    }
}
