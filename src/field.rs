//! The particle field engine.
//!
//! A [`ParticleField`] owns one particle set and the random source used to
//! seed it. Each frame it advances every particle, projects it with a scalar
//! perspective factor and draws a glow, a core and the proximity links onto a
//! [`DrawSurface`].
//!
//! ```ignore
//! let mut field = ParticleField::with_seed(800, 600, FieldConfig::default(), 42)?;
//! let mut canvas = PixelCanvas::new(800, 600);
//!
//! field.frame(&mut canvas, Theme::Dark);
//! ```

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::FieldConfig;
use crate::error::ConfigError;
use crate::links::{find_links, Link};
use crate::palette::Theme;
use crate::particle::{Particle, Projection};
use crate::spawn::spawn_particles;
use crate::surface::{DrawSurface, Paint};

/// Width of every link stroke, in pixels.
const LINK_WIDTH: f32 = 1.0;

/// Glow disc radius as a multiple of the projected core radius.
const GLOW_DISC: f32 = 2.0;

/// Counts from one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub particles: usize,
    pub links: usize,
}

/// A seeded, self-contained particle field.
#[derive(Debug, Clone)]
pub struct ParticleField {
    width: u32,
    height: u32,
    config: FieldConfig,
    particles: Vec<Particle>,
    rng: SmallRng,
    epoch: u64,
}

impl ParticleField {
    /// Create and seed a field using an entropy-seeded random source.
    pub fn new(width: u32, height: u32, config: FieldConfig) -> Result<Self, ConfigError> {
        Self::from_rng(width, height, config, SmallRng::from_entropy())
    }

    /// Create and seed a field with a deterministic random source.
    pub fn with_seed(
        width: u32,
        height: u32,
        config: FieldConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::from_rng(width, height, config, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(
        width: u32,
        height: u32,
        config: FieldConfig,
        rng: SmallRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut field = Self {
            width,
            height,
            config,
            particles: Vec::new(),
            rng,
            epoch: 0,
        };
        field.seed(width, height);
        Ok(field)
    }

    /// Replace the whole particle set for a `width` x `height` viewport.
    ///
    /// Starts a new epoch. A zero-area viewport leaves the set empty.
    pub fn seed(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.particles = spawn_particles(&mut self.rng, width, height, &self.config);
        self.epoch += 1;
        log::debug!(
            "seeded {} particles for {}x{} (epoch {})",
            self.particles.len(),
            width,
            height,
            self.epoch
        );
    }

    /// Adopt new viewport dimensions. Positions and velocities are discarded
    /// and reseeded, never rescaled.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.seed(width, height);
    }

    /// Move every particle by its velocity and wrap it back into range.
    pub fn advance(&mut self) {
        let (w, h, d) = (self.width as f32, self.height as f32, self.config.depth);
        for p in &mut self.particles {
            p.advance(w, h, d);
        }
    }

    /// Draw the current state without advancing it.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S, theme: Theme) -> FrameStats {
        let palette = theme.palette();

        surface.clear();
        surface.fill_vertical_gradient(&palette.background);

        let projected: Vec<Projection> = self
            .particles
            .iter()
            .map(|p| p.project(self.config.depth))
            .collect();

        let core = Paint::Solid(palette.core);
        for proj in &projected {
            let glow = Paint::Radial {
                radius: proj.radius * self.config.glow_scale,
                stops: palette.glow.to_vec(),
            };
            surface.fill_circle(proj.center, proj.radius * GLOW_DISC, &glow, proj.alpha);
            surface.fill_circle(proj.center, proj.radius, &core, proj.alpha);
        }

        let links = find_links(&self.particles, &self.config);
        for link in &links {
            surface.stroke_line(
                projected[link.a].center,
                projected[link.b].center,
                LINK_WIDTH,
                palette.link,
                link.alpha,
            );
        }

        FrameStats {
            particles: projected.len(),
            links: links.len(),
        }
    }

    /// Advance one step, then render it.
    pub fn frame<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, theme: Theme) -> FrameStats {
        self.advance();
        self.render(surface, theme)
    }

    /// Links for the current state.
    pub fn links(&self) -> Vec<Link> {
        find_links(&self.particles, &self.config)
    }

    /// Screen positions of every particle for the current state.
    pub fn projected_centers(&self) -> Vec<Vec2> {
        self.particles
            .iter()
            .map(|p| p.project(self.config.depth).center)
            .collect()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Number of reseeds so far; the initial seed is epoch 1.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
