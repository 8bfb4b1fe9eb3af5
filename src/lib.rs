//! # starfield
//!
//! An ambient pseudo-3D particle field meant to sit behind other content.
//!
//! A few dozen points drift through a box of viewport width, height and a
//! fixed depth. Every frame they move, wrap around at the edges, shrink and
//! dim with depth through a scalar perspective factor, and get linked by
//! faint lines when they pass close to each other. The only input is a
//! dark/light theme flag.
//!
//! ## Quick Start
//!
//! ```ignore
//! use starfield::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     Backdrop::new()
//!         .with_theme(Theme::Dark)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### The field
//!
//! [`ParticleField`] owns the particles and a seedable random source. The
//! particle count is `min(max_particles, floor(width * height /
//! area_per_particle))`, 50 and 25000 by default, so the quadratic link pass
//! stays cheap on any viewport. A resize reseeds the whole set.
//!
//! ### Surfaces
//!
//! The field draws through the [`DrawSurface`] trait. [`PixelCanvas`]
//! rasterizes on the CPU; [`RecordingSurface`] records a display list for
//! tests.
//!
//! ### Hosts and the frame loop
//!
//! A [`Background`] is a field mounted into a [`Host`]. The loop is explicit:
//! each delivered [`FrameHandle`] runs one frame and requests the next, and
//! unmounting cancels the one outstanding handle. [`ManualHost`] drives the
//! loop by hand; [`Backdrop`] drives it from a native window.

mod background;
pub mod config;
mod error;
mod field;
mod gpu;
pub mod host;
pub mod links;
pub mod palette;
pub mod particle;
pub mod raster;
pub mod spawn;
pub mod surface;
pub mod time;
mod window;

pub use background::Background;
pub use config::{FieldConfig, LinkStrategy};
pub use error::{ConfigError, GpuError, MountError, RunError};
pub use field::{FrameStats, ParticleField};
pub use glam::{Vec2, Vec3, Vec4};
pub use host::{FrameHandle, Host, ListenerHandle, ManualHost, ThemeFlag};
pub use links::Link;
pub use palette::{ColorStop, Palette, Rgba, Theme};
pub use particle::{Particle, Projection};
pub use raster::PixelCanvas;
pub use surface::{DrawCommand, DrawSurface, Paint, RecordingSurface};
pub use time::FrameClock;
pub use window::Backdrop;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use starfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::background::Background;
    pub use crate::config::{FieldConfig, LinkStrategy};
    pub use crate::error::{MountError, RunError};
    pub use crate::field::{FrameStats, ParticleField};
    pub use crate::host::{Host, ManualHost, ThemeFlag};
    pub use crate::palette::Theme;
    pub use crate::raster::PixelCanvas;
    pub use crate::surface::{DrawSurface, RecordingSurface};
    pub use crate::window::Backdrop;
    pub use crate::{Vec2, Vec3};
}
