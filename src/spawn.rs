//! Particle count and seeded initialization.

use glam::Vec3;
use rand::Rng;

use crate::config::FieldConfig;
use crate::particle::Particle;

/// Number of particles for a viewport: one per `area_per_particle`,
/// capped at `max_particles`.
pub fn particle_count(width: u32, height: u32, config: &FieldConfig) -> usize {
    let area = width as f64 * height as f64;
    let by_area = (area / config.area_per_particle as f64).floor();
    (by_area as u64).min(config.max_particles as u64) as usize
}

/// Spawn a fresh particle set with every attribute drawn uniformly.
///
/// Zero-area viewports yield an empty set.
pub fn spawn_particles<R: Rng>(
    rng: &mut R,
    width: u32,
    height: u32,
    config: &FieldConfig,
) -> Vec<Particle> {
    let count = particle_count(width, height, config);
    let (w, h) = (width as f32, height as f32);
    let planar = config.planar_speed;
    let depth_speed = config.depth_speed;

    (0..count)
        .map(|_| {
            let position = Vec3::new(
                below(rng, w),
                below(rng, h),
                below(rng, config.depth),
            );
            let velocity = Vec3::new(
                rng.gen_range(-planar..=planar),
                rng.gen_range(-planar..=planar),
                rng.gen_range(-depth_speed..=depth_speed),
            );
            let size = rng.gen_range(config.size_range.clone());
            let opacity = rng.gen_range(config.opacity_range.clone());
            Particle::new(position, velocity, size, opacity)
        })
        .collect()
}

// gen_range on f32 can return the exclusive end after rounding
fn below<R: Rng>(rng: &mut R, bound: f32) -> f32 {
    let v = rng.gen::<f32>() * bound;
    if v >= bound {
        0.0
    } else {
        v
    }
}
