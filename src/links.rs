//! Proximity links between particles.
//!
//! Two particles are linked when their planar (pre-projection) distance is
//! below `link_distance`. The default scan compares every unordered pair; the
//! particle cap keeps that to a few hundred checks per frame. The grid scan
//! buckets particles into square cells one link distance wide so only the
//! 3x3 neighbourhood of each cell is compared. Both produce the same links.

use std::collections::HashMap;

use crate::config::{FieldConfig, LinkStrategy};
use crate::particle::{perspective_scale, Particle};

/// A link between particles `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    /// Planar distance between the two particles.
    pub distance: f32,
    /// Stroke alpha, see [`link_alpha`].
    pub alpha: f32,
}

/// Alpha of a link: fades linearly to zero at `link_distance` and dims with
/// the deeper of the two endpoints.
pub fn link_alpha(distance: f32, scale_a: f32, scale_b: f32, config: &FieldConfig) -> f32 {
    if distance.is_nan() || distance >= config.link_distance {
        return 0.0;
    }
    (1.0 - distance / config.link_distance) * config.link_strength * scale_a.min(scale_b)
}

/// Find every linked pair, sorted by `(a, b)`.
pub fn find_links(particles: &[Particle], config: &FieldConfig) -> Vec<Link> {
    match config.link_strategy {
        LinkStrategy::AllPairs => all_pairs(particles, config),
        LinkStrategy::Grid => grid(particles, config),
    }
}

fn make_link(particles: &[Particle], a: usize, b: usize, config: &FieldConfig) -> Option<Link> {
    let (pa, pb) = (&particles[a], &particles[b]);
    let distance = pa.planar().distance(pb.planar());
    if distance >= config.link_distance {
        return None;
    }
    let alpha = link_alpha(
        distance,
        perspective_scale(pa.position.z, config.depth),
        perspective_scale(pb.position.z, config.depth),
        config,
    );
    Some(Link { a, b, distance, alpha })
}

fn all_pairs(particles: &[Particle], config: &FieldConfig) -> Vec<Link> {
    let mut links = Vec::new();
    for a in 0..particles.len() {
        for b in (a + 1)..particles.len() {
            if let Some(link) = make_link(particles, a, b, config) {
                links.push(link);
            }
        }
    }
    links
}

// Float-to-int casts saturate, so very small cells pile up at the edge cell.
fn cell_of(particle: &Particle, cell_size: f32) -> (i64, i64) {
    let p = particle.planar() / cell_size;
    (p.x.floor() as i64, p.y.floor() as i64)
}

fn neighbour(cell: (i64, i64), dx: i64, dy: i64) -> Option<(i64, i64)> {
    Some((cell.0.checked_add(dx)?, cell.1.checked_add(dy)?))
}

fn grid(particles: &[Particle], config: &FieldConfig) -> Vec<Link> {
    let cell_size = config.link_distance;
    let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, p) in particles.iter().enumerate() {
        cells.entry(cell_of(p, cell_size)).or_default().push(i);
    }

    let mut links = Vec::new();
    for (a, p) in particles.iter().enumerate() {
        let cell = cell_of(p, cell_size);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(bucket) = neighbour(cell, dx, dy).and_then(|key| cells.get(&key)) else {
                    continue;
                };
                for &b in bucket.iter().filter(|&&b| b > a) {
                    if let Some(link) = make_link(particles, a, b, config) {
                        links.push(link);
                    }
                }
            }
        }
    }
    links.sort_by_key(|l| (l.a, l.b));
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::spawn_particles;
    use glam::Vec3;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn at(x: f32, y: f32, z: f32) -> Particle {
        Particle::new(Vec3::new(x, y, z), Vec3::ZERO, 2.0, 0.5)
    }

    #[test]
    fn test_alpha_zero_at_and_beyond_threshold() {
        let config = FieldConfig::default();
        assert_eq!(link_alpha(150.0, 1.0, 1.0, &config), 0.0);
        assert_eq!(link_alpha(400.0, 1.0, 1.0, &config), 0.0);
        assert_eq!(link_alpha(f32::NAN, 1.0, 1.0, &config), 0.0);
    }

    #[test]
    fn test_alpha_increases_as_distance_shrinks() {
        let config = FieldConfig::default();
        let mut last = 0.0;
        for d in (0..150).rev() {
            let alpha = link_alpha(d as f32, 0.8, 0.6, &config);
            assert!(alpha > 0.0);
            assert!(alpha > last);
            last = alpha;
        }
        assert!((link_alpha(0.0, 0.8, 0.6, &config) - 0.06).abs() < 1e-6);
    }

    #[test]
    fn test_alpha_uses_deeper_scale() {
        let config = FieldConfig::default();
        assert_eq!(
            link_alpha(75.0, 1.0, 0.5, &config),
            link_alpha(75.0, 0.5, 0.5, &config)
        );
    }

    #[test]
    fn test_links_ignore_depth_for_distance() {
        let config = FieldConfig::default();
        let particles = [at(0.0, 0.0, 0.0), at(100.0, 0.0, 900.0), at(300.0, 0.0, 0.0)];
        let links = find_links(&particles, &config);

        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
        assert_eq!(links[0].distance, 100.0);
    }

    #[test]
    fn test_grid_matches_all_pairs() {
        let base = FieldConfig::default().with_max_particles(400);
        let grid_config = base.clone().with_link_strategy(LinkStrategy::Grid);

        for seed in 0..5 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let particles = spawn_particles(&mut rng, 1600, 1200, &base);
            assert_eq!(find_links(&particles, &base), find_links(&particles, &grid_config));
        }
    }

    #[test]
    fn test_grid_with_tiny_link_distance() {
        let base = FieldConfig::default().with_link_distance(1e-6);
        assert!(base.validate().is_ok());
        let grid_config = base.clone().with_link_strategy(LinkStrategy::Grid);

        let particles = [at(3000.0, 10.0, 0.0), at(3500.0, 10.0, 0.0)];
        assert!(find_links(&particles, &grid_config).is_empty());

        // Both land in the saturated edge cell and still link exactly once.
        let tiny = FieldConfig::default()
            .with_link_distance(1e-30)
            .with_link_strategy(LinkStrategy::Grid);
        let stacked = [at(3000.0, 3000.0, 0.0), at(3000.0, 3000.0, 500.0)];
        let links = find_links(&stacked, &tiny);
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
    }

    #[test]
    fn test_grid_field_frame_with_tiny_link_distance() {
        let config = FieldConfig::default()
            .with_link_distance(1e-6)
            .with_link_strategy(LinkStrategy::Grid);
        let mut field = crate::field::ParticleField::with_seed(3840, 2160, config, 1).unwrap();
        let mut surface = crate::surface::RecordingSurface::new(3840, 2160);

        let stats = field.frame(&mut surface, crate::palette::Theme::Dark);
        assert_eq!(stats.particles, 50);
        assert_eq!(stats.links, 0);
    }

    #[test]
    fn test_no_links_for_empty_or_single() {
        let config = FieldConfig::default();
        assert!(find_links(&[], &config).is_empty());
        assert!(find_links(&[at(1.0, 1.0, 1.0)], &config).is_empty());
    }
}
