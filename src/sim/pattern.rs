//! Seed-pattern sampling for the main game's particle scatter
//!
//! Randomness is injected so a seeded RNG reproduces the same scatter.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use super::motion::PatternKind;
use super::state::{Particle, Viewport};
use crate::{lemniscate, polar_to_cartesian};

/// Half-width of the vertical/horizontal bands
pub const BAND_HALF_WIDTH: f32 = 60.0;
/// Per-axis jitter applied to every sampled point
pub const JITTER: f32 = 10.0;
/// Particle radius range
pub const PARTICLE_MIN_RADIUS: f32 = 10.0;
pub const PARTICLE_MAX_RADIUS: f32 = 25.0;

/// Pattern scale for a viewport
#[inline]
pub fn pattern_size(viewport: Viewport) -> f32 {
    viewport.min_side() * 0.7
}

/// Sample one un-jittered point of `kind`
pub fn sample_point<R: Rng + ?Sized>(kind: PatternKind, viewport: Viewport, rng: &mut R) -> Vec2 {
    let (w, h) = (viewport.width, viewport.height);
    let center = viewport.center();
    let size = pattern_size(viewport);

    match kind {
        PatternKind::Vertical => Vec2::new(
            center.x + rng.random_range(-BAND_HALF_WIDTH..BAND_HALF_WIDTH),
            h * 0.15 + rng.random::<f32>() * h * 0.7,
        ),
        PatternKind::Horizontal => Vec2::new(
            w * 0.15 + rng.random::<f32>() * w * 0.7,
            center.y + rng.random_range(-BAND_HALF_WIDTH..BAND_HALF_WIDTH),
        ),
        PatternKind::Circle => {
            let angle = rng.random::<f32>() * TAU;
            let r = rng.random::<f32>() * (size / 3.0);
            polar_to_cartesian(center, r, angle)
        }
        PatternKind::Fan => {
            // Angles in [-225°, -135°): quarter turn swept left of a pivot at 80% height
            let angle = -PI * 1.25 + rng.random::<f32>() * (PI / 2.0);
            let r = size / 4.0 + rng.random::<f32>() * (size / 2.0);
            polar_to_cartesian(Vec2::new(center.x, h * 0.8), r, angle)
        }
        PatternKind::Infinity => {
            let t = rng.random::<f32>() * TAU;
            center + lemniscate(size / 4.0, t)
        }
    }
}

/// Scatter `count` particles along `kind`'s pattern
pub fn seed_particles<R: Rng + ?Sized>(
    kind: PatternKind,
    viewport: Viewport,
    count: usize,
    rng: &mut R,
) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let base = sample_point(kind, viewport, rng);
            let jitter = Vec2::new(
                rng.random_range(-JITTER..JITTER),
                rng.random_range(-JITTER..JITTER),
            );
            let radius = rng.random_range(PARTICLE_MIN_RADIUS..PARTICLE_MAX_RADIUS);
            Particle::new(base + jitter, radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEW: Viewport = Viewport {
        width: 1280.0,
        height: 720.0,
    };

    #[test]
    fn test_same_seed_same_scatter() {
        let a = seed_particles(PatternKind::Fan, VIEW, 50, &mut Pcg32::seed_from_u64(7));
        let b = seed_particles(PatternKind::Fan, VIEW, 50, &mut Pcg32::seed_from_u64(7));
        assert_eq!(a.len(), 50);
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.radius, pb.radius);
        }
    }

    #[test]
    fn test_vertical_band_is_narrow_and_centered() {
        let mut rng = Pcg32::seed_from_u64(1);
        for p in seed_particles(PatternKind::Vertical, VIEW, 300, &mut rng) {
            assert!((p.pos.x - 640.0).abs() <= BAND_HALF_WIDTH + JITTER);
            assert!(p.pos.y >= 720.0 * 0.15 - JITTER && p.pos.y <= 720.0 * 0.85 + JITTER);
            assert!(p.active);
        }
    }

    #[test]
    fn test_horizontal_band_spans_middle_of_width() {
        let mut rng = Pcg32::seed_from_u64(2);
        for p in seed_particles(PatternKind::Horizontal, VIEW, 300, &mut rng) {
            assert!((p.pos.y - 360.0).abs() <= BAND_HALF_WIDTH + JITTER);
            assert!(p.pos.x >= 1280.0 * 0.15 - JITTER && p.pos.x <= 1280.0 * 0.85 + JITTER);
        }
    }

    #[test]
    fn test_fan_points_sweep_left_of_pivot() {
        let mut rng = Pcg32::seed_from_u64(3);
        let pivot = Vec2::new(640.0, 720.0 * 0.8);
        let size = pattern_size(VIEW);
        for _ in 0..500 {
            let p = sample_point(PatternKind::Fan, VIEW, &mut rng);
            let r = p.distance(pivot);
            assert!(r >= size / 4.0 - 1e-3 && r <= size * 0.75 + 1e-3);
            assert!(p.x < pivot.x);
            assert!((p.y - pivot.y).abs() <= (p.x - pivot.x).abs() + 1e-3);
        }
    }

    proptest! {
        #[test]
        fn prop_particles_respect_radius_range(seed in any::<u64>(), kind_idx in 0usize..5) {
            let kinds = [
                PatternKind::Vertical,
                PatternKind::Horizontal,
                PatternKind::Fan,
                PatternKind::Circle,
                PatternKind::Infinity,
            ];
            let mut rng = Pcg32::seed_from_u64(seed);
            let particles = seed_particles(kinds[kind_idx], VIEW, 40, &mut rng);
            for p in &particles {
                prop_assert!(p.radius >= PARTICLE_MIN_RADIUS && p.radius < PARTICLE_MAX_RADIUS);
            }
        }

        #[test]
        fn prop_circle_stays_within_third_of_size(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let size = pattern_size(VIEW);
            for _ in 0..50 {
                let p = sample_point(PatternKind::Circle, VIEW, &mut rng);
                prop_assert!(p.distance(VIEW.center()) <= size / 3.0 + 1e-3);
            }
        }

        #[test]
        fn prop_infinity_stays_within_curve_bounds(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let s = pattern_size(VIEW) / 4.0;
            for _ in 0..50 {
                let p = sample_point(PatternKind::Infinity, VIEW, &mut rng) - VIEW.center();
                prop_assert!(p.x.abs() <= s + 1e-3);
                prop_assert!(p.y.abs() <= s / 2.0 + 1e-3);
            }
        }
    }
}
