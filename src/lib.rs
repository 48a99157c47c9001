//! Cleaning Rush - a pointer-driven motion rehabilitation mini-game
//!
//! Core modules:
//! - `sim`: Deterministic screen/state engine (bubbles, buttons, particles, timers)
//! - `renderer`: Display-list renderer plus the Canvas2D backend
//! - `backdrop`: Procedural noise and stain layers
//! - `coach`: Feedback collaborator shown on the results screen
//! - `settings`: Runtime configuration

pub mod backdrop;
pub mod coach;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{CoachSettings, Settings};

use glam::Vec2;

/// Game configuration constants
///
/// Per-frame values assume one `tick` per display refresh (about 60 Hz).
/// They are not scaled by elapsed time.
pub mod consts {
    /// Radius of the sponge cursor used for every proximity test
    pub const SPONGE_RADIUS: f32 = 42.75;

    /// Scrub progress gained per frame while scrubbing a button
    pub const SCRUB_SENSITIVITY: f32 = 0.8;
    /// Scrub progress lost per frame otherwise
    pub const SCRUB_DECAY: f32 = 0.5;
    /// Progress at which a button (or the return zone) fires
    pub const PROGRESS_FULL: f32 = 100.0;
    /// Minimum pointer speed that counts as "moving"
    pub const MOVING_SPEED: f32 = 1.0;
    /// Pointer speed that stamps the last-significant-movement time
    pub const SIGNIFICANT_SPEED: f32 = 2.0;

    /// Start screen
    pub const START_BUBBLE_COUNT: usize = 80;
    pub const START_EXIT_DELAY_MS: f64 = 3000.0;
    pub const START_SLIDE_PER_FRAME: f32 = 12.0;
    pub const START_SLIDE_OVERSHOOT: f32 = 400.0;

    /// Warm-up drill
    pub const WARMUP_REPS: u32 = 5;
    pub const WARMUP_HALF_TRACK: f32 = 200.0;
    pub const WARMUP_END_ZONE: f32 = 50.0;
    pub const WARMUP_LATERAL_TOLERANCE: f32 = 100.0;

    /// Main game
    pub const PARTICLE_COUNT: usize = 300;
    pub const PARTICLE_SHRINK: f32 = 1.8;
    pub const SPEED_MODE_SECONDS: f32 = 30.0;
    /// Timer decrement per frame (frame-coupled, ~1/60 s)
    pub const TIMER_STEP: f32 = 0.016;
    pub const ENDURANCE_GAIN: f32 = 0.05;
    pub const ENDURANCE_DECAY: f32 = 0.3;
    pub const ENDURANCE_IDLE_MS: f64 = 1000.0;

    /// Results screen return zone
    pub const RETURN_ZONE_OFFSET_Y: f32 = 130.0;
    pub const RETURN_ZONE_HALF_W: f32 = 120.0;
    pub const RETURN_ZONE_HALF_H: f32 = 30.0;
    pub const RETURN_GAIN: f32 = 2.5;
    pub const RETURN_DECAY: f32 = 1.5;

    /// Cosmetic guide ring rotation per frame (radians)
    pub const GUIDE_ROTATION_STEP: f32 = 0.035;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Convert polar (r, theta) to cartesian (x, y) around `center`
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Point on the figure-eight (Bernoulli lemniscate) of scale `s` at parameter `t`
#[inline]
pub fn lemniscate(s: f32, t: f32) -> Vec2 {
    let (sin, cos) = t.sin_cos();
    let denom = 1.0 + sin * sin;
    Vec2::new(s * cos / denom, s * cos * sin / denom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_polar_to_cartesian_offsets_from_center() {
        let p = polar_to_cartesian(Vec2::new(10.0, 20.0), 5.0, FRAC_PI_2);
        assert!((p.x - 10.0).abs() < 1e-5);
        assert!((p.y - 25.0).abs() < 1e-5);
    }

    #[test]
    fn test_lemniscate_crosses_origin() {
        // The two lobes meet at t = π/2 and t = 3π/2
        assert!(lemniscate(100.0, FRAC_PI_2).length() < 1e-4);
        let right = lemniscate(100.0, 0.0);
        let left = lemniscate(100.0, PI);
        assert!((right.x - 100.0).abs() < 1e-4);
        assert!((left.x + 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }
}
