//! Pointer tracking
//!
//! Mouse and touch are unified into one `PointerState`. Raw events only move
//! the pointer; speed is derived once per frame by `PointerTracker::sample`,
//! so it reads as "distance moved this frame".

use glam::Vec2;

use crate::consts::SIGNIFICANT_SPEED;

/// Where the pointer sits before the first event (off-screen)
pub const OFFSCREEN: Vec2 = Vec2::new(-100.0, -100.0);

/// Per-frame pointer snapshot read by the simulation and renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub pos: Vec2,
    /// Position at the previous sample
    pub prev: Vec2,
    /// Distance moved since the previous sample
    pub speed: f32,
    /// Mouse button down / finger on screen
    pub held: bool,
    /// Last time (ms) a sample exceeded the significant-movement threshold
    pub last_move_ms: f64,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            pos: OFFSCREEN,
            prev: OFFSCREEN,
            speed: 0.0,
            held: false,
            last_move_ms: 0.0,
        }
    }
}

impl PointerState {
    /// Pointer within `radius` of `point`
    #[inline]
    pub fn within(&self, point: Vec2, radius: f32) -> bool {
        self.pos.distance(point) < radius
    }

    /// Pointer moving fast enough to scrub
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.speed > crate::consts::MOVING_SPEED
    }
}

/// Converts raw pointer events into frame samples
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    state: PointerState,
    /// Latest raw position, folded in at the next sample
    raw: Option<Vec2>,
    /// Release seen since the last sample
    released: bool,
}

impl PointerTracker {
    pub fn new(now_ms: f64) -> Self {
        Self {
            state: PointerState {
                last_move_ms: now_ms,
                ..Default::default()
            },
            raw: None,
            released: false,
        }
    }

    /// Mouse move / touch move
    pub fn on_move(&mut self, x: f32, y: f32) {
        self.raw = Some(Vec2::new(x, y));
    }

    /// Mouse down / touch start
    pub fn on_down(&mut self, x: f32, y: f32) {
        self.raw = Some(Vec2::new(x, y));
        self.state.held = true;
        self.released = false;
    }

    /// Mouse up / touch end
    pub fn on_up(&mut self) {
        self.state.held = false;
        self.state.speed = 0.0;
        self.released = true;
    }

    /// Fold pending events into a new sample. Call once per frame.
    pub fn sample(&mut self, now_ms: f64) -> PointerState {
        let pos = self.raw.take().unwrap_or(self.state.pos);
        self.state.prev = self.state.pos;
        self.state.pos = pos;

        if self.released {
            // Release zeroes speed for the frame it lands in
            self.released = false;
            self.state.speed = 0.0;
        } else {
            self.state.speed = self.state.prev.distance(pos);
        }

        if self.state.speed > SIGNIFICANT_SPEED {
            self.state.last_move_ms = now_ms;
        }
        self.state
    }

    /// Most recent sample
    pub fn state(&self) -> &PointerState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_is_distance_since_last_sample() {
        let mut tracker = PointerTracker::new(0.0);
        tracker.on_move(0.0, 0.0);
        tracker.sample(16.0);
        tracker.on_move(3.0, 4.0);
        let s = tracker.sample(32.0);
        assert_eq!(s.speed, 5.0);
        assert_eq!(s.prev, Vec2::ZERO);
        assert_eq!(s.last_move_ms, 32.0);
    }

    #[test]
    fn test_multiple_events_per_frame_use_latest_position() {
        let mut tracker = PointerTracker::new(0.0);
        tracker.on_move(0.0, 0.0);
        tracker.sample(0.0);
        tracker.on_move(100.0, 0.0);
        tracker.on_move(6.0, 8.0);
        assert_eq!(tracker.sample(16.0).speed, 10.0);
    }

    #[test]
    fn test_stationary_pointer_reads_zero_speed() {
        let mut tracker = PointerTracker::new(0.0);
        tracker.on_move(50.0, 50.0);
        tracker.sample(0.0);
        let s = tracker.sample(16.0);
        assert_eq!(s.speed, 0.0);
    }

    #[test]
    fn test_release_resets_speed() {
        let mut tracker = PointerTracker::new(0.0);
        tracker.on_down(0.0, 0.0);
        tracker.sample(0.0);
        tracker.on_move(30.0, 40.0);
        tracker.on_up();
        let s = tracker.sample(16.0);
        assert_eq!(s.speed, 0.0);
        assert!(!s.held);
        assert_eq!(s.pos, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_small_moves_do_not_stamp_last_move() {
        let mut tracker = PointerTracker::new(5.0);
        tracker.on_move(0.0, 0.0);
        tracker.sample(5.0);
        let before = tracker.state().last_move_ms;
        tracker.on_move(1.0, 1.0);
        let s = tracker.sample(500.0);
        assert!(s.speed <= SIGNIFICANT_SPEED);
        assert_eq!(s.last_move_ms, before);
    }
}
