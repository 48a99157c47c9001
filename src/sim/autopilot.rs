//! Scripted pointer that plays a whole session
//!
//! Used for the headless demo and end-to-end tests. It only produces raw
//! pointer positions; the game sees them through the normal tracker.

use glam::Vec2;

use super::motion::GameMode;
use super::state::{GameState, MenuButton, Screen, WarmupDir};
use super::tick::{return_zone_center, warmup_track};

/// Largest pointer jump per frame
const MAX_STEP: f32 = 60.0;
/// Radius of the small circles drawn while scrubbing
const ORBIT_RADIUS: f32 = 20.0;
/// Orbit angle advanced per frame
const ORBIT_STEP: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Index into the motion catalog to pick on MENU
    pub motion_index: usize,
    pub mode: GameMode,
    pos: Vec2,
    angle: f32,
}

impl Autopilot {
    pub fn new(motion_index: usize, mode: GameMode) -> Self {
        Self {
            motion_index,
            mode,
            pos: Vec2::ZERO,
            angle: 0.0,
        }
    }

    fn orbit(&mut self, center: Vec2, radius: f32) -> Vec2 {
        self.angle += ORBIT_STEP;
        center + Vec2::new(self.angle.cos(), self.angle.sin()) * radius
    }

    fn scrub_button<P>(&mut self, button: Option<&MenuButton<P>>, state: &GameState) -> Vec2 {
        match button {
            Some(b) => self.orbit(b.pos, b.radius * 0.4),
            None => state.viewport.center(),
        }
    }

    /// Pick the next pointer position for `state`
    pub fn next(&mut self, state: &GameState) -> Vec2 {
        let target = match &state.screen {
            Screen::Start { bubbles } => bubbles
                .iter()
                .filter(|b| b.active)
                .map(|b| b.position_at(state.clock_ms))
                .min_by(|a, b| a.distance(self.pos).total_cmp(&b.distance(self.pos)))
                .unwrap_or_else(|| state.viewport.center()),
            Screen::Menu { buttons } => {
                let wanted = buttons.get(self.motion_index);
                self.scrub_button(wanted, state)
            }
            Screen::ModeSelect { buttons } => {
                let wanted = buttons.iter().find(|b| b.payload == self.mode);
                self.scrub_button(wanted, state)
            }
            Screen::Warmup => {
                let (top, bottom) = warmup_track(state.viewport);
                match state.session.warmup_dir {
                    WarmupDir::Outbound => bottom,
                    WarmupDir::Inbound => top,
                }
            }
            Screen::Game { particles } => {
                let nearest = particles
                    .iter()
                    .filter(|p| p.active)
                    .map(|p| p.pos)
                    .min_by(|a, b| a.distance(self.pos).total_cmp(&b.distance(self.pos)));
                let anchor = nearest.unwrap_or_else(|| state.viewport.center());
                self.orbit(anchor, ORBIT_RADIUS)
            }
            Screen::Results => self.orbit(return_zone_center(state.viewport), ORBIT_RADIUS),
        };

        let step = target - self.pos;
        self.pos += step.clamp_length_max(MAX_STEP);
        self.pos
    }
}
