//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - The host passes the clock in, nothing reads wall time
//! - Seeded RNG only
//! - One pointer sample per frame
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod layout;
pub mod motion;
pub mod pattern;
pub mod pointer;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use motion::{GameMode, IconShape, MOTIONS, Motion, PatternKind, motion_by_id};
pub use pattern::{sample_point, seed_particles};
pub use pointer::{PointerState, PointerTracker};
pub use state::{
    Bubble, BubbleColor, GameEvent, GameResult, GameState, MenuButton, Particle,
    Screen, ScreenKind, SessionData, Transition, Viewport, WarmupDir,
};
pub use tick::{TickInput, return_zone_center, tick, warmup_track};
