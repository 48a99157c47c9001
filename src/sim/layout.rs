//! Menu button layout
//!
//! Layouts are a pure function of the viewport and are rebuilt on every
//! entry and every resize.

use glam::Vec2;

use super::motion::{GameMode, MOTIONS, Motion};
use super::state::{MenuButton, Viewport};

/// Motion button diameter as a fraction of the viewport's short side
pub const MENU_BUTTON_SCALE: f32 = 0.264;
/// Gap between motion buttons as a fraction of the diameter
pub const MENU_GAP_SCALE: f32 = 0.322;
/// Motion row sits this far below mid-height
pub const MENU_ROW_OFFSET: f32 = 50.0;
/// Mode button diameter as a fraction of the viewport's short side
pub const MODE_BUTTON_SCALE: f32 = 0.22;
/// Horizontal placement of the two mode buttons
pub const MODE_BUTTON_X: [f32; 2] = [0.35, 0.65];

const MODE_ICON_COLOR: &str = "#000000";

/// One button per catalog motion, in a centered row
pub fn menu_buttons(viewport: Viewport) -> Vec<MenuButton<Motion>> {
    let diameter = viewport.min_side() * MENU_BUTTON_SCALE;
    let gap = diameter * MENU_GAP_SCALE;
    let n = MOTIONS.len() as f32;
    let total_width = n * diameter + (n - 1.0) * gap;
    let first_x = (viewport.width - total_width) / 2.0 + diameter / 2.0;
    let y = viewport.height / 2.0 + MENU_ROW_OFFSET;

    MOTIONS
        .iter()
        .enumerate()
        .map(|(i, motion)| MenuButton {
            pos: Vec2::new(first_x + i as f32 * (diameter + gap), y),
            radius: diameter / 2.0,
            label: motion.label,
            icon: motion.icon,
            icon_color: motion.icon_color,
            payload: *motion,
            progress: 0.0,
            completed: false,
        })
        .collect()
}

/// Speed and endurance buttons at 35% / 65% of the width
pub fn mode_buttons(viewport: Viewport) -> Vec<MenuButton<GameMode>> {
    let diameter = viewport.min_side() * MODE_BUTTON_SCALE;
    GameMode::ALL
        .iter()
        .zip(MODE_BUTTON_X)
        .map(|(mode, fx)| MenuButton {
            pos: Vec2::new(viewport.width * fx, viewport.height / 2.0),
            radius: diameter / 2.0,
            label: mode.label(),
            icon: mode.icon(),
            icon_color: MODE_ICON_COLOR,
            payload: *mode,
            progress: 0.0,
            completed: false,
        })
        .collect()
}
